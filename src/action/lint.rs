//! Warns about common compile-flag mistakes. Currently catches the classic
//! typo of defining `FORTIFY_SOURCE` instead of `_FORTIFY_SOURCE`, which
//! silently disables the hardening it was meant to enable.

use super::{Action, ActionConfig, ActionContext, PreRunOutcome};
use crate::enums::ToolKind;
use crate::error::Result;
use crate::tool::compiler::compute_defines;

#[derive(Debug)]
pub struct Lint;

impl Action for Lint {
    fn name(&self) -> &'static str {
        "Lint"
    }

    fn applies_to(&self) -> &'static [ToolKind] {
        &[ToolKind::Cc, ToolKind::Cxx]
    }

    fn before_run(&self, ctx: &mut ActionContext) -> Result<PreRunOutcome> {
        for (name, _value) in compute_defines(ctx.args) {
            if name == "FORTIFY_SOURCE" {
                tracing::warn!(
                    "-DFORTIFY_SOURCE has no effect; did you mean -D_FORTIFY_SOURCE?"
                );
            }
        }
        Ok(PreRunOutcome::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn does_not_mutate_args() {
        let mut args = vec!["-DFORTIFY_SOURCE=2".to_string()];
        let cwd = PathBuf::from("/tmp");
        let config = super::ActionConfig::new();
        let mut ctx = ActionContext {
            kind: ToolKind::Cc,
            args: &mut args,
            cwd: &cwd,
            config: &config,
        };
        Lint.before_run(&mut ctx).unwrap();
        assert_eq!(args, vec!["-DFORTIFY_SOURCE=2"]);
    }
}
