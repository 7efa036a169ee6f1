//! Strips any `-flto...` flag, disabling link-time optimization.

use super::{Action, ActionConfig, ActionContext, PreRunOutcome};
use crate::enums::ToolKind;
use crate::error::Result;

#[derive(Debug)]
pub struct IgnoreFlto;

impl Action for IgnoreFlto {
    fn name(&self) -> &'static str {
        "IgnoreFlto"
    }

    fn applies_to(&self) -> &'static [ToolKind] {
        &[ToolKind::Cc, ToolKind::Cxx]
    }

    fn before_run(&self, ctx: &mut ActionContext) -> Result<PreRunOutcome> {
        ctx.args.retain(|a| !a.starts_with("-flto"));
        Ok(PreRunOutcome::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn removes_all_flto_variants() {
        let mut args = vec!["-flto".to_string(), "-flto=thin".to_string(), "-c".to_string()];
        let cwd = PathBuf::from("/tmp");
        let config = super::ActionConfig::new();
        let mut ctx = ActionContext {
            kind: ToolKind::Cc,
            args: &mut args,
            cwd: &cwd,
            config: &config,
        };
        IgnoreFlto.before_run(&mut ctx).unwrap();
        assert_eq!(args, vec!["-c"]);
    }
}
