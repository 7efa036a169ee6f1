//! A trivial action that logs before and after the wrapped tool runs.
//! Exists as the minimal worked example of the action contract, mirrored
//! by the tests in this module.

use super::{Action, ActionConfig, ActionContext, PreRunOutcome};
use crate::enums::ToolKind;
use crate::error::Result;

#[derive(Debug)]
pub struct Demo;

impl Action for Demo {
    fn name(&self) -> &'static str {
        "Demo"
    }

    fn applies_to(&self) -> &'static [ToolKind] {
        &[
            ToolKind::Cc,
            ToolKind::Cxx,
            ToolKind::Cpp,
            ToolKind::Ld,
            ToolKind::As,
            ToolKind::Ar,
            ToolKind::Strip,
            ToolKind::Install,
        ]
    }

    fn before_run(&self, ctx: &mut ActionContext) -> Result<PreRunOutcome> {
        eprintln!("[demo] before-run: {}", ctx.kind.as_str());
        Ok(PreRunOutcome::Continue)
    }

    fn after_run(&self, ctx: &ActionContext, run_skipped: bool) -> Result<Option<serde_json::Value>> {
        eprintln!("[demo] after-run: {} (skipped={run_skipped})", ctx.kind.as_str());
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn applies_to_every_tool_kind() {
        for kind in [
            ToolKind::Cc,
            ToolKind::Cxx,
            ToolKind::Cpp,
            ToolKind::Ld,
            ToolKind::As,
            ToolKind::Ar,
            ToolKind::Strip,
            ToolKind::Install,
        ] {
            assert!(Demo.applies_to().contains(&kind));
        }
    }

    #[test]
    fn hooks_never_mutate_args_or_fail() {
        let mut args = vec!["-c".to_string(), "a.c".to_string()];
        let cwd = PathBuf::from("/tmp");
        let config = ActionConfig::new();
        let mut ctx = ActionContext {
            kind: ToolKind::Cc,
            args: &mut args,
            cwd: &cwd,
            config: &config,
        };
        Demo.before_run(&mut ctx).unwrap();
        assert_eq!(args, vec!["-c".to_string(), "a.c".to_string()]);

        let ctx = ActionContext {
            kind: ToolKind::Cc,
            args: &mut args,
            cwd: &cwd,
            config: &config,
        };
        assert!(Demo.after_run(&ctx, false).unwrap().is_none());
    }
}
