//! Unconditionally skips the wrapped `strip` invocation, useful for
//! builds that want every other shim's side effects but need to keep
//! symbols intact for later analysis.

use super::{Action, ActionConfig, ActionContext, PreRunOutcome};
use crate::enums::ToolKind;
use crate::error::Result;

#[derive(Debug)]
pub struct SkipStrip;

impl Action for SkipStrip {
    fn name(&self) -> &'static str {
        "SkipStrip"
    }

    fn applies_to(&self) -> &'static [ToolKind] {
        &[ToolKind::Strip]
    }

    fn before_run(&self, _ctx: &mut ActionContext) -> Result<PreRunOutcome> {
        Ok(PreRunOutcome::Skip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn always_skips() {
        let mut args = vec!["a.out".to_string()];
        let cwd = PathBuf::from("/tmp");
        let config = super::ActionConfig::new();
        let mut ctx = ActionContext {
            kind: ToolKind::Strip,
            args: &mut args,
            cwd: &cwd,
            config: &config,
        };
        assert_eq!(SkipStrip.before_run(&mut ctx).unwrap(), PreRunOutcome::Skip);
    }
}
