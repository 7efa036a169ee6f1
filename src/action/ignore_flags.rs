//! Removes exact-match flags named in the `FLAGS` config value.

use super::{Action, ActionConfig, ActionContext, PreRunOutcome};
use crate::enums::ToolKind;
use crate::error::Result;

#[derive(Debug)]
pub struct IgnoreFlags {
    flags: Vec<String>,
}

impl IgnoreFlags {
    pub fn new(config: ActionConfig) -> Self {
        let flags = config
            .get("FLAGS")
            .map(|v| shell_words::split(v).unwrap_or_default())
            .unwrap_or_default();
        IgnoreFlags { flags }
    }
}

impl Action for IgnoreFlags {
    fn name(&self) -> &'static str {
        "IgnoreFlags"
    }

    fn applies_to(&self) -> &'static [ToolKind] {
        &[ToolKind::Cc, ToolKind::Cxx]
    }

    fn before_run(&self, ctx: &mut ActionContext) -> Result<PreRunOutcome> {
        ctx.args.retain(|a| !self.flags.contains(a));
        Ok(PreRunOutcome::Continue)
    }
}
