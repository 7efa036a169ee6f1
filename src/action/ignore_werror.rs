//! Strips `-Werror`, letting warnings stay warnings during an otherwise
//! strict build.

use super::{Action, ActionConfig, ActionContext, PreRunOutcome};
use crate::enums::ToolKind;
use crate::error::Result;

#[derive(Debug)]
pub struct IgnoreWerror;

impl Action for IgnoreWerror {
    fn name(&self) -> &'static str {
        "IgnoreWerror"
    }

    fn applies_to(&self) -> &'static [ToolKind] {
        &[ToolKind::Cc, ToolKind::Cxx]
    }

    fn before_run(&self, ctx: &mut ActionContext) -> Result<PreRunOutcome> {
        ctx.args.retain(|a| a != "-Werror");
        Ok(PreRunOutcome::Continue)
    }
}
