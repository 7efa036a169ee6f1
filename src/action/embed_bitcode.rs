//! Prepends `-fembed-bitcode`, so every compiled object carries its LLVM
//! bitcode alongside native code.

use super::{Action, ActionConfig, ActionContext, PreRunOutcome};
use crate::enums::ToolKind;
use crate::error::Result;

#[derive(Debug)]
pub struct EmbedBitcode;

impl Action for EmbedBitcode {
    fn name(&self) -> &'static str {
        "EmbedBitcode"
    }

    fn applies_to(&self) -> &'static [ToolKind] {
        &[ToolKind::Cc, ToolKind::Cxx]
    }

    fn before_run(&self, ctx: &mut ActionContext) -> Result<PreRunOutcome> {
        ctx.args.insert(0, "-fembed-bitcode".to_string());
        Ok(PreRunOutcome::Continue)
    }
}
