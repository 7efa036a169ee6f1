//! Detects a C++ standard passed to the `CC` shim (a build system invoking
//! `cc -std=c++17 ...` instead of `c++`) and prepends `-x c++` so the
//! underlying driver treats the input as C++ despite being invoked as a C
//! compiler.

use super::{Action, ActionConfig, ActionContext, PreRunOutcome};
use crate::enums::ToolKind;
use crate::error::Result;
use crate::tool::compiler::Compiler;
use crate::tool::{HasStandard, Invocation};

#[derive(Debug)]
pub struct CCForCXX;

impl Action for CCForCXX {
    fn name(&self) -> &'static str {
        "CCForCXX"
    }

    fn applies_to(&self) -> &'static [ToolKind] {
        &[ToolKind::Cc]
    }

    fn before_run(&self, ctx: &mut ActionContext) -> Result<PreRunOutcome> {
        let probe = Compiler::new(
            ToolKind::Cc,
            Invocation::new(std::path::PathBuf::new(), ctx.args.clone(), ctx.cwd.to_path_buf()),
        );
        if probe.std().is_cxx_std() {
            ctx.args.splice(0..0, ["-x".to_string(), "c++".to_string()]);
        }
        Ok(PreRunOutcome::Continue)
    }
}
