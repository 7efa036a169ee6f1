//! Appends configured flags to compiler invocations, split by language and
//! (for link-producing invocations) by stage.

use super::{Action, ActionConfig, ActionContext, PreRunOutcome};
use crate::enums::ToolKind;
use crate::error::Result;

#[derive(Debug)]
pub struct InjectFlags {
    config: ActionConfig,
}

impl InjectFlags {
    pub fn new(config: ActionConfig) -> Self {
        InjectFlags { config }
    }

    fn flags(&self, key: &str) -> Vec<String> {
        self.config
            .get(key)
            .map(|v| shell_words::split(v).unwrap_or_default())
            .unwrap_or_default()
    }
}

impl Action for InjectFlags {
    fn name(&self) -> &'static str {
        "InjectFlags"
    }

    fn applies_to(&self) -> &'static [ToolKind] {
        &[ToolKind::Cc, ToolKind::Cxx]
    }

    fn before_run(&self, ctx: &mut ActionContext) -> Result<PreRunOutcome> {
        let cppflags = self.flags("CPPFLAGS");
        let mut extra = match ctx.kind {
            ToolKind::Cc => self.flags("CFLAGS"),
            ToolKind::Cxx => self.flags("CXXFLAGS"),
            _ => Vec::new(),
        };
        extra.extend(cppflags);

        let is_all_stages = !ctx.args.iter().any(|a| {
            matches!(a.as_str(), "-E" | "-fsyntax-only" | "-S" | "-c")
        });
        if is_all_stages {
            let linker_flags = match ctx.kind {
                ToolKind::Cc => self.flags("CFLAGS_LINKER"),
                ToolKind::Cxx => self.flags("CXXFLAGS_LINKER"),
                _ => Vec::new(),
            };
            extra.extend(linker_flags);
        }

        ctx.args.extend(extra);
        Ok(PreRunOutcome::Continue)
    }
}
