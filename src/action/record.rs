//! Appends a JSON record of every invocation this action is attached to,
//! to the file named by the `output` config key.

use super::{Action, ActionConfig, ActionContext, PreRunOutcome};
use crate::enums::ToolKind;
use crate::error::Result;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug)]
pub struct Record {
    output: Option<PathBuf>,
}

impl Record {
    pub fn new(config: ActionConfig) -> Self {
        Record {
            output: config.get("output").map(PathBuf::from),
        }
    }
}

#[derive(Serialize)]
struct RecordLine<'a> {
    kind: &'a str,
    args: &'a [String],
    cwd: String,
    run_skipped: bool,
}

impl Action for Record {
    fn name(&self) -> &'static str {
        "Record"
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

    fn after_run(&self, ctx: &ActionContext, run_skipped: bool) -> Result<Option<serde_json::Value>> {
        let line = RecordLine {
            kind: ctx.kind.as_str(),
            args: ctx.args,
            cwd: ctx.cwd.display().to_string(),
            run_skipped,
        };
        if let Some(output) = &self.output {
            if let Err(e) = crate::journal::append_json_line(output, &line) {
                tracing::debug!("Record action failed to write {}: {e}", output.display());
            }
        }
        Ok(serde_json::to_value(&line).ok())
    }
}
