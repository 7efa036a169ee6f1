//! Times the wrapped-tool invocation and records the elapsed microseconds,
//! plus whether the run was skipped by an earlier action.

use super::{Action, ActionConfig, ActionContext, PreRunOutcome};
use crate::enums::ToolKind;
use crate::error::Result;
use serde::Serialize;
use std::cell::Cell;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug)]
pub struct Benchmark {
    output: Option<PathBuf>,
    started_at: Cell<Option<Instant>>,
}

impl Benchmark {
    pub fn new(config: ActionConfig) -> Self {
        Benchmark {
            output: config.get("output").map(PathBuf::from),
            started_at: Cell::new(None),
        }
    }
}

#[derive(Serialize)]
struct BenchmarkRecord<'a> {
    kind: &'a str,
    elapsed_micros: u128,
    run_skipped: bool,
}

impl Action for Benchmark {
    fn name(&self) -> &'static str {
        "Benchmark"
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

    fn before_run(&self, _ctx: &mut ActionContext) -> Result<PreRunOutcome> {
        self.started_at.set(Some(Instant::now()));
        Ok(PreRunOutcome::Continue)
    }

    fn after_run(&self, ctx: &ActionContext, run_skipped: bool) -> Result<Option<serde_json::Value>> {
        let elapsed_micros = self
            .started_at
            .get()
            .map(|t| t.elapsed().as_micros())
            .unwrap_or(0);
        let record = BenchmarkRecord {
            kind: ctx.kind.as_str(),
            elapsed_micros,
            run_skipped,
        };
        if let Some(output) = &self.output {
            if let Err(e) = crate::journal::append_json_line(output, &record) {
                tracing::debug!("Benchmark action failed to write {}: {e}", output.display());
            }
        }
        Ok(serde_json::to_value(&record).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn records_elapsed_and_skipped_flag() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("bench.jsonl");
        let mut config = ActionConfig::new();
        config.insert("output".to_string(), out.display().to_string());
        let action = Benchmark::new(config);

        let mut args = vec!["-c".to_string()];
        let cwd = PathBuf::from("/tmp");
        let ctx_config = ActionConfig::new();
        let mut ctx = ActionContext {
            kind: ToolKind::Cc,
            args: &mut args,
            cwd: &cwd,
            config: &ctx_config,
        };
        action.before_run(&mut ctx).unwrap();
        action.after_run(&ctx, true).unwrap();
        let contents = std::fs::read_to_string(&out).unwrap();
        assert!(contents.contains("\"run_skipped\":true"));
    }
}
