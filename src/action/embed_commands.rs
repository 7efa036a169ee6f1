//! Embeds a JSON description of the exact compiler invocation into the
//! compiled object itself, in a dedicated, loader-ignored section - useful
//! for recovering build provenance from a binary alone, after the fact.
//!
//! Skipped for assembly inputs (`.s`/`.S`): there's no sensible C
//! preprocessor hook to inject the embedding through when the driver never
//! runs the C frontend.

use super::{Action, ActionConfig, ActionContext, PreRunOutcome};
use crate::enums::ToolKind;
use crate::error::Result;
use crate::util::hash::sha256_str;
use serde::Serialize;
use std::path::PathBuf;

const SECTION_ALIGN: usize = 4;

#[derive(Debug)]
pub struct EmbedCommands {
    store: PathBuf,
}

impl EmbedCommands {
    pub fn new(config: ActionConfig) -> Self {
        let store = config
            .get("store")
            .map(PathBuf::from)
            .unwrap_or_else(std::env::temp_dir);
        EmbedCommands { store }
    }
}

#[derive(Serialize)]
struct EmbeddedCommand<'a> {
    cwd: String,
    args: &'a [String],
    wrapped_tool: &'a str,
}

impl Action for EmbedCommands {
    fn name(&self) -> &'static str {
        "EmbedCommands"
    }

    fn applies_to(&self) -> &'static [ToolKind] {
        &[ToolKind::Cc, ToolKind::Cxx]
    }

    fn before_run(&self, ctx: &mut ActionContext) -> Result<PreRunOutcome> {
        if ctx.args.iter().any(|a| is_assembly_input(a)) {
            return Ok(PreRunOutcome::Continue);
        }

        let payload = EmbeddedCommand {
            cwd: ctx.cwd.display().to_string(),
            args: ctx.args,
            wrapped_tool: ctx.kind.as_str(),
        };
        let Ok(json) = serde_json::to_string(&payload) else {
            return Ok(PreRunOutcome::Continue);
        };
        let digest = sha256_str(&json);
        let header_path = self.store.join(format!("blight-cc-{digest}.h"));

        if std::fs::write(&header_path, render_header(&json)).is_err() {
            tracing::debug!("EmbedCommands failed to write {}", header_path.display());
            return Ok(PreRunOutcome::Continue);
        }

        ctx.args.extend([
            "-include".to_string(),
            header_path.display().to_string(),
            "-Wno-overlength-strings".to_string(),
            "-Wno-error".to_string(),
        ]);
        Ok(PreRunOutcome::Continue)
    }
}

fn is_assembly_input(arg: &str) -> bool {
    arg.ends_with(".s") || arg.ends_with(".S")
}

fn render_header(json: &str) -> String {
    let escaped = json.replace('\\', "\\\\").replace('"', "\\\"");
    let section_attr = if cfg!(target_os = "linux") {
        r#".section .trailofbits_cc,"S",@note"#
    } else {
        "__DATA,.trailofbits_cc"
    };
    format!(
        "__attribute__((section(\"{section_attr}\"), aligned({SECTION_ALIGN})))\nstatic const char __trailofbits_cc[] = \"{escaped}\";\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn skips_assembly_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = ActionConfig::new();
        config.insert("store".to_string(), dir.path().display().to_string());
        let action = EmbedCommands::new(config);

        let mut args = vec!["-c".to_string(), "a.s".to_string()];
        let cwd = PathBuf::from("/tmp");
        let ctx_config = ActionConfig::new();
        let mut ctx = ActionContext {
            kind: ToolKind::Cc,
            args: &mut args,
            cwd: &cwd,
            config: &ctx_config,
        };
        action.before_run(&mut ctx).unwrap();
        assert_eq!(args, vec!["-c", "a.s"]);
    }

    #[test]
    fn injects_include_for_c_source() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = ActionConfig::new();
        config.insert("store".to_string(), dir.path().display().to_string());
        let action = EmbedCommands::new(config);

        let mut args = vec!["-c".to_string(), "a.c".to_string()];
        let cwd = PathBuf::from("/tmp");
        let ctx_config = ActionConfig::new();
        let mut ctx = ActionContext {
            kind: ToolKind::Cc,
            args: &mut args,
            cwd: &cwd,
            config: &ctx_config,
        };
        action.before_run(&mut ctx).unwrap();
        assert!(args.contains(&"-include".to_string()));
    }

    #[test]
    fn section_name_matches_platform_convention() {
        let header = render_header("{}");
        if cfg!(target_os = "linux") {
            assert!(header.contains(r#".section .trailofbits_cc,"S",@note"#));
        } else {
            assert!(header.contains("__DATA,.trailofbits_cc"));
        }
    }
}
