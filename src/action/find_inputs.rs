//! Records every input path the wrapped tool will read, classified by kind
//! and, if a content store is configured, copied into it under its
//! content hash.

use super::{Action, ActionConfig, ActionContext};
use crate::constants::classify_input;
use crate::enums::ToolKind;
use crate::error::Result;
use crate::tool::Invocation;
use crate::util::hash::sha256_file;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug)]
pub struct FindInputs {
    output: Option<PathBuf>,
    store: Option<PathBuf>,
    append_hash: bool,
}

impl FindInputs {
    pub fn new(config: ActionConfig) -> Self {
        FindInputs {
            output: config.get("output").map(PathBuf::from),
            store: config.get("store").map(PathBuf::from),
            append_hash: config.get("append_hash").map(|v| v != "false").unwrap_or(true),
        }
    }
}

#[derive(Serialize)]
struct InputRecord {
    kind: &'static str,
    prenormalized_path: String,
    path: String,
    store_path: Option<String>,
    content_hash: Option<String>,
}

#[derive(Serialize)]
struct InputsRecord<'a> {
    tool: &'a str,
    inputs: Vec<InputRecord>,
}

impl Action for FindInputs {
    fn name(&self) -> &'static str {
        "FindInputs"
    }

    fn applies_to(&self) -> &'static [ToolKind] {
        &[
            ToolKind::Cc,
            ToolKind::Cxx,
            ToolKind::Cpp,
            ToolKind::Ld,
            ToolKind::As,
        ]
    }

    fn after_run(&self, ctx: &ActionContext, _run_skipped: bool) -> Result<Option<serde_json::Value>> {
        let invocation = Invocation::new(PathBuf::new(), ctx.args.clone(), ctx.cwd.to_path_buf());
        let mut inputs = Vec::new();
        for path in invocation.inputs() {
            let absolute = if path.is_absolute() {
                path.clone()
            } else {
                ctx.cwd.join(&path)
            };
            let content_hash = sha256_file(&absolute).ok();
            let store_path = match (&self.store, &content_hash) {
                (Some(store), Some(hash)) => copy_into_store(store, &absolute, hash, self.append_hash)
                    .ok()
                    .map(|p| p.display().to_string()),
                _ => None,
            };
            inputs.push(InputRecord {
                kind: input_kind_name(&path),
                prenormalized_path: path.display().to_string(),
                path: absolute.display().to_string(),
                store_path,
                content_hash,
            });
        }
        let record = InputsRecord {
            tool: ctx.kind.as_str(),
            inputs,
        };
        if let Some(output) = &self.output {
            if let Err(e) = crate::journal::append_json_line(output, &record) {
                tracing::debug!("FindInputs failed to write {}: {e}", output.display());
            }
        }
        Ok(serde_json::to_value(&record).ok())
    }
}

fn input_kind_name(path: &std::path::Path) -> &'static str {
    match classify_input(&path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default()) {
        crate::enums::InputKind::Source => "Source",
        crate::enums::InputKind::Header => "Header",
        crate::enums::InputKind::Object => "Object",
        crate::enums::InputKind::StaticLibrary => "StaticLibrary",
        crate::enums::InputKind::SharedLibrary => "SharedLibrary",
        crate::enums::InputKind::Assembly => "Assembly",
        crate::enums::InputKind::Unknown => "Unknown",
    }
}

/// Copies `path` into `store` under `<basename>-<hash>` (or just
/// `<basename>` when `append_hash` is false), skipping the copy if that name
/// already exists: the store is content-addressed, so an existing entry
/// with the right name already has the right bytes.
fn copy_into_store(
    store: &std::path::Path,
    path: &std::path::Path,
    hash: &str,
    append_hash: bool,
) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(store)?;
    let basename = path.file_name().unwrap_or_default().to_string_lossy();
    let filename = if append_hash {
        format!("{basename}-{hash}")
    } else {
        basename.into_owned()
    };
    let dest = store.join(filename);
    if !dest.exists() {
        std::fs::copy(path, &dest)?;
    }
    Ok(dest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_classified_inputs_and_populates_store() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.c"), b"int main(){}").unwrap();
        let out = dir.path().join("inputs.jsonl");
        let store = dir.path().join("store");
        let mut config = ActionConfig::new();
        config.insert("output".to_string(), out.display().to_string());
        config.insert("store".to_string(), store.display().to_string());
        let action = FindInputs::new(config);

        let mut args = vec!["-c".to_string(), "a.c".to_string()];
        let ctx_config = ActionConfig::new();
        let ctx = ActionContext {
            kind: ToolKind::Cc,
            args: &mut args,
            cwd: dir.path(),
            config: &ctx_config,
        };
        action.after_run(&ctx, false).unwrap();

        let contents = std::fs::read_to_string(&out).unwrap();
        assert!(contents.contains("\"kind\":\"Source\""));
        assert!(store.read_dir().unwrap().count() == 1);
    }

    #[test]
    fn append_hash_false_stores_under_bare_basename() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.c"), b"int main(){}").unwrap();
        let store = dir.path().join("store");
        let mut config = ActionConfig::new();
        config.insert("store".to_string(), store.display().to_string());
        config.insert("append_hash".to_string(), "false".to_string());
        let action = FindInputs::new(config);

        let mut args = vec!["-c".to_string(), "a.c".to_string()];
        let ctx_config = ActionConfig::new();
        let ctx = ActionContext {
            kind: ToolKind::Cc,
            args: &mut args,
            cwd: dir.path(),
            config: &ctx_config,
        };
        action.after_run(&ctx, false).unwrap();

        assert!(store.join("a.c").exists());
    }
}
