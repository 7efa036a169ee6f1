//! Records every output path the wrapped tool will produce, classified by
//! kind, and - once the wrapped tool has actually run - copies each into a
//! content store under its hash.
//!
//! Unlike [`super::find_inputs::FindInputs`], this only makes sense as an
//! after-run hook: the output files don't exist (and can't be hashed)
//! until the wrapped tool has written them.

use super::{Action, ActionConfig, ActionContext};
use crate::constants::classify_output;
use crate::enums::{OutputKind, ToolKind};
use crate::error::Result;
use crate::tool::archiver::Archiver;
use crate::tool::assembler::Assembler;
use crate::tool::compiler::Compiler;
use crate::tool::linker::Linker;
use crate::tool::Invocation;
use crate::util::hash::sha256_file;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug)]
pub struct FindOutputs {
    output: Option<PathBuf>,
    store: Option<PathBuf>,
    append_hash: bool,
}

impl FindOutputs {
    pub fn new(config: ActionConfig) -> Self {
        FindOutputs {
            output: config.get("output").map(PathBuf::from),
            store: config.get("store").map(PathBuf::from),
            append_hash: config.get("append_hash").map(|v| v != "false").unwrap_or(true),
        }
    }
}

#[derive(Serialize)]
struct OutputRecord {
    kind: &'static str,
    prenormalized_path: String,
    path: String,
    store_path: Option<String>,
}

#[derive(Serialize)]
struct OutputsRecord<'a> {
    tool: &'a str,
    outputs: Vec<OutputRecord>,
}

fn tool_outputs(kind: ToolKind, args: &[String], cwd: &std::path::Path) -> Vec<PathBuf> {
    let invocation = Invocation::new(PathBuf::new(), args.to_vec(), cwd.to_path_buf());
    match kind {
        ToolKind::Cc => Compiler::new(ToolKind::Cc, invocation).outputs(),
        ToolKind::Cxx => Compiler::new(ToolKind::Cxx, invocation).outputs(),
        ToolKind::Ld => Linker::new(invocation).outputs(),
        ToolKind::As => Assembler::new(invocation).outputs(),
        ToolKind::Ar => Archiver::new(invocation).outputs(),
        _ => Vec::new(),
    }
}

impl Action for FindOutputs {
    fn name(&self) -> &'static str {
        "FindOutputs"
    }

    fn applies_to(&self) -> &'static [ToolKind] {
        &[ToolKind::Cc, ToolKind::Cxx, ToolKind::Ld, ToolKind::As, ToolKind::Ar]
    }

    fn after_run(&self, ctx: &ActionContext, run_skipped: bool) -> Result<Option<serde_json::Value>> {
        if run_skipped {
            return Ok(None);
        }
        let mut outputs = Vec::new();
        for path in tool_outputs(ctx.kind, ctx.args, ctx.cwd) {
            let absolute = if path.is_absolute() {
                path.clone()
            } else {
                ctx.cwd.join(&path)
            };
            let filename = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
            let mut kind = classify_output(&filename);
            // `a.out` is always an executable from these tool kinds, even
            // if a suffix-based guess would say otherwise.
            if filename == "a.out" {
                kind = OutputKind::Executable;
            }
            let store_path = match &self.store {
                Some(store) if absolute.exists() => sha256_file(&absolute)
                    .ok()
                    .and_then(|hash| copy_into_store(store, &absolute, &hash, self.append_hash).ok())
                    .map(|p| p.display().to_string()),
                _ => None,
            };
            outputs.push(OutputRecord {
                kind: output_kind_name(kind),
                prenormalized_path: path.display().to_string(),
                path: absolute.display().to_string(),
                store_path,
            });
        }
        let record = OutputsRecord {
            tool: ctx.kind.as_str(),
            outputs,
        };
        if let Some(output) = &self.output {
            if let Err(e) = crate::journal::append_json_line(output, &record) {
                tracing::debug!("FindOutputs failed to write {}: {e}", output.display());
            }
        }
        Ok(serde_json::to_value(&record).ok())
    }
}

fn output_kind_name(kind: OutputKind) -> &'static str {
    match kind {
        OutputKind::Object => "Object",
        OutputKind::SharedLibrary => "SharedLibrary",
        OutputKind::StaticLibrary => "StaticLibrary",
        OutputKind::Executable => "Executable",
        OutputKind::KernelModule => "KernelModule",
        OutputKind::Unknown => "Unknown",
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
