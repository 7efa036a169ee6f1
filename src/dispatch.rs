//! The runtime entry point every shim binary calls: resolve which tool
//! kind the invoking basename names, find the real tool it wraps, run the
//! configured action chain around it, and propagate its exit status.

use crate::action::{self, ActionContext, PreRunOutcome};
use crate::args::expand_response_files;
use crate::constants::sanitize_path;
use crate::enums::ToolKind;
use crate::error::{BlightError, Result};
use crate::util::process::{find_executable, ProcessBuilder};
use std::process::ExitCode;

/// Maps a shim's basename to the tool kind it stands in for, and the
/// `BLIGHT_WRAPPED_<KIND>` environment variable blight reads to find the
/// real tool to forward to.
fn kind_for_basename(basename: &str) -> Option<ToolKind> {
    match basename {
        "blight-cc" => Some(ToolKind::Cc),
        "blight-c++" | "blight-cxx" => Some(ToolKind::Cxx),
        "blight-cpp" => Some(ToolKind::Cpp),
        "blight-ld" => Some(ToolKind::Ld),
        "blight-as" => Some(ToolKind::As),
        "blight-ar" => Some(ToolKind::Ar),
        "blight-strip" => Some(ToolKind::Strip),
        "blight-install" => Some(ToolKind::Install),
        _ => None,
    }
}

/// Runs a shim invocation end to end: parses `argv0` to determine the tool
/// kind, resolves the wrapped tool, runs the action chain, forwards to the
/// wrapped tool unless an action asked to skip it, and runs the action
/// chain's after-run hooks. Returns the process exit code the shim binary
/// should use.
pub fn run_shim(argv0: &str, args: Vec<String>) -> ExitCode {
    match run_shim_inner(argv0, args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("blight: error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run_shim_inner(argv0: &str, args: Vec<String>) -> Result<ExitCode> {
    init_logging();

    let basename = std::path::Path::new(argv0)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let kind = kind_for_basename(&basename).ok_or_else(|| BlightError::UnknownShim(basename.clone()))?;

    let wrapped_tool = resolve_wrapped_tool(kind)?;
    let cwd = std::env::current_dir().map_err(|e| BlightError::NoWrappedTool(e.to_string()))?;

    let args = if supports_response_files(kind) {
        expand_response_files(&args, &cwd)
    } else {
        args
    };

    let actions = action::load_actions_from_env()?;
    let mut working_args = args;

    let mut skip = false;
    for act in actions.iter().filter(|a| a.applies_to().contains(&kind)) {
        let mut ctx = ActionContext {
            kind,
            args: &mut working_args,
            cwd: &cwd,
            config: &Default::default(),
        };
        if act.before_run(&mut ctx)? == PreRunOutcome::Skip {
            skip = true;
            break;
        }
    }

    let exit_code = if skip {
        ExitCode::SUCCESS
    } else {
        let mut builder = ProcessBuilder::new(&wrapped_tool).args(&working_args).cwd(&cwd);
        if let Ok(path) = std::env::var("PATH") {
            builder = builder.env("PATH", sanitize_path(&path));
        }
        let status = builder.status()?;
        if !status.success() {
            let code = status.code().unwrap_or(1);
            run_after_hooks(&actions, kind, &working_args, &cwd, false);
            return Err(BlightError::BuildFailed(wrapped_tool.display().to_string(), code));
        }
        ExitCode::SUCCESS
    };

    run_after_hooks(&actions, kind, &working_args, &cwd, skip);

    Ok(exit_code)
}

fn run_after_hooks(
    actions: &[Box<dyn crate::action::Action>],
    kind: ToolKind,
    args: &[String],
    cwd: &std::path::Path,
    run_skipped: bool,
) {
    let mut args_copy = args.to_vec();
    let mut action_results = std::collections::BTreeMap::new();
    for act in actions.iter().filter(|a| a.applies_to().contains(&kind)) {
        let ctx = ActionContext {
            kind,
            args: &mut args_copy,
            cwd,
            config: &Default::default(),
        };
        match act.after_run(&ctx, run_skipped) {
            Ok(Some(value)) => {
                action_results.insert(act.name().to_string(), value);
            }
            Ok(None) => {}
            Err(e) => tracing::debug!("action after_run failed: {e}"),
        }
    }

    if let Ok(journal_path) = std::env::var("BLIGHT_JOURNAL_PATH") {
        let record = JournalRecord {
            kind: kind.as_str(),
            args,
            cwd: cwd.display().to_string(),
            run_skipped,
            action_results,
        };
        if let Err(e) = crate::journal::append_json_line(std::path::Path::new(&journal_path), &record) {
            tracing::debug!("failed to write BLIGHT_JOURNAL_PATH {journal_path}: {e}");
        }
    }
}

/// One line written to `BLIGHT_JOURNAL_PATH`, aggregating every action's
/// `after_run` result under its own name.
#[derive(serde::Serialize)]
struct JournalRecord<'a> {
    kind: &'a str,
    args: &'a [String],
    cwd: String,
    run_skipped: bool,
    action_results: std::collections::BTreeMap<String, serde_json::Value>,
}

fn supports_response_files(kind: ToolKind) -> bool {
    matches!(
        kind,
        ToolKind::Cc | ToolKind::Cxx | ToolKind::Ld | ToolKind::As | ToolKind::Ar | ToolKind::Strip
    )
}

/// Finds the real tool a shim wraps, via `BLIGHT_WRAPPED_<KIND>`. That
/// variable must name an executable on `PATH` or an absolute path; blight
/// never guesses at a default compiler, since the whole point of the shim
/// is to stand in for whatever tool the build system's environment already
/// names.
fn resolve_wrapped_tool(kind: ToolKind) -> Result<std::path::PathBuf> {
    let env_key = format!("BLIGHT_WRAPPED_{}", kind.env_suffix());
    let name = std::env::var(&env_key).map_err(|_| BlightError::NoWrappedTool(env_key.clone()))?;
    let path = std::path::Path::new(&name);
    if path.is_absolute() && path.exists() {
        return Ok(path.to_path_buf());
    }
    find_executable(&name).ok_or(BlightError::NoWrappedTool(name))
}

fn init_logging() {
    use tracing_subscriber::EnvFilter;
    let filter = std::env::var("BLIGHT_LOGLEVEL").unwrap_or_else(|_| "warn".to_string());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .without_time()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basename_routes_to_expected_kind() {
        assert_eq!(kind_for_basename("blight-cc"), Some(ToolKind::Cc));
        assert_eq!(kind_for_basename("blight-c++"), Some(ToolKind::Cxx));
        assert_eq!(kind_for_basename("blight-install"), Some(ToolKind::Install));
        assert_eq!(kind_for_basename("unrelated"), None);
    }

    #[test]
    fn response_files_only_supported_by_some_kinds() {
        assert!(supports_response_files(ToolKind::Cc));
        assert!(supports_response_files(ToolKind::Ar));
        assert!(supports_response_files(ToolKind::Strip));
        assert!(!supports_response_files(ToolKind::Cpp));
        assert!(!supports_response_files(ToolKind::Install));
    }
}
