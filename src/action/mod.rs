//! The action framework: a configurable chain of before/after hooks that
//! run around the wrapped-tool invocation. Actions are selected at runtime
//! by name (`BLIGHT_ACTIONS`, colon-separated) and configured from their
//! own `BLIGHT_ACTION_<NAME>` environment variable.

pub mod benchmark;
pub mod cc_for_cxx;
pub mod demo;
pub mod embed_bitcode;
pub mod embed_commands;
pub mod find_inputs;
pub mod find_outputs;
pub mod ignore_flags;
pub mod ignore_flto;
pub mod ignore_werror;
pub mod inject_flags;
pub mod lint;
pub mod record;
pub mod skip_strip;

use crate::enums::ToolKind;
use crate::error::{BlightError, Result};
use std::collections::HashMap;

/// Per-action configuration, parsed from `BLIGHT_ACTION_<NAME>` as
/// shell-quoted `key=value` tokens.
pub type ActionConfig = HashMap<String, String>;

/// Whether an action's `before_run` hook asked the dispatcher to skip
/// actually invoking the wrapped tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreRunOutcome {
    Continue,
    Skip,
}

/// A unit of behavior that runs immediately before and/or after the
/// wrapped tool executes. Implementations only need to override the hooks
/// they care about; the dispatcher calls both unconditionally and lets the
/// action decide internally whether it applies to the current tool kind
/// (mirroring the per-kind `Action` subclasses of the reference
/// implementation, collapsed into one trait with an explicit kind mask).
pub trait Action: std::fmt::Debug {
    /// The name this action is registered under in `BLIGHT_ACTIONS`, also
    /// used to key its contribution to the journaled `action_results` map.
    fn name(&self) -> &'static str;

    /// The tool kinds this action applies to. The dispatcher skips both
    /// hooks entirely for any other kind.
    fn applies_to(&self) -> &'static [ToolKind];

    /// Runs before the wrapped tool. May mutate `ctx.args` and may request
    /// that the run be skipped entirely.
    fn before_run(&self, _ctx: &mut ActionContext) -> Result<PreRunOutcome> {
        Ok(PreRunOutcome::Continue)
    }

    /// Runs after the wrapped tool (or after it was skipped, with
    /// `run_skipped` set). The returned value, if any, is folded into the
    /// invocation's `action_results` map under this action's name when
    /// `BLIGHT_JOURNAL_PATH` is set.
    fn after_run(&self, _ctx: &ActionContext, _run_skipped: bool) -> Result<Option<serde_json::Value>> {
        Ok(None)
    }
}

/// The mutable state an action chain operates over: the tool kind, the
/// argument list the wrapped tool will actually be invoked with, the
/// working directory, and this action's own configuration.
pub struct ActionContext<'a> {
    pub kind: ToolKind,
    pub args: &'a mut Vec<String>,
    pub cwd: &'a std::path::Path,
    pub config: &'a ActionConfig,
}

/// Parses `BLIGHT_ACTIONS` (colon-separated action names) into boxed
/// [`Action`] trait objects, reading each action's `BLIGHT_ACTION_<NAME>`
/// configuration from the environment.
pub fn load_actions_from_env() -> Result<Vec<Box<dyn Action>>> {
    let Ok(names) = std::env::var("BLIGHT_ACTIONS") else {
        return Ok(Vec::new());
    };
    let mut actions = Vec::new();
    for name in dedup_names(&names) {
        let config = load_action_config(name);
        actions.push(build_action(name, config)?);
    }
    Ok(actions)
}

/// Splits `BLIGHT_ACTIONS` on `:`, dropping empty segments and any name
/// already seen, preserving first-seen order.
fn dedup_names(names: &str) -> Vec<&str> {
    let mut seen = std::collections::HashSet::new();
    names
        .split(':')
        .filter(|s| !s.is_empty())
        .filter(|name| seen.insert(*name))
        .collect()
}

fn load_action_config(name: &str) -> ActionConfig {
    let env_key = format!("BLIGHT_ACTION_{}", name.to_uppercase());
    let Ok(raw) = std::env::var(&env_key) else {
        return ActionConfig::new();
    };
    let Ok(tokens) = shell_words::split(&raw) else {
        return ActionConfig::new();
    };
    tokens
        .into_iter()
        .filter_map(|t| t.split_once('=').map(|(k, v)| (k.to_string(), v.to_string())))
        .collect()
}

fn build_action(name: &str, config: ActionConfig) -> Result<Box<dyn Action>> {
    match name {
        "InjectFlags" => Ok(Box::new(inject_flags::InjectFlags::new(config))),
        "IgnoreFlags" => Ok(Box::new(ignore_flags::IgnoreFlags::new(config))),
        "IgnoreWerror" => Ok(Box::new(ignore_werror::IgnoreWerror)),
        "IgnoreFlto" => Ok(Box::new(ignore_flto::IgnoreFlto)),
        "CCForCXX" => Ok(Box::new(cc_for_cxx::CCForCXX)),
        "Lint" => Ok(Box::new(lint::Lint)),
        "SkipStrip" => Ok(Box::new(skip_strip::SkipStrip)),
        "Record" => Ok(Box::new(record::Record::new(config))),
        "Benchmark" => Ok(Box::new(benchmark::Benchmark::new(config))),
        "FindInputs" => Ok(Box::new(find_inputs::FindInputs::new(config))),
        "FindOutputs" => Ok(Box::new(find_outputs::FindOutputs::new(config))),
        "EmbedCommands" => Ok(Box::new(embed_commands::EmbedCommands::new(config))),
        "EmbedBitcode" => Ok(Box::new(embed_bitcode::EmbedBitcode)),
        "Demo" => Ok(Box::new(demo::Demo)),
        other => Err(BlightError::UnknownAction(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedup_names_preserves_first_seen_order() {
        assert_eq!(
            dedup_names("Record:Record:Benchmark:Record"),
            vec!["Record", "Benchmark"]
        );
        assert_eq!(dedup_names("Record::Benchmark"), vec!["Record", "Benchmark"]);
    }

    #[test]
    fn unknown_action_name_errors() {
        let err = build_action("NotARealAction", ActionConfig::new());
        assert!(matches!(err, Err(BlightError::UnknownAction(_))));
    }

    #[test]
    fn known_action_names_build() {
        for name in [
            "IgnoreWerror",
            "IgnoreFlto",
            "CCForCXX",
            "Lint",
            "SkipStrip",
            "EmbedBitcode",
            "Demo",
        ] {
            assert!(build_action(name, ActionConfig::new()).is_ok());
        }
    }
}
