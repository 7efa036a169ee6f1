//! The `LD` linker tool.

use super::{HasLinkSearch, Invocation, SupportsResponseFiles};
use crate::args::rindex_prefix;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Linker {
    pub invocation: Invocation,
}

impl Linker {
    pub fn new(invocation: Invocation) -> Self {
        Linker { invocation }
    }

    pub fn args(&self) -> &[String] {
        &self.invocation.args
    }

    /// An explicit `-o`/`--output`/`--output=PATH` wins; absent that, the
    /// conventional `a.out` fallback applies.
    pub fn outputs(&self) -> Vec<PathBuf> {
        if let Some(explicit) = self.invocation.explicit_output() {
            return vec![explicit];
        }
        if let Some(idx) = rindex_prefix(&self.invocation.args, "--output") {
            let arg = &self.invocation.args[idx];
            if let Some(value) = arg.strip_prefix("--output=") {
                return vec![PathBuf::from(value)];
            }
            if arg == "--output" {
                if let Some(value) = self.invocation.args.get(idx + 1) {
                    return vec![PathBuf::from(value)];
                }
            }
        }
        vec![PathBuf::from("a.out")]
    }
}

/// Matches `short`/`short VALUE` (glued or separate, e.g. `-L`/`-LPATH`) and
/// `long`/`long=VALUE`/`long VALUE` (e.g. `--library-path`/
/// `--library-path=PATH`), in argument order.
fn collect_short_or_long(args: &[String], short: &str, long: &str) -> Vec<String> {
    let mut values = Vec::new();
    let long_eq = format!("{long}=");
    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        if arg == short || arg == long {
            if let Some(v) = args.get(i + 1) {
                values.push(v.clone());
                i += 1;
            }
        } else if let Some(rest) = arg.strip_prefix(&long_eq) {
            values.push(rest.to_string());
        } else if let Some(rest) = arg.strip_prefix(short) {
            if !rest.is_empty() {
                values.push(rest.to_string());
            }
        }
        i += 1;
    }
    values
}

impl HasLinkSearch for Linker {
    fn link_search_paths(&self) -> Vec<PathBuf> {
        collect_short_or_long(self.args(), "-L", "--library-path")
            .into_iter()
            .map(PathBuf::from)
            .collect()
    }

    fn link_libraries(&self) -> Vec<String> {
        collect_short_or_long(self.args(), "-l", "--library")
            .into_iter()
            .map(|name| format!("lib{name}"))
            .collect()
    }
}

impl SupportsResponseFiles for Linker {}
