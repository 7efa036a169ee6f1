//! The `CC`/`CXX` compiler-driver tools: the richest tools in the model,
//! since a compiler driver's single invocation implicitly carries a
//! language, a standard, an optimization level, a set of defines, and a
//! stage it stops at.

use super::{HasCodeModel, HasDefines, HasLanguage, HasOpt, HasStandard, Invocation, SupportsResponseFiles};
use crate::args::{rindex, rindex_prefix};
use crate::enums::{CodeModel, Lang, OptLevel, Stage, Std, ToolKind, ToolchainFamily};
use crate::util::process::ProcessBuilder;
use std::path::PathBuf;

/// A `CC` or `CXX` invocation. Which one only matters for the language
/// default when no `-x` flag is present.
#[derive(Debug, Clone)]
pub struct Compiler {
    pub kind: ToolKind,
    pub invocation: Invocation,
}

impl Compiler {
    pub fn new(kind: ToolKind, invocation: Invocation) -> Self {
        debug_assert!(matches!(kind, ToolKind::Cc | ToolKind::Cxx));
        Compiler { kind, invocation }
    }

    pub fn args(&self) -> &[String] {
        &self.invocation.args
    }

    /// The compilation stage the driver will stop at, by presence of a
    /// stage-controlling flag (checked in the reference implementation's
    /// fixed order: `-v`/`-###` report but don't compile, `-E` stops after
    /// preprocessing, `-fsyntax-only` after parsing, `-S` after codegen,
    /// `-c` after assembly; absent all of these the driver runs every
    /// stage through linking).
    pub fn stage(&self) -> Stage {
        if self.args().is_empty() {
            return Stage::Unknown;
        }
        const STAGE_FLAGS: &[(&str, Stage)] = &[
            ("-v", Stage::Unknown),
            ("-###", Stage::Unknown),
            ("-E", Stage::Preprocess),
            ("-fsyntax-only", Stage::SyntaxOnly),
            ("-S", Stage::Assemble),
            ("-c", Stage::CompileObject),
        ];
        for (flag, stage) in STAGE_FLAGS {
            if self.args().iter().any(|a| a.as_str() == *flag) {
                return *stage;
            }
        }
        Stage::AllStages
    }

    /// Output paths. An explicit `-o` wins; otherwise the stage determines
    /// a conventional default: preprocessing writes to stdout, assembling
    /// and compiling derive a sibling file per input, and a full build
    /// falls back to `a.out`.
    pub fn outputs(&self) -> Vec<PathBuf> {
        if let Some(explicit) = self.invocation.explicit_output() {
            return vec![explicit];
        }
        match self.stage() {
            Stage::Preprocess => vec![PathBuf::from("-")],
            Stage::Assemble => self
                .invocation
                .inputs()
                .iter()
                .map(|p| p.with_extension("s"))
                .collect(),
            Stage::CompileObject => self
                .invocation
                .inputs()
                .iter()
                .map(|p| p.with_extension("o"))
                .collect(),
            Stage::AllStages => vec![PathBuf::from("a.out")],
            Stage::SyntaxOnly | Stage::Unknown => Vec::new(),
        }
    }

    /// Probes the wrapped executable's lineage by invoking it once with
    /// `-###` and inspecting stderr. Opt-in: nothing in this crate calls
    /// this automatically, since a frontend that treats `-###` as a real
    /// compile could have side effects. Only actions that explicitly want
    /// the toolchain family should call it.
    pub fn family(&self) -> ToolchainFamily {
        let Ok(output) = ProcessBuilder::new(&self.invocation.wrapped_tool)
            .args(["-###"])
            .cwd(&self.invocation.cwd)
            .output()
        else {
            return ToolchainFamily::Unknown;
        };
        let stderr = String::from_utf8_lossy(&output.stderr);
        ToolchainFamily::from_probe(&stderr, output.status.success())
    }
}

impl HasLanguage for Compiler {
    fn lang(&self) -> Lang {
        // Rightmost `-x LANG` or `-xLANG` wins; absent that, the driver's
        // own name picks the default.
        let mut found = None;
        for (i, arg) in self.args().iter().enumerate() {
            if arg == "-x" {
                if let Some(v) = self.args().get(i + 1) {
                    found = Some(v.as_str());
                }
            } else if let Some(rest) = arg.strip_prefix("-x") {
                if !rest.is_empty() {
                    found = Some(rest);
                }
            }
        }
        match found {
            Some("c") | Some("c-header") => Lang::C,
            Some("c++") | Some("c++-header") => Lang::Cxx,
            Some(_) => Lang::Unknown,
            None => match self.kind {
                ToolKind::Cc => Lang::C,
                ToolKind::Cxx => Lang::Cxx,
                _ => Lang::Unknown,
            },
        }
    }
}

impl HasStandard for Compiler {
    fn std(&self) -> Std {
        if rindex(&self.invocation.args, "-ansi").is_some() {
            return Std::ansi_for(self.lang());
        }
        match rindex_prefix(&self.invocation.args, "-std=") {
            Some(idx) => {
                let value = self.invocation.args[idx].trim_start_matches("-std=");
                Std::from_flag_value(value)
            }
            None => Std::default_for(self.lang()),
        }
    }
}

impl HasOpt for Compiler {
    fn opt(&self) -> OptLevel {
        for arg in self.args().iter().rev() {
            if let Some(level) = OptLevel::from_flag(arg) {
                return level;
            }
            if arg.starts_with("-O") && arg.len() > 2 {
                let rest = &arg[2..];
                if rest.chars().next().is_some_and(|c| c.is_ascii_digit() && c != '0')
                    && rest.chars().all(|c| c.is_ascii_digit())
                {
                    return OptLevel::O3;
                }
                return OptLevel::Unknown;
            }
        }
        OptLevel::O0
    }
}

impl HasDefines for Compiler {
    fn defines(&self) -> Vec<(String, String)> {
        compute_defines(self.args())
    }
}

impl HasCodeModel for Compiler {
    /// Absent `-mcmodel=`, the default is `Small`; `Unknown` is reserved for
    /// an `-mcmodel=` value that doesn't match a recognized suffix.
    fn code_model(&self) -> CodeModel {
        match rindex_prefix(&self.invocation.args, "-mcmodel=") {
            Some(idx) => {
                CodeModel::from_flag_value(self.invocation.args[idx].trim_start_matches("-mcmodel="))
            }
            None => CodeModel::Small,
        }
    }
}

impl SupportsResponseFiles for Compiler {}

/// Shared by [`Compiler`] and [`super::preprocessor::Preprocessor`]: builds
/// the define map honoring `-U` undefining a name defined earlier, where
/// "earlier" means at a lower argument index (the rightmost undefine of a
/// name wins against any define before it, but a define appearing after a
/// matching undefine survives).
pub fn compute_defines(args: &[String]) -> Vec<(String, String)> {
    let mut undefine_index: std::collections::HashMap<String, usize> = std::collections::HashMap::new();
    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        let name = if arg == "-U" {
            let v = args.get(i + 1).cloned();
            if v.is_some() {
                i += 1;
            }
            v
        } else {
            arg.strip_prefix("-U").map(|s| s.to_string())
        };
        if let Some(name) = name {
            undefine_index.insert(name, i);
        }
        i += 1;
    }

    let mut defines: Vec<(String, String, usize)> = Vec::new();
    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        let raw = if arg == "-D" {
            let v = args.get(i + 1).cloned();
            if v.is_some() {
                i += 1;
            }
            v
        } else {
            arg.strip_prefix("-D").map(|s| s.to_string())
        };
        if let Some(raw) = raw {
            let (name, value) = match raw.split_once('=') {
                Some((n, v)) => (n.to_string(), v.to_string()),
                None => (raw, "1".to_string()),
            };
            defines.push((name, value, i));
        }
        i += 1;
    }

    let mut result: Vec<(String, String)> = Vec::new();
    let mut seen = std::collections::HashSet::new();
    for (name, value, idx) in defines.into_iter().rev() {
        if seen.contains(&name) {
            continue;
        }
        if let Some(&u_idx) = undefine_index.get(&name) {
            if u_idx > idx {
                seen.insert(name);
                continue;
            }
        }
        seen.insert(name.clone());
        result.push((name, value));
    }
    result.reverse();
    result
}
