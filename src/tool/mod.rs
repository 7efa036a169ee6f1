//! The wrapped-tool model: a parsed view over the argument list a build
//! system handed to a shim, plus the capability traits each tool kind
//! selectively implements.

pub mod archiver;
pub mod assembler;
pub mod compiler;
pub mod install;
pub mod linker;
pub mod preprocessor;
pub mod stripper;

pub use archiver::Archiver;
pub use assembler::Assembler;
pub use compiler::Compiler;
pub use install::Install;
pub use linker::Linker;
pub use preprocessor::Preprocessor;
pub use stripper::Stripper;

use crate::enums::{CodeModel, InputKind, Lang, OutputKind, Std};
use std::path::{Path, PathBuf};

/// The invocation state every tool kind shares: the real executable to
/// forward to, the argument list (already response-file-expanded), and the
/// working directory the build system invoked the shim from.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub wrapped_tool: PathBuf,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl Invocation {
    pub fn new(wrapped_tool: PathBuf, args: Vec<String>, cwd: PathBuf) -> Self {
        Invocation {
            wrapped_tool,
            args,
            cwd,
        }
    }

    /// Input paths: every non-flag argument that exists relative to `cwd`,
    /// excluding the argument immediately following `-o`/`-aux-info` (which
    /// names an output, not an input) and excluding a bare `-` (stdin).
    pub fn inputs(&self) -> Vec<PathBuf> {
        let mut inputs = Vec::new();
        let mut skip_next = false;
        for arg in &self.args {
            if skip_next {
                skip_next = false;
                continue;
            }
            if arg == "-o" || arg == "-aux-info" {
                skip_next = true;
                continue;
            }
            if arg == "-" {
                continue;
            }
            if arg.starts_with('-') || arg.starts_with('@') {
                continue;
            }
            let path = Path::new(arg);
            let resolved = if path.is_absolute() {
                path.to_path_buf()
            } else {
                self.cwd.join(path)
            };
            if resolved.exists() {
                inputs.push(PathBuf::from(arg));
            }
        }
        inputs
    }

    /// The rightmost `-o`/`-oPATH` argument's value, if any.
    pub fn explicit_output(&self) -> Option<PathBuf> {
        let mut i = self.args.len();
        while i > 0 {
            i -= 1;
            let arg = &self.args[i];
            if arg == "-o" {
                return self.args.get(i + 1).map(PathBuf::from);
            }
            if let Some(rest) = arg.strip_prefix("-o") {
                if !rest.is_empty() {
                    return Some(PathBuf::from(rest));
                }
            }
        }
        None
    }
}

/// A tool whose language can be determined from a `-x` flag (compilers and
/// the preprocessor).
pub trait HasLanguage {
    fn lang(&self) -> Lang;
}

/// A tool whose language standard can be determined from `-std=`/`-ansi`.
pub trait HasStandard: HasLanguage {
    fn std(&self) -> Std;
}

/// A tool whose optimization level can be determined from `-O...`.
pub trait HasOpt {
    fn opt(&self) -> crate::enums::OptLevel;
}

/// A tool whose preprocessor defines/undefines can be enumerated.
pub trait HasDefines {
    /// Macro name -> value (default `"1"` for a valueless `-D`), excluding
    /// any macro a later `-U` of the same name undefines.
    fn defines(&self) -> Vec<(String, String)>;
}

/// A tool whose target code model can be determined from `-mcmodel=`.
pub trait HasCodeModel {
    fn code_model(&self) -> CodeModel;
}

/// A tool that accepts `@file` response-file expansion.
pub trait SupportsResponseFiles {}

/// A tool that accepts `-L`/`-l` link-search flags.
pub trait HasLinkSearch {
    fn link_search_paths(&self) -> Vec<PathBuf>;
    fn link_libraries(&self) -> Vec<String>;
}

/// Classifies a path by its suffix, independent of whether it names an
/// input or output (callers pick the table that matches their context).
pub fn classify_output_path(path: &Path) -> OutputKind {
    crate::constants::classify_output(&path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default())
}

pub fn classify_input_path(path: &Path) -> InputKind {
    crate::constants::classify_input(&path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inv(args: &[&str], existing: &[&str], cwd: &Path) -> Invocation {
        for f in existing {
            std::fs::write(cwd.join(f), b"").unwrap();
        }
        Invocation::new(
            PathBuf::from("/usr/bin/gcc"),
            args.iter().map(|s| s.to_string()).collect(),
            cwd.to_path_buf(),
        )
    }

    #[test]
    fn inputs_excludes_flags_and_output_value() {
        let dir = tempfile::tempdir().unwrap();
        let i = inv(
            &["-c", "main.c", "-o", "main.o", "-Wall"],
            &["main.c"],
            dir.path(),
        );
        assert_eq!(i.inputs(), vec![PathBuf::from("main.c")]);
    }

    #[test]
    fn inputs_excludes_nonexistent_paths() {
        let dir = tempfile::tempdir().unwrap();
        let i = inv(&["-c", "missing.c"], &[], dir.path());
        assert!(i.inputs().is_empty());
    }

    #[test]
    fn explicit_output_prefers_rightmost() {
        let dir = tempfile::tempdir().unwrap();
        let i = inv(&["-o", "a.o", "-o", "b.o"], &[], dir.path());
        assert_eq!(i.explicit_output(), Some(PathBuf::from("b.o")));
    }

    #[test]
    fn explicit_output_handles_glued_form() {
        let dir = tempfile::tempdir().unwrap();
        let i = inv(&["-oout.bin"], &[], dir.path());
        assert_eq!(i.explicit_output(), Some(PathBuf::from("out.bin")));
    }
}
