//! The `INSTALL` tool: `install [options] source... dest`. The last bare
//! operand is the destination; everything before it is a source, unless
//! `-d` asks `install` to create directories instead of copying files, in
//! which case every operand is a destination directory and there are no
//! file inputs at all.
//!
//! An invocation with no bare operands at all - `install --help`,
//! `install --version` - has no inputs or outputs; that's not an error,
//! just an invocation this tool has nothing to record about.

use super::Invocation;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Install {
    pub invocation: Invocation,
}

impl Install {
    pub fn new(invocation: Invocation) -> Self {
        Install { invocation }
    }

    pub fn args(&self) -> &[String] {
        &self.invocation.args
    }

    /// Flags that take a separate value argument, which must not be
    /// mistaken for a bare operand.
    const VALUE_FLAGS: &'static [&'static str] = &["-f", "-g", "-m", "-o"];

    fn operands(&self) -> Vec<PathBuf> {
        let mut operands = Vec::new();
        let mut skip_next = false;
        for arg in self.args() {
            if skip_next {
                skip_next = false;
                continue;
            }
            if Self::VALUE_FLAGS.contains(&arg.as_str()) {
                skip_next = true;
                continue;
            }
            if arg.starts_with('-') {
                continue;
            }
            operands.push(PathBuf::from(arg));
        }
        operands
    }

    fn makes_directories(&self) -> bool {
        self.args().iter().any(|a| a == "-d" || a == "--directory")
    }

    /// Whether the trailing operand names an existing directory, resolved
    /// against `cwd` if relative. Determines whether every earlier operand
    /// is a source installed into that directory, or whether this is a
    /// plain single-source-to-single-dest copy.
    fn last_operand_is_directory(&self, operands: &[PathBuf]) -> bool {
        let Some(last) = operands.last() else {
            return false;
        };
        let resolved = if last.is_absolute() {
            last.clone()
        } else {
            self.invocation.cwd.join(last)
        };
        resolved.is_dir()
    }

    pub fn inputs(&self) -> Vec<PathBuf> {
        if self.makes_directories() {
            return Vec::new();
        }
        let operands = self.operands();
        if operands.len() < 2 {
            return Vec::new();
        }
        if self.last_operand_is_directory(&operands) {
            operands[..operands.len() - 1].to_vec()
        } else {
            vec![operands[0].clone()]
        }
    }

    pub fn outputs(&self) -> Vec<PathBuf> {
        let operands = self.operands();
        if self.makes_directories() {
            return operands;
        }
        match operands.len() {
            0 => Vec::new(),
            1 => operands,
            _ if self.last_operand_is_directory(&operands) => {
                vec![operands.last().unwrap().clone()]
            }
            _ => vec![operands[1].clone()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn install_in(cwd: &std::path::Path, args: &[&str]) -> Install {
        Install::new(Invocation::new(
            PathBuf::from("/usr/bin/install"),
            args.iter().map(|s| s.to_string()).collect(),
            cwd.to_path_buf(),
        ))
    }

    fn install(args: &[&str]) -> Install {
        install_in(&PathBuf::from("/tmp"), args)
    }

    #[test]
    fn copies_sources_into_existing_trailing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("bin");
        std::fs::create_dir(&dest).unwrap();

        let i = install_in(
            dir.path(),
            &["-m", "755", "a.out", "b.out", dest.to_str().unwrap()],
        );
        assert_eq!(
            i.inputs(),
            vec![PathBuf::from("a.out"), PathBuf::from("b.out")]
        );
        assert_eq!(i.outputs(), vec![dest.clone()]);
    }

    #[test]
    fn single_source_to_nonexistent_dest_is_a_file_copy() {
        let dir = tempfile::tempdir().unwrap();
        let i = install_in(dir.path(), &["-m", "755", "a.out", "b.out"]);
        assert_eq!(i.inputs(), vec![PathBuf::from("a.out")]);
        assert_eq!(i.outputs(), vec![PathBuf::from("b.out")]);
    }

    #[test]
    fn value_flag_f_consumes_its_argument() {
        let dir = tempfile::tempdir().unwrap();
        let i = install_in(dir.path(), &["-f", "context_t", "a.out", "b.out"]);
        assert_eq!(i.inputs(), vec![PathBuf::from("a.out")]);
        assert_eq!(i.outputs(), vec![PathBuf::from("b.out")]);
    }

    #[test]
    fn directory_mode_has_no_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("include/foo");
        let i = install_in(dir.path(), &["-d", target.to_str().unwrap()]);
        assert!(i.inputs().is_empty());
        assert_eq!(i.outputs(), vec![target]);
    }

    #[test]
    fn help_invocation_has_no_operands() {
        let i = install(&["--help"]);
        assert!(i.inputs().is_empty());
        assert!(i.outputs().is_empty());
    }
}
