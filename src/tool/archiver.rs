//! The `AR` archiver tool.
//!
//! `ar`'s argument grammar is positional rather than flag-keyed: after the
//! operation (a short option cluster like `rcs`, optionally `--` separated
//! long options), the first bare operand names the archive and every
//! operand after it names a member to add, extract, or delete.

use super::Invocation;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Archiver {
    pub invocation: Invocation,
}

impl Archiver {
    pub fn new(invocation: Invocation) -> Self {
        Archiver { invocation }
    }

    pub fn args(&self) -> &[String] {
        &self.invocation.args
    }

    fn operands(&self) -> Vec<&str> {
        self.args()
            .iter()
            .filter(|a| !a.starts_with('-'))
            .map(|s| s.as_str())
            .collect()
    }

    /// The index, among bare operands, of the archive path: the first
    /// operand whose suffix is `.a`, scanning left to right (not
    /// unconditionally the first operand - archiver invocations can name
    /// other paths, such as a thin-archive member, ahead of the archive
    /// itself).
    fn archive_index(&self) -> Option<usize> {
        self.operands().iter().position(|a| {
            std::path::Path::new(a)
                .extension()
                .map(|e| e == "a")
                .unwrap_or(false)
        })
    }

    /// The archive path: the first bare operand whose suffix is `.a`.
    pub fn outputs(&self) -> Vec<PathBuf> {
        match self.archive_index() {
            Some(idx) => vec![PathBuf::from(self.operands()[idx])],
            None => Vec::new(),
        }
    }

    /// The member files: every bare operand other than the archive path
    /// that exists relative to the working directory (archives under
    /// construction don't exist yet, so this naturally excludes them when
    /// building but includes the archive itself when it's an input to an
    /// extract/list operation).
    pub fn inputs(&self) -> Vec<PathBuf> {
        let archive_idx = self.archive_index();
        self.operands()
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != archive_idx)
            .filter_map(|(_, a)| {
                let p = PathBuf::from(a);
                let resolved = if p.is_absolute() {
                    p.clone()
                } else {
                    self.invocation.cwd.join(&p)
                };
                resolved.exists().then_some(p)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_is_first_operand() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.o"), b"").unwrap();
        let ar = Archiver::new(Invocation::new(
            PathBuf::from("/usr/bin/ar"),
            vec!["rcs".to_string(), "libfoo.a".to_string(), "a.o".to_string()],
            dir.path().to_path_buf(),
        ));
        assert_eq!(ar.outputs(), vec![PathBuf::from("libfoo.a")]);
        assert_eq!(ar.inputs(), vec![PathBuf::from("a.o")]);
    }

    #[test]
    fn archive_path_found_even_when_not_the_first_operand() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("foo.o"), b"").unwrap();
        let ar = Archiver::new(Invocation::new(
            PathBuf::from("/usr/bin/ar"),
            vec![
                "rcs".to_string(),
                "foo.o".to_string(),
                "libbar.a".to_string(),
            ],
            dir.path().to_path_buf(),
        ));
        assert_eq!(ar.outputs(), vec![PathBuf::from("libbar.a")]);
        assert_eq!(ar.inputs(), vec![PathBuf::from("foo.o")]);
    }
}
