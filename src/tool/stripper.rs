//! The `STRIP` tool. Ordinarily strips its operands in place, so the same
//! paths are both input and output; an explicit `-o` redirects the result
//! to a new file instead.

use super::Invocation;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Stripper {
    pub invocation: Invocation,
}

impl Stripper {
    pub fn new(invocation: Invocation) -> Self {
        Stripper { invocation }
    }

    pub fn args(&self) -> &[String] {
        &self.invocation.args
    }

    fn operands(&self) -> Vec<PathBuf> {
        self.args()
            .iter()
            .filter(|a| !a.starts_with('-'))
            .map(PathBuf::from)
            .collect()
    }

    pub fn inputs(&self) -> Vec<PathBuf> {
        self.operands()
    }

    pub fn outputs(&self) -> Vec<PathBuf> {
        if let Some(explicit) = self.invocation.explicit_output() {
            return vec![explicit];
        }
        self.operands()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_in_place_by_default() {
        let s = Stripper::new(Invocation::new(
            PathBuf::from("/usr/bin/strip"),
            vec!["-s".to_string(), "a.out".to_string()],
            PathBuf::from("/tmp"),
        ));
        assert_eq!(s.inputs(), vec![PathBuf::from("a.out")]);
        assert_eq!(s.outputs(), vec![PathBuf::from("a.out")]);
    }

    #[test]
    fn explicit_output_redirects() {
        let s = Stripper::new(Invocation::new(
            PathBuf::from("/usr/bin/strip"),
            vec!["a.out".to_string(), "-o".to_string(), "a.stripped".to_string()],
            PathBuf::from("/tmp"),
        ));
        assert_eq!(s.outputs(), vec![PathBuf::from("a.stripped")]);
    }
}
