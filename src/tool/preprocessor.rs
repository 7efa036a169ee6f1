//! The `CPP` standalone-preprocessor tool. Unlike `CC`/`CXX`, it has no
//! notion of optimization level or compilation stage, and (per the
//! reference implementation) doesn't expand response files - a bare
//! preprocessor invocation is short enough that build systems rarely
//! resort to one.

use super::compiler::compute_defines;
use super::{HasDefines, HasLanguage, HasStandard, Invocation};
use crate::args::{rindex, rindex_prefix};
use crate::enums::{Lang, Std};

#[derive(Debug, Clone)]
pub struct Preprocessor {
    pub invocation: Invocation,
}

impl Preprocessor {
    pub fn new(invocation: Invocation) -> Self {
        Preprocessor { invocation }
    }

    pub fn args(&self) -> &[String] {
        &self.invocation.args
    }
}

impl HasLanguage for Preprocessor {
    fn lang(&self) -> Lang {
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
            _ => Lang::Unknown,
        }
    }
}

impl HasStandard for Preprocessor {
    fn std(&self) -> Std {
        if rindex(&self.invocation.args, "-ansi").is_some() {
            return Std::ansi_for(self.lang());
        }
        match rindex_prefix(&self.invocation.args, "-std=") {
            Some(idx) => Std::from_flag_value(self.invocation.args[idx].trim_start_matches("-std=")),
            None => Std::default_for(self.lang()),
        }
    }
}

impl HasDefines for Preprocessor {
    fn defines(&self) -> Vec<(String, String)> {
        compute_defines(self.args())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn lang_defaults_to_unknown_without_dash_x() {
        let p = Preprocessor::new(Invocation::new(
            PathBuf::from("/usr/bin/cpp"),
            vec!["a.c".to_string()],
            PathBuf::from("/tmp"),
        ));
        assert_eq!(p.lang(), Lang::Unknown);
    }
}
