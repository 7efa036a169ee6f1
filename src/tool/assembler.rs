//! The `AS` assembler tool. It carries no language/standard/opt notion of
//! its own - it only ever sees `.s`/`.S` input - but does expand response
//! files like the compiler and linker.

use super::{Invocation, SupportsResponseFiles};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Assembler {
    pub invocation: Invocation,
}

impl Assembler {
    pub fn new(invocation: Invocation) -> Self {
        Assembler { invocation }
    }

    pub fn args(&self) -> &[String] {
        &self.invocation.args
    }

    pub fn outputs(&self) -> Vec<PathBuf> {
        if let Some(explicit) = self.invocation.explicit_output() {
            return vec![explicit];
        }
        self.invocation
            .inputs()
            .iter()
            .map(|p| p.with_extension("o"))
            .collect()
    }
}

impl SupportsResponseFiles for Assembler {}
