//! Subprocess execution for the wrapped tool.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Output};

use crate::error::{BlightError, Result};

/// Builder for the real tool invocation a shim forwards to.
///
/// Unlike a build system driving its own subprocesses, a shim's wrapped
/// tool inherits stdin/stdout/stderr directly: its whole purpose is to be
/// invisible to whatever build system invoked it.
#[derive(Debug, Clone)]
pub struct ProcessBuilder {
    program: PathBuf,
    args: Vec<String>,
    env: Vec<(String, String)>,
    env_remove: Vec<String>,
    cwd: Option<PathBuf>,
}

impl ProcessBuilder {
    pub fn new(program: impl AsRef<Path>) -> Self {
        ProcessBuilder {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            env: Vec::new(),
            env_remove: Vec::new(),
            cwd: None,
        }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args.extend(
            args.into_iter()
                .map(|s| s.as_ref().to_string_lossy().into_owned()),
        );
        self
    }

    pub fn env(mut self, key: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        self.env
            .push((key.as_ref().to_string(), value.as_ref().to_string()));
        self
    }

    pub fn env_remove(mut self, key: impl AsRef<str>) -> Self {
        self.env_remove.push(key.as_ref().to_string());
        self
    }

    pub fn cwd(mut self, cwd: impl AsRef<Path>) -> Self {
        self.cwd = Some(cwd.as_ref().to_path_buf());
        self
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    fn build_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        for (key, value) in &self.env {
            cmd.env(key, value);
        }
        for key in &self.env_remove {
            cmd.env_remove(key);
        }
        if let Some(ref cwd) = self.cwd {
            cmd.current_dir(cwd);
        }
        cmd
    }

    /// Runs the wrapped tool to completion with inherited stdio, returning
    /// its exit status.
    pub fn status(&self) -> Result<ExitStatus> {
        let mut cmd = self.build_command();
        cmd.status().map_err(|e| {
            BlightError::SpawnFailed(self.program.display().to_string(), e)
        })
    }

    /// Runs the wrapped tool to completion with stdout/stderr captured
    /// rather than inherited, for callers that need to inspect output (the
    /// compiler-family probe) instead of letting the child talk directly to
    /// the build system's own stdio.
    pub fn output(&self) -> Result<Output> {
        let mut cmd = self.build_command();
        cmd.output()
            .map_err(|e| BlightError::SpawnFailed(self.program.display().to_string(), e))
    }

    pub fn display_command(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

/// Finds an executable on `PATH`, honoring the platform's usual search
/// rules (including `PATHEXT` on Windows) via the `which` crate.
pub fn find_executable(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}
