//! The closed error taxonomy for blight's core.
//!
//! Configuration and build errors are fatal: the dispatcher prints them and
//! exits 1. I/O and parse errors inside actions are never propagated this
//! way - they're logged at debug and the action degrades gracefully, per the
//! propagation policy.

use thiserror::Error;

/// A fatal error that terminates the shim process.
#[derive(Debug, Error)]
pub enum BlightError {
    #[error("unknown blight wrapper requested: {0}")]
    UnknownShim(String),

    #[error("unknown action: {0}")]
    UnknownAction(String),

    #[error("no wrapped tool found for {0}")]
    NoWrappedTool(String),

    #[error("{0} exited with status code {1}")]
    BuildFailed(String, i32),

    #[error("failed to spawn {0}: {1}")]
    SpawnFailed(String, std::io::Error),
}

pub type Result<T> = std::result::Result<T, BlightError>;
