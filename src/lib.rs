//! blight - a transparent interposer for C/C++ build-toolchain programs.
//!
//! A build system is induced to invoke one of this crate's shim binaries in
//! place of the real compiler, linker, assembler, archiver, stripper, or
//! installer. The shim parses the invocation, runs a configurable chain of
//! pre/post actions, forwards the (possibly edited) arguments to the real
//! tool, and optionally journals the result.

pub mod action;
pub mod args;
pub mod constants;
pub mod dispatch;
pub mod enums;
pub mod error;
pub mod journal;
pub mod tool;
pub mod util;

pub use dispatch::run_shim;
pub use error::BlightError;
