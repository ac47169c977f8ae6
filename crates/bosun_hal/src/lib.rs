//! Thin wrappers over the POSIX process primitives bosun needs: pipe
//! pairs, blocking and non-blocking waits, termination signals, and the
//! signal flags consumed by the main loop.

#[cfg(not(unix))]
compile_error!("bosun implements POSIX process semantics and only builds on Unix");

pub mod error;
pub mod pipe;
pub mod process;
pub mod signals;

pub use error::{HalError, HalResult};
pub use process::Pid;
