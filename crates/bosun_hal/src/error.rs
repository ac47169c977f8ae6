//! Error types for the HAL layer.

use nix::errno::Errno;
use thiserror::Error;

/// Result type for HAL operations.
pub type HalResult<T> = Result<T, HalError>;

/// Failures of the underlying process primitives.
///
/// Apart from [`HalError::Kill`], which shutdown treats as best-effort,
/// every variant is fatal to the shell: a broken pipe or wait channel
/// cannot be recovered without leaking descriptors or processes.
#[derive(Debug, Error)]
pub enum HalError {
    #[error("pipe creation failed: {0}")]
    Pipe(#[source] Errno),
    #[error("wait failed: {0}")]
    Wait(#[source] Errno),
    #[error("installing signal handler failed: {0}")]
    Signal(#[source] Errno),
    #[error("signalling pid {pid} failed: {source}")]
    Kill { pid: i32, source: Errno },
}
