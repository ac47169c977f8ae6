//! Error types for the engine.
//!
//! Only primitive-level failures (pipe/spawn/wait) are fatal; everything
//! else is reported at the prompt and the loop continues. A child's own
//! exec failure never appears here at all: it is reported at the spawn
//! site and recorded as that stage's exit code.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for engine operations.
pub type ShellResult<T> = Result<T, ShellError>;

#[derive(Debug, Error)]
pub enum ShellError {
    /// Pipe, wait, or signal primitive failed underneath us.
    #[error(transparent)]
    Hal(#[from] bosun_hal::HalError),
    /// Process creation failed for a reason other than the command itself
    /// (resource exhaustion, not command-not-found).
    #[error("failed to spawn `{program}`: {source}")]
    ProcessSpawn {
        program: String,
        source: std::io::Error,
    },
    /// The same path is named by two redirections of one stage.
    #[error("redirection targets collide on `{}`", .path.display())]
    RedirectionConflict { path: PathBuf },
    /// A redirection file could not be opened; the job did not run.
    #[error("cannot redirect `{}`: {source}", .path.display())]
    Redirection {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Background admission refused: the registry is at its cap.
    #[error("background job limit of {limit} reached")]
    JobLimitReached { limit: usize },
    /// `fg` target missing or the registry is empty.
    #[error("no such background job")]
    NoSuchJob,
    /// `cd` failed.
    #[error("cannot change directory to `{}`: {source}", .path.display())]
    Directory {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Bare `cd` with no HOME in the environment.
    #[error("HOME is not set")]
    HomeNotSet,
}

impl ShellError {
    /// Fatal errors terminate the shell; everything else re-prompts.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ShellError::Hal(_) | ShellError::ProcessSpawn { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_primitive_failures_are_fatal() {
        assert!(ShellError::Hal(bosun_hal::HalError::Pipe(nix_errno())).is_fatal());
        assert!(!ShellError::NoSuchJob.is_fatal());
        assert!(!ShellError::JobLimitReached { limit: 1 }.is_fatal());
        assert!(!ShellError::HomeNotSet.is_fatal());
    }

    fn nix_errno() -> nix::errno::Errno {
        nix::errno::Errno::EMFILE
    }
}
