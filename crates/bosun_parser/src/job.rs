//! Job description produced by the parser: pure data, no behavior.

use std::path::PathBuf;

/// One pipeline stage: a program, its arguments, and an optional
/// per-stage standard error redirection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessSpec {
    pub program: String,
    /// Arguments after the program name.
    pub args: Vec<String>,
    /// Per-stage standard error redirection target (`2> path`).
    pub stderr_path: Option<PathBuf>,
}

/// One parsed user request: a pipeline of stages, whole-job redirections,
/// and the background flag.
///
/// A `JobSpec` is moved, never cloned, between the dispatcher, the
/// launcher, and the registry; whichever component holds it owns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSpec {
    /// Left to right is execution and pipe-connection order; never empty.
    pub stages: Vec<ProcessSpec>,
    /// Whole-job input redirection, applied to the first stage.
    pub stdin_path: Option<PathBuf>,
    /// Whole-job output redirection, applied to the last stage.
    pub stdout_path: Option<PathBuf>,
    /// Run without blocking the prompt loop.
    pub background: bool,
    /// The input line as typed, kept verbatim for status and listing
    /// messages (including any trailing `&`).
    pub line: String,
}
