//! Per-shell mutable state, threaded through every handler.

use std::num::NonZeroUsize;

use crate::registry::JobRegistry;

/// State owned by the main loop and passed by reference into dispatch,
/// the launcher, the reaper, and every builtin. Nothing here is global;
/// the only process-global state is the pair of signal flags in
/// `bosun_hal::signals`, which handlers must be able to reach.
#[derive(Debug, Default)]
pub struct ShellContext {
    /// Exit status of the most recent foreground wait, `fg` wait, or
    /// normally exited background reap. Initialized to 0.
    pub last_status: i32,
    /// Cap on concurrently tracked background jobs; `None` is unlimited.
    pub bg_limit: Option<NonZeroUsize>,
    /// In-flight background jobs, most recent first.
    pub jobs: JobRegistry,
}

impl ShellContext {
    pub fn new(bg_limit: Option<NonZeroUsize>) -> Self {
        Self {
            last_status: 0,
            bg_limit,
            jobs: JobRegistry::new(),
        }
    }
}
