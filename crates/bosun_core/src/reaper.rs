//! Cooperative drain of terminated background children.
//!
//! The SIGCHLD handler (`bosun_hal::signals`) only sets a flag; the main
//! loop consumes it once per iteration and calls [`drain`]. Everything
//! observable — the lookup, the notice, the status update, releasing the
//! entry — happens here, on the main thread.

use bosun_hal::process::{self, WaitOutcome};
use tracing::debug;

use crate::context::ShellContext;
use crate::error::ShellResult;

/// Reap every terminated child, not just one: terminations coalesce into
/// a single flag set, so the loop keeps polling until the non-blocking
/// wait reports nothing left. Draining when nothing has terminated is a
/// no-op that changes neither the registry nor the status.
pub fn drain(ctx: &mut ShellContext) -> ShellResult<()> {
    while let Some((pid, outcome)) = process::try_wait_any()? {
        match ctx.jobs.remove(pid) {
            Some(entry) => {
                println!("bosun: [{}] done: {}", pid, entry.job.line);
                // A background job's normal exit updates status
                // visibility exactly like a foreground wait would;
                // signal deaths do not.
                if let WaitOutcome::Exited(code) = outcome {
                    ctx.last_status = code;
                }
                debug!(%pid, "reaped background job");
            }
            // A stage the launcher already waited on, or a child that was
            // never registered; nothing to look up or update.
            None => debug!(%pid, "reaped untracked child"),
        }
    }
    Ok(())
}
