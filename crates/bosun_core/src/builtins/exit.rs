//! `exit` builtin and the shared shutdown broadcast.

use bosun_hal::process;
use bosun_parser::JobSpec;
use tracing::warn;

use crate::context::ShellContext;
use crate::error::ShellResult;
use crate::executor::Flow;

pub(super) fn run(_job: JobSpec, ctx: &mut ShellContext) -> ShellResult<Flow> {
    shutdown(ctx);
    Ok(Flow::Exit)
}

/// Notify and signal every tracked background job, most recent first,
/// then drop its record. Best effort: the broadcast does not wait for
/// the processes to die, and a job that exited on its own since the last
/// drain merely fails the kill.
pub fn shutdown(ctx: &mut ShellContext) {
    for entry in ctx.jobs.drain() {
        println!("bosun: [{}] terminated: {}", entry.pid, entry.job.line);
        if let Err(err) = process::send_term(entry.pid) {
            warn!(pid = %entry.pid, %err, "could not signal job at shutdown");
        }
    }
}
