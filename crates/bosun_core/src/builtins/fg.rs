//! `fg [pid]` builtin: bring a background job to the foreground.
//!
//! Without an argument the most recently started job is selected; with
//! one, the job with that pid. The entry leaves the registry before the
//! wait — ownership returns to the wait path, and the record is released
//! when this handler returns.

use bosun_hal::{process, Pid};
use bosun_parser::JobSpec;

use crate::context::ShellContext;
use crate::error::{ShellError, ShellResult};
use crate::executor::Flow;

pub(super) fn run(job: JobSpec, ctx: &mut ShellContext) -> ShellResult<Flow> {
    if ctx.jobs.is_empty() {
        return Err(ShellError::NoSuchJob);
    }
    let entry = match job.stages.first().and_then(|stage| stage.args.first()) {
        None => match ctx.jobs.take_most_recent() {
            Some(entry) => entry,
            None => return Err(ShellError::NoSuchJob),
        },
        Some(arg) => {
            let pid = arg.parse::<i32>().map_err(|_| ShellError::NoSuchJob)?;
            ctx.jobs
                .remove(Pid::from_raw(pid))
                .ok_or(ShellError::NoSuchJob)?
        }
    };
    println!("{}", entry.job.line);
    // If the wait itself fails the process is gone either way; the entry
    // stays removed and the failure reads as a lookup error.
    let outcome = process::wait_pid(entry.pid).map_err(|_| ShellError::NoSuchJob)?;
    ctx.last_status = outcome.status_code();
    Ok(Flow::Continue)
}
