//! `bglist` builtin: print tracked background jobs, most recent first.

use bosun_parser::JobSpec;

use crate::context::ShellContext;
use crate::error::ShellResult;
use crate::executor::Flow;

pub(super) fn run(_job: JobSpec, ctx: &mut ShellContext) -> ShellResult<Flow> {
    for entry in ctx.jobs.iter() {
        println!("[{}] {}", entry.pid, entry.job.line);
    }
    Ok(Flow::Continue)
}
