//! `estatus` builtin: print the last recorded exit status.

use bosun_parser::JobSpec;

use crate::context::ShellContext;
use crate::error::ShellResult;
use crate::executor::Flow;

pub(super) fn run(_job: JobSpec, ctx: &mut ShellContext) -> ShellResult<Flow> {
    println!("{}", ctx.last_status);
    Ok(Flow::Continue)
}
