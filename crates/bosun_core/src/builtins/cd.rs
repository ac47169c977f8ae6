//! `cd [path]` builtin. Bare `cd` goes to `$HOME`; success prints the
//! new working directory. Never exits the shell.

use std::env;
use std::path::PathBuf;

use bosun_parser::JobSpec;

use crate::context::ShellContext;
use crate::error::{ShellError, ShellResult};
use crate::executor::Flow;

pub(super) fn run(job: JobSpec, _ctx: &mut ShellContext) -> ShellResult<Flow> {
    let target = match job.stages.first().and_then(|stage| stage.args.first()) {
        Some(arg) => PathBuf::from(arg),
        None => env::var_os("HOME")
            .map(PathBuf::from)
            .ok_or(ShellError::HomeNotSet)?,
    };
    env::set_current_dir(&target).map_err(|source| ShellError::Directory {
        path: target.clone(),
        source,
    })?;
    let cwd = env::current_dir().map_err(|source| ShellError::Directory {
        path: target,
        source,
    })?;
    println!("{}", cwd.display());
    Ok(Flow::Continue)
}
