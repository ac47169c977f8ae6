//! Per-job routing: admission, builtins, single commands, pipelines.

use bosun_parser::JobSpec;
use tracing::debug;

use crate::builtins::{self, BuiltinKind};
use crate::context::ShellContext;
use crate::error::{ShellError, ShellResult};
use crate::pipeline;

/// Whether the prompt loop should keep running after a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Route one parsed job. Consumes the spec: a builtin handles it, a
/// foreground launch waits it out, or a background launch moves it into
/// the registry.
pub fn dispatch(job: JobSpec, ctx: &mut ShellContext) -> ShellResult<Flow> {
    // Admission precedes all routing.
    if job.background {
        if let Some(limit) = ctx.bg_limit {
            if ctx.jobs.len() >= limit.get() {
                return Err(ShellError::JobLimitReached { limit: limit.get() });
            }
        }
    }

    if job.stages.len() > 1 {
        debug!(stages = job.stages.len(), "dispatching pipeline");
        pipeline::launch(job, ctx)?;
        return Ok(Flow::Continue);
    }

    let kind = job
        .stages
        .first()
        .and_then(|stage| BuiltinKind::recognize(&stage.program));
    match kind {
        Some(kind) => builtins::run(kind, job, ctx),
        None => {
            pipeline::launch(job, ctx)?;
            Ok(Flow::Continue)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_are_recognized_case_sensitively() {
        assert_eq!(BuiltinKind::recognize("exit"), Some(BuiltinKind::Exit));
        assert_eq!(BuiltinKind::recognize("cd"), Some(BuiltinKind::Cd));
        assert_eq!(BuiltinKind::recognize("estatus"), Some(BuiltinKind::Estatus));
        assert_eq!(BuiltinKind::recognize("bglist"), Some(BuiltinKind::Bglist));
        assert_eq!(BuiltinKind::recognize("fg"), Some(BuiltinKind::Fg));
        assert_eq!(BuiltinKind::recognize("Exit"), None);
        assert_eq!(BuiltinKind::recognize("ls"), None);
    }
}
