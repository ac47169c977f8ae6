//! Shell builtins: `exit`, `cd`, `estatus`, `bglist`, `fg`.
//!
//! Builtins only apply to single-stage jobs; inside a pipeline these
//! names are ordinary commands. Each handler consumes the job it was
//! dispatched with.

mod bglist;
mod cd;
mod estatus;
mod exit;
mod fg;

pub use exit::shutdown;

use bosun_parser::JobSpec;

use crate::context::ShellContext;
use crate::error::ShellResult;
use crate::executor::Flow;

/// Commands handled inside the shell. Names are case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinKind {
    Exit,
    Cd,
    Estatus,
    Bglist,
    Fg,
}

impl BuiltinKind {
    pub fn recognize(name: &str) -> Option<Self> {
        match name {
            "exit" => Some(Self::Exit),
            "cd" => Some(Self::Cd),
            "estatus" => Some(Self::Estatus),
            "bglist" => Some(Self::Bglist),
            "fg" => Some(Self::Fg),
            _ => None,
        }
    }
}

/// Run a builtin decided once by the dispatcher.
pub fn run(kind: BuiltinKind, job: JobSpec, ctx: &mut ShellContext) -> ShellResult<Flow> {
    match kind {
        BuiltinKind::Exit => exit::run(job, ctx),
        BuiltinKind::Cd => cd::run(job, ctx),
        BuiltinKind::Estatus => estatus::run(job, ctx),
        BuiltinKind::Bglist => bglist::run(job, ctx),
        BuiltinKind::Fg => fg::run(job, ctx),
    }
}
