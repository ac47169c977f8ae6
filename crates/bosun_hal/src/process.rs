//! Blocking and non-blocking child waits, plus best-effort termination.

use nix::errno::Errno;
use nix::sys::signal::{kill, Signal};
use nix::sys::wait::{waitpid, WaitPidFlag, WaitStatus};

use crate::error::{HalError, HalResult};

pub use nix::unistd::Pid;

/// How a child terminated: a normal exit code or a fatal signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    Exited(i32),
    Signaled(i32),
}

impl WaitOutcome {
    /// Shell-convention status: the exit code, or 128 + the signal number.
    pub fn status_code(self) -> i32 {
        match self {
            WaitOutcome::Exited(code) => code,
            WaitOutcome::Signaled(signal) => 128 + signal,
        }
    }
}

/// Block until `pid` terminates. Retries on EINTR.
pub fn wait_pid(pid: Pid) -> HalResult<WaitOutcome> {
    loop {
        match waitpid(pid, None) {
            Ok(WaitStatus::Exited(_, code)) => return Ok(WaitOutcome::Exited(code)),
            Ok(WaitStatus::Signaled(_, signal, _)) => {
                return Ok(WaitOutcome::Signaled(signal as i32))
            }
            // Not a termination; keep waiting.
            Ok(_) => continue,
            Err(Errno::EINTR) => continue,
            Err(errno) => return Err(HalError::Wait(errno)),
        }
    }
}

/// Non-blocking check for any terminated child.
///
/// `None` means no child has terminated yet, or there are no children at
/// all (ECHILD); both leave the caller with nothing to do.
pub fn try_wait_any() -> HalResult<Option<(Pid, WaitOutcome)>> {
    loop {
        match waitpid(Pid::from_raw(-1), Some(WaitPidFlag::WNOHANG)) {
            Ok(WaitStatus::Exited(pid, code)) => {
                return Ok(Some((pid, WaitOutcome::Exited(code))))
            }
            Ok(WaitStatus::Signaled(pid, signal, _)) => {
                return Ok(Some((pid, WaitOutcome::Signaled(signal as i32))))
            }
            Ok(WaitStatus::StillAlive) => return Ok(None),
            Ok(_) => continue,
            Err(Errno::ECHILD) => return Ok(None),
            Err(Errno::EINTR) => continue,
            Err(errno) => return Err(HalError::Wait(errno)),
        }
    }
}

/// Ask `pid` to terminate with SIGTERM.
pub fn send_term(pid: Pid) -> HalResult<()> {
    kill(pid, Signal::SIGTERM).map_err(|source| HalError::Kill {
        pid: pid.as_raw(),
        source,
    })
}
