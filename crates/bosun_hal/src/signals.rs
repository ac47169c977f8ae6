//! Process-global signal flags.
//!
//! The handlers do exactly one thing: store into an atomic. No
//! allocation, no I/O, no locks. Lookup, printing, and registry mutation
//! all happen later, on the main thread, when the loop consumes a flag.
//! Each flag has a single writer (its handler) and a single reader (the
//! loop); `swap(false)` consumes it so a termination arriving mid-drain
//! re-arms the next iteration instead of getting lost.

use std::os::raw::c_int;
use std::sync::atomic::{AtomicBool, Ordering};

use nix::sys::signal::{sigaction, SaFlags, SigAction, SigHandler, SigSet, Signal};

use crate::error::{HalError, HalResult};

static CHILD_TERMINATED: AtomicBool = AtomicBool::new(false);
static TIMESTAMP_REQUESTED: AtomicBool = AtomicBool::new(false);

extern "C" fn on_sigchld(_signal: c_int) {
    CHILD_TERMINATED.store(true, Ordering::SeqCst);
}

extern "C" fn on_sigusr2(_signal: c_int) {
    TIMESTAMP_REQUESTED.store(true, Ordering::SeqCst);
}

/// Install the SIGCHLD and SIGUSR2 handlers.
///
/// SA_RESTART keeps the line editor's blocking read from failing with
/// EINTR when a background child terminates mid-prompt.
pub fn install() -> HalResult<()> {
    let chld = SigAction::new(
        SigHandler::Handler(on_sigchld),
        SaFlags::SA_RESTART,
        SigSet::empty(),
    );
    let usr2 = SigAction::new(
        SigHandler::Handler(on_sigusr2),
        SaFlags::SA_RESTART,
        SigSet::empty(),
    );
    // Safety: both handlers are async-signal-safe (a single atomic store).
    unsafe {
        sigaction(Signal::SIGCHLD, &chld).map_err(HalError::Signal)?;
        sigaction(Signal::SIGUSR2, &usr2).map_err(HalError::Signal)?;
    }
    Ok(())
}

/// Consume the child-termination flag, returning whether it was set.
pub fn take_child_terminated() -> bool {
    CHILD_TERMINATED.swap(false, Ordering::SeqCst)
}

/// Consume the SIGUSR2 timestamp-request flag.
pub fn take_timestamp_requested() -> bool {
    TIMESTAMP_REQUESTED.swap(false, Ordering::SeqCst)
}
