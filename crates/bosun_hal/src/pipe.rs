//! Close-on-exec pipe pairs for wiring pipeline stages.

use std::os::fd::{FromRawFd, OwnedFd};

use nix::fcntl::OFlag;
use nix::unistd::pipe2;

use crate::error::{HalError, HalResult};

/// Create one unidirectional pipe, both ends owned and close-on-exec.
///
/// O_CLOEXEC is what keeps pipe ends from leaking across processes: a
/// child only inherits the end the launcher explicitly wires onto its
/// stdio (the dup clears the flag), and every other end closes at exec.
pub fn pair() -> HalResult<(OwnedFd, OwnedFd)> {
    let (read, write) = pipe2(OFlag::O_CLOEXEC).map_err(HalError::Pipe)?;
    // Safety: pipe2 returned two freshly created descriptors that nothing
    // else owns yet.
    unsafe { Ok((OwnedFd::from_raw_fd(read), OwnedFd::from_raw_fd(write))) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::{Read, Write};

    #[test]
    fn pair_round_trips_bytes_and_signals_eof() {
        let (read, write) = pair().expect("pipe");
        let mut writer = File::from(write);
        writer.write_all(b"ping").expect("write");
        drop(writer);
        let mut reader = File::from(read);
        let mut buf = String::new();
        reader.read_to_string(&mut buf).expect("read to eof");
        assert_eq!(buf, "ping");
    }
}
