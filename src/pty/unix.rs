//! Unix PTY implementation
//!
//! Allocates the master side using POSIX APIs and performs raw, blocking
//! I/O on it.

use std::os::unix::io::AsRawFd;

use nix::errno::Errno;
use nix::fcntl::OFlag;
use nix::pty::{grantpt, posix_openpt, unlockpt};
use nix::unistd::{read, write};

use super::{PtyError, PtyResult};

/// An allocated pseudoterminal master with an unlocked slave
pub struct PtyMaster {
    /// The PTY master file descriptor, closed on drop
    master: nix::pty::PtyMaster,
    /// Device path of the slave end, e.g. `/dev/pts/3`
    slave_name: String,
}

impl PtyMaster {
    /// Allocate a new master/slave pair
    ///
    /// Opens the multiplexor, grants access to and unlocks the slave, and
    /// resolves the slave's device path. The master stays in blocking mode.
    pub fn open() -> PtyResult<Self> {
        let master = posix_openpt(OFlag::O_RDWR | OFlag::O_NOCTTY).map_err(PtyError::OpenMaster)?;

        grantpt(&master).map_err(PtyError::GrantPty)?;
        unlockpt(&master).map_err(PtyError::UnlockPty)?;

        let slave_name = slave_name(&master)?;
        tracing::debug!(slave = %slave_name, fd = master.as_raw_fd(), "allocated PTY");

        Ok(Self { master, slave_name })
    }

    /// Device path of the slave end
    pub fn slave_name(&self) -> &str {
        &self.slave_name
    }

    /// Read one chunk from the master, blocking until data arrives
    ///
    /// Returns `Ok(0)` when the slave side has been closed. Linux reports a
    /// hung-up slave as `EIO`, which is mapped to end of stream here.
    /// Interrupted reads are retried.
    pub fn read_chunk(&self, buf: &mut [u8]) -> PtyResult<usize> {
        loop {
            match read(self.master.as_raw_fd(), buf) {
                Ok(n) => return Ok(n),
                Err(Errno::EINTR) => continue,
                Err(Errno::EIO) => return Ok(0),
                Err(e) => return Err(PtyError::Read(e)),
            }
        }
    }

    /// Write to the PTY master
    ///
    /// Returns the number of bytes written, which may be short.
    pub fn write(&self, data: &[u8]) -> PtyResult<usize> {
        write(self.master.as_raw_fd(), data).map_err(PtyError::Write)
    }
}

impl std::fmt::Debug for PtyMaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PtyMaster")
            .field("fd", &self.master.as_raw_fd())
            .field("slave_name", &self.slave_name)
            .finish()
    }
}

#[cfg(any(target_os = "linux", target_os = "android"))]
fn slave_name(master: &nix::pty::PtyMaster) -> PtyResult<String> {
    nix::pty::ptsname_r(master).map_err(PtyError::PtsName)
}

#[cfg(not(any(target_os = "linux", target_os = "android")))]
fn slave_name(master: &nix::pty::PtyMaster) -> PtyResult<String> {
    // SAFETY: ptsname is not thread-safe; the process is single-threaded
    // and the result is copied out immediately
    unsafe { nix::pty::ptsname(master) }.map_err(PtyError::PtsName)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs::OpenOptions;
    use std::io::{Read, Write};
    use std::os::unix::fs::OpenOptionsExt;

    use nix::sys::termios::{cfmakeraw, tcgetattr, tcsetattr, SetArg};

    fn open_slave_raw(name: &str) -> std::fs::File {
        let slave = OpenOptions::new()
            .read(true)
            .write(true)
            .custom_flags(nix::libc::O_NOCTTY)
            .open(name)
            .expect("Failed to open slave");
        let mut termios = tcgetattr(&slave).expect("tcgetattr");
        cfmakeraw(&mut termios);
        tcsetattr(&slave, SetArg::TCSANOW, &termios).expect("tcsetattr");
        slave
    }

    #[test]
    fn test_open_resolves_slave() {
        let pty = PtyMaster::open().expect("Failed to open PTY");
        assert!(pty.slave_name().starts_with("/dev/"));
        assert!(std::path::Path::new(pty.slave_name()).exists());
    }

    #[test]
    fn test_each_open_allocates_distinct_slave() {
        let a = PtyMaster::open().expect("Failed to open PTY");
        let b = PtyMaster::open().expect("Failed to open PTY");
        assert_ne!(a.slave_name(), b.slave_name());
    }

    #[test]
    fn test_read_write_through_slave() {
        let pty = PtyMaster::open().expect("Failed to open PTY");
        let mut slave = open_slave_raw(pty.slave_name());

        slave.write_all(b"ping\r").expect("slave write");
        let mut buf = [0u8; 64];
        let n = pty.read_chunk(&mut buf).expect("master read");
        assert_eq!(&buf[..n], b"ping\r");

        assert_eq!(pty.write(b"pong\r\n").expect("master write"), 6);
        let mut out = [0u8; 6];
        slave.read_exact(&mut out).expect("slave read");
        assert_eq!(&out, b"pong\r\n");
    }

    #[test]
    fn test_slave_hangup_reads_as_eof() {
        let pty = PtyMaster::open().expect("Failed to open PTY");
        let slave = open_slave_raw(pty.slave_name());
        drop(slave);

        let mut buf = [0u8; 16];
        assert_eq!(pty.read_chunk(&mut buf).expect("master read"), 0);
    }
}
