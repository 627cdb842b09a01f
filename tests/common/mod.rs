//! Helpers shared by the PTY integration tests
//!
//! The tests play the part of the attaching terminal program: they open the
//! published slave device in raw mode, type lines into it, and check what
//! the master writes back.

#![allow(dead_code)]

use std::fs::{self, File, OpenOptions};
use std::io::Read;
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;
use std::time::{Duration, Instant};

use nix::sys::termios::{cfmakeraw, tcgetattr, tcsetattr, SetArg, SpecialCharacterIndices};

/// Reads give up after this many tenths of a second without data
const READ_TIMEOUT_DECISECONDS: u8 = 50;

/// Attach to the slave named in the side-channel file, in raw mode
pub fn attach(pts_file: &Path) -> File {
    let slave_name = fs::read_to_string(pts_file).expect("Failed to read side-channel file");
    let slave = OpenOptions::new()
        .read(true)
        .write(true)
        .custom_flags(nix::libc::O_NOCTTY)
        .open(slave_name.trim_end())
        .expect("Failed to open slave");

    let mut termios = tcgetattr(&slave).expect("tcgetattr");
    cfmakeraw(&mut termios);
    // Fail instead of hanging if the master never answers
    termios.control_chars[SpecialCharacterIndices::VMIN as usize] = 0;
    termios.control_chars[SpecialCharacterIndices::VTIME as usize] = READ_TIMEOUT_DECISECONDS;
    tcsetattr(&slave, SetArg::TCSANOW, &termios).expect("tcsetattr");
    slave
}

pub fn read_exactly(slave: &mut File, len: usize) -> Vec<u8> {
    let mut buf = vec![0u8; len];
    slave.read_exact(&mut buf).expect("Failed to read from slave");
    buf
}

/// Poll until `path` exists, panicking after `timeout`
pub fn wait_for_path(path: &Path, timeout: Duration) {
    let deadline = Instant::now() + timeout;
    while !path.exists() {
        assert!(Instant::now() < deadline, "{} never appeared", path.display());
        std::thread::sleep(Duration::from_millis(10));
    }
}
