//! Emergency cleanup on SIGINT
//!
//! The side-channel file must not outlive the process. On interrupt the
//! handler unlinks it and exits with status 1. Only async-signal-safe calls
//! are made from the handler, on a C string prepared before installation.

use std::ffi::CString;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;
use std::sync::OnceLock;

use nix::libc;
use nix::sys::signal::{sigaction, SaFlags, SigAction, SigHandler, SigSet, Signal};

/// Path removed by the handler; set once before the handler is installed
static PTS_FILE: OnceLock<CString> = OnceLock::new();

/// Error installing the interrupt handler
#[derive(Debug, thiserror::Error)]
pub enum InterruptError {
    #[error("path contains an interior NUL byte: {0}")]
    InvalidPath(#[from] std::ffi::NulError),

    #[error("interrupt handler already installed for another path")]
    AlreadyInstalled,

    #[error("Failed to install SIGINT handler: {0}")]
    Sigaction(#[source] nix::Error),
}

/// Register `path` for removal on SIGINT and install the handler
///
/// Calling it again with the same path is a no-op.
pub fn install(path: &Path) -> Result<(), InterruptError> {
    let c_path = CString::new(path.as_os_str().as_bytes())?;
    let registered = PTS_FILE.get_or_init(|| c_path.clone());
    if *registered != c_path {
        return Err(InterruptError::AlreadyInstalled);
    }

    let action = SigAction::new(
        SigHandler::Handler(on_interrupt),
        SaFlags::empty(),
        SigSet::empty(),
    );
    // SAFETY: the handler only calls unlink(2) and _exit(2), both
    // async-signal-safe, and reads a OnceLock that is already initialised
    unsafe { sigaction(Signal::SIGINT, &action) }.map_err(InterruptError::Sigaction)?;

    tracing::debug!(path = %path.display(), "installed SIGINT cleanup");
    Ok(())
}

/// Remove the registered path, if any
///
/// Missing files are ignored, so this is safe when no session is live.
pub fn release() {
    if let Some(path) = PTS_FILE.get() {
        // SAFETY: path is a valid NUL-terminated string for the program's lifetime
        unsafe {
            libc::unlink(path.as_ptr());
        }
    }
}

extern "C" fn on_interrupt(_signal: libc::c_int) {
    release();
    // SAFETY: _exit skips atexit handlers and destructors, which is what a
    // signal handler needs
    unsafe { libc::_exit(1) }
}
