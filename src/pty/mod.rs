//! PTY (Pseudoterminal) allocation
//!
//! This module allocates a bare master/slave pair with no child process.
//! The slave end is left for an external program (for example `screen`)
//! to attach to.

use std::path::PathBuf;

#[cfg(unix)]
mod unix;

#[cfg(unix)]
pub use unix::PtyMaster;

/// Error type for PTY operations
#[derive(Debug, thiserror::Error)]
pub enum PtyError {
    #[error("Failed to open PTY master: {0}")]
    OpenMaster(#[source] nix::Error),

    #[error("Failed to grant PTY access: {0}")]
    GrantPty(#[source] nix::Error),

    #[error("Failed to unlock PTY: {0}")]
    UnlockPty(#[source] nix::Error),

    #[error("Failed to get PTY slave name: {0}")]
    PtsName(#[source] nix::Error),

    #[error("Failed to publish slave name to {}: {source}", path.display())]
    Publish {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read from PTY: {0}")]
    Read(#[source] nix::Error),

    #[error("Failed to write to PTY: {0}")]
    Write(#[source] nix::Error),

    #[error("Session is already open")]
    AlreadyOpen,

    #[error("Session is not open")]
    NotOpen,

    #[error("Session is closed")]
    Closed,
}

impl PtyError {
    /// Whether this error came from allocating or publishing a PTY
    pub fn is_allocation(&self) -> bool {
        matches!(
            self,
            PtyError::OpenMaster(_)
                | PtyError::GrantPty(_)
                | PtyError::UnlockPty(_)
                | PtyError::PtsName(_)
                | PtyError::Publish { .. }
        )
    }
}

/// Result type for PTY operations
pub type PtyResult<T> = Result<T, PtyError>;
