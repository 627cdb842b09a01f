//! PTY session lifecycle
//!
//! A [`PtySession`] owns at most one [`PtyMaster`] for its lifetime and moves
//! through `Unopened -> Open -> Closed`. While open, the slave device path is
//! published in a side-channel file so an external terminal program can
//! find and attach to it. The file is removed on close, and on drop if the
//! session was never closed explicitly.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::protocol::{encode_reply, Line, LineFramer};
use crate::pty::{PtyError, PtyMaster, PtyResult};

/// Read size used when none is configured
pub const DEFAULT_CHUNK_SIZE: usize = 512;

/// Lifecycle state of a [`PtySession`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unopened,
    Open,
    Closed,
}

/// One client session on a freshly allocated PTY
#[derive(Debug)]
pub struct PtySession {
    pts_file: PathBuf,
    chunk_size: usize,
    state: SessionState,
    master: Option<PtyMaster>,
    framer: LineFramer,
}

impl PtySession {
    /// Create an unopened session publishing to `pts_file`
    pub fn new(pts_file: impl Into<PathBuf>) -> Self {
        Self::with_chunk_size(pts_file, DEFAULT_CHUNK_SIZE)
    }

    /// Create an unopened session with a custom read size
    pub fn with_chunk_size(pts_file: impl Into<PathBuf>, chunk_size: usize) -> Self {
        Self {
            pts_file: pts_file.into(),
            chunk_size: chunk_size.max(1),
            state: SessionState::Unopened,
            master: None,
            framer: LineFramer::new(),
        }
    }

    /// Allocate the PTY and publish its slave path
    ///
    /// Any failure closes the session, so the side-channel file never
    /// outlives a half-opened session.
    pub fn open(&mut self) -> PtyResult<&str> {
        match self.state {
            SessionState::Unopened => {},
            SessionState::Open => return Err(PtyError::AlreadyOpen),
            SessionState::Closed => return Err(PtyError::Closed),
        }

        self.framer.reset();
        let master = match PtyMaster::open() {
            Ok(master) => master,
            Err(e) => {
                self.close();
                return Err(e);
            },
        };

        if let Err(source) = publish(&self.pts_file, master.slave_name()) {
            drop(master);
            self.close();
            return Err(PtyError::Publish {
                path: self.pts_file.clone(),
                source,
            });
        }
        tracing::debug!(path = %self.pts_file.display(), "published slave path");

        self.state = SessionState::Open;
        Ok(self.master.insert(master).slave_name())
    }

    /// Block until at least one complete line arrives
    ///
    /// An empty result means the client disconnected. Any unterminated
    /// partial line is dropped at that point. Chunks that complete no line
    /// are accumulated and the read is repeated.
    pub fn read_lines(&mut self) -> PtyResult<Vec<Line>> {
        let master = match (self.state, self.master.as_ref()) {
            (SessionState::Open, Some(master)) => master,
            (SessionState::Closed, _) => return Err(PtyError::Closed),
            _ => return Err(PtyError::NotOpen),
        };

        let mut buf = vec![0u8; self.chunk_size];
        loop {
            let n = match master.read_chunk(&mut buf) {
                Ok(n) => n,
                Err(e) => {
                    tracing::debug!("treating read failure as disconnect: {}", e);
                    0
                },
            };

            if n == 0 {
                let dropped = self.framer.discard();
                if dropped > 0 {
                    tracing::debug!(bytes = dropped, "discarded unterminated line");
                }
                return Ok(Vec::new());
            }

            tracing::trace!(bytes = n, "read chunk");
            let lines = self.framer.feed(&buf[..n]);
            if !lines.is_empty() {
                return Ok(lines);
            }
        }
    }

    /// Send a reply to the client
    ///
    /// Empty payloads are skipped. Write failures and short writes are not
    /// reported to the caller.
    pub fn write(&self, payload: impl AsRef<[u8]>) {
        let bytes = encode_reply(payload.as_ref());
        if bytes.is_empty() {
            return;
        }

        let Some(master) = self.master.as_ref() else {
            tracing::debug!("write on a session that is not open");
            return;
        };

        match master.write(&bytes) {
            Ok(n) if n < bytes.len() => {
                tracing::debug!(written = n, total = bytes.len(), "short write to PTY")
            },
            Ok(_) => {},
            Err(e) => tracing::debug!("{}", e),
        }
    }

    /// Remove the published path and release the master
    ///
    /// Safe to call in any state and more than once.
    pub fn close(&mut self) {
        match fs::remove_file(&self.pts_file) {
            Ok(()) => tracing::debug!(path = %self.pts_file.display(), "removed slave path"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {},
            Err(e) => tracing::warn!(path = %self.pts_file.display(), "failed to remove: {}", e),
        }
        self.master = None;
        self.framer.reset();
        self.state = SessionState::Closed;
    }

    /// Current lifecycle state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Slave device path while open
    pub fn slave_name(&self) -> Option<&str> {
        self.master.as_ref().map(PtyMaster::slave_name)
    }

    /// Partial line held back from earlier reads
    pub fn pending(&self) -> &[u8] {
        self.framer.pending()
    }
}

impl Drop for PtySession {
    fn drop(&mut self) {
        if self.state == SessionState::Open {
            self.close();
        }
    }
}

/// Overwrite `path` with the slave name, without a trailing newline
fn publish(path: &Path, slave_name: &str) -> io::Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;
    file.write_all(slave_name.as_bytes())?;
    file.flush()
}
