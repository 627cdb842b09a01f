//! Application glue module
//!
//! Configuration, the response rule, interrupt cleanup, and the serve loop
//! that keeps one session alive at a time.

mod config;
pub mod dispatch;
pub mod interrupt;

use std::time::Duration;

pub use config::Config;

use crate::pty::{PtyError, PtyResult};
use crate::session::PtySession;

/// Serve clients one after another, forever
///
/// Each iteration opens a fresh session and answers lines until the client
/// disconnects. Returns only when allocation fails and
/// `allocation_retry_ms` is unset.
pub fn serve(config: &Config) -> Result<(), PtyError> {
    loop {
        let session = match open_session(config) {
            Ok(session) => session,
            Err(e) => match config.allocation_retry_ms {
                Some(ms) if e.is_allocation() => {
                    tracing::error!("{}; retrying in {}ms", e, ms);
                    std::thread::sleep(Duration::from_millis(ms));
                    continue;
                },
                _ => return Err(e),
            },
        };
        serve_session(session, &config.greeting)?;
    }
}

/// Allocate a PTY and publish its slave path
pub fn open_session(config: &Config) -> PtyResult<PtySession> {
    let mut session = PtySession::with_chunk_size(&config.pts_file, config.read_chunk_size);
    let slave = session.open()?;
    tracing::info!("start listening at {}", slave);
    Ok(session)
}

/// Answer lines until the client disconnects, then close the session
pub fn serve_session(mut session: PtySession, greeting: &str) -> PtyResult<()> {
    while serve_batch(&mut session, greeting)? {}
    tracing::info!("all clients disconnected");
    session.close();
    Ok(())
}

/// Answer one batch of lines; `false` means the client went away
fn serve_batch(session: &mut PtySession, greeting: &str) -> PtyResult<bool> {
    let lines = session.read_lines()?;
    if lines.is_empty() {
        return Ok(false);
    }

    for line in &lines {
        tracing::info!("recv: {}", String::from_utf8_lossy(line));
        session.write(dispatch::respond(line, greeting));
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocation_failure_is_fatal_without_retry() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            pts_file: dir.path().join("missing").join("master.pts"),
            ..Config::default()
        };

        let err = serve(&config).expect_err("serve should stop");
        assert!(err.is_allocation());
        assert!(!config.pts_file.exists());
    }

    #[test]
    fn test_open_session_publishes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            pts_file: dir.path().join("master.pts"),
            ..Config::default()
        };

        let session = open_session(&config).expect("Failed to open session");
        assert_eq!(
            std::fs::read_to_string(&config.pts_file).unwrap(),
            session.slave_name().unwrap()
        );
        drop(session);
        assert!(!config.pts_file.exists());
    }
}
