//! PTY master for externally attached terminals
//!
//! Allocates a pseudoterminal, publishes the slave device path to a
//! well-known file, and answers whatever the attached client types, one
//! carriage-return terminated line at a time:
//!
//! - `protocol`: line framing of the raw input stream and CRLF reply encoding
//! - `pty`: master/slave allocation and raw I/O
//! - `session`: one client session from allocation to release
//! - `app`: configuration, response rule, interrupt cleanup, serve loop

pub mod app;
pub mod protocol;
pub mod pty;
pub mod session;

pub use app::Config;
pub use protocol::{Line, LineFramer};
pub use pty::{PtyError, PtyMaster, PtyResult};
pub use session::{PtySession, SessionState};
