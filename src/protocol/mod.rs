//! Line protocol spoken over the PTY master
//!
//! The attached client sends carriage-return terminated lines in raw,
//! unbuffered chunks; replies go back with every newline expanded to CRLF.

mod framer;
mod reply;

pub use framer::{Line, LineFramer, DELIMITER};
pub use reply::encode_reply;
