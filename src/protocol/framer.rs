//! Line Framer
//!
//! Reassembles a raw byte stream into delimiter-terminated lines. Reads from
//! the PTY master arrive in chunks of arbitrary length, so a line may be
//! split across any number of chunks. The unterminated tail of each chunk is
//! kept as carry-over and prepended to the next one.

/// Line delimiter sent by terminal clients in raw mode (carriage return)
pub const DELIMITER: u8 = b'\r';

/// A complete line with its delimiter stripped
pub type Line = Vec<u8>;

/// Stateful chunk-to-line decoder
#[derive(Debug, Clone, Default)]
pub struct LineFramer {
    /// Unterminated tail of the stream; never contains the delimiter
    carry: Vec<u8>,
}

impl LineFramer {
    /// Create a framer with no carry-over
    pub fn new() -> Self {
        Self { carry: Vec::new() }
    }

    /// Feed one chunk and return every line it completes, in stream order.
    ///
    /// Bytes after the last delimiter are held back until a later chunk
    /// terminates them. A chunk without any delimiter only accumulates and
    /// returns no lines.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<Line> {
        let mut lines = Vec::new();
        let mut rest = chunk;

        while let Some(pos) = rest.iter().position(|&b| b == DELIMITER) {
            let mut line = std::mem::take(&mut self.carry);
            line.extend_from_slice(&rest[..pos]);
            lines.push(line);
            rest = &rest[pos + 1..];
        }

        self.carry.extend_from_slice(rest);
        lines
    }

    /// Bytes received since the last delimiter
    pub fn pending(&self) -> &[u8] {
        &self.carry
    }

    /// Drop the carry-over, returning how many bytes were discarded
    pub fn discard(&mut self) -> usize {
        let n = self.carry.len();
        self.carry.clear();
        n
    }

    /// Return to the initial empty state
    pub fn reset(&mut self) {
        self.carry.clear();
    }
}
