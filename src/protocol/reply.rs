//! Reply encoding
//!
//! Terminal clients expect CRLF line endings. A reply is newline terminated
//! and then every LF in it is expanded to CR LF.

/// Encode a reply payload for the wire.
///
/// Returns an empty buffer for an empty payload, meaning nothing should be
/// written. A missing trailing newline is appended once. Every newline,
/// including one already preceded by a carriage return, becomes `\r\n`.
pub fn encode_reply(payload: &[u8]) -> Vec<u8> {
    if payload.is_empty() {
        return Vec::new();
    }

    let newlines = payload.iter().filter(|&&b| b == b'\n').count();
    let mut out = Vec::with_capacity(payload.len() + newlines + 2);
    for &b in payload {
        if b == b'\n' {
            out.extend_from_slice(b"\r\n");
        } else {
            out.push(b);
        }
    }
    if payload.last() != Some(&b'\n') {
        out.extend_from_slice(b"\r\n");
    }
    out
}
