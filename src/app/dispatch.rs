//! Response rule for received lines

/// Banner sent in reply to the greeting
pub const BANNER: &str = r"
╦ ╦┌─┐┬  ┬  ┌─┐┌─┐┌┬┐┌─┐┬
║║║├┤ │  │  │  │ ││││├┤ │
╚╩╝└─┘┴─┘┴─┘└─┘└─┘┴ ┴└─┘o

Press ['ctrl+a', '\'] to exit screen session.

";

/// Choose the reply payload for one line
///
/// The greeting gets the banner; anything else is echoed unchanged.
pub fn respond<'a>(line: &'a [u8], greeting: &str) -> &'a [u8] {
    if line == greeting.as_bytes() {
        BANNER.as_bytes()
    } else {
        line
    }
}
