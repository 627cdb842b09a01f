//! PTY master
//!
//! Allocates a pseudoterminal and publishes its slave path so a terminal
//! program can attach, e.g.:
//!
//! ```bash
//! pts-master &
//! screen "$(cat /tmp/master.pts)"
//! ```
//!
//! Typing `hello` prints a banner; any other line is echoed. When the
//! client detaches a new PTY is allocated. Ctrl+C removes the published
//! path and exits.

use std::io;
use std::process::ExitCode;

use pts_master::app::{self, interrupt, Config};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stdout))
        .init();

    let config = Config::default();

    if let Err(e) = interrupt::install(&config.pts_file) {
        tracing::error!("{}", e);
        return ExitCode::FAILURE;
    }

    match app::serve(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            interrupt::release();
            ExitCode::FAILURE
        },
    }
}
