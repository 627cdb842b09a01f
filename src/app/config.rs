//! Configuration for the PTY master

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::session::DEFAULT_CHUNK_SIZE;

/// Runtime configuration
///
/// The binary runs with [`Config::default`]; embedders and tests build their
/// own, for example to publish under a temporary directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// File the slave device path is published to
    pub pts_file: PathBuf,
    /// Line that is answered with the banner instead of an echo
    pub greeting: String,
    /// Size of each raw read from the master
    pub read_chunk_size: usize,
    /// Delay before retrying a failed allocation; `None` makes it fatal
    pub allocation_retry_ms: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pts_file: PathBuf::from("/tmp/master.pts"),
            greeting: "hello".to_string(),
            read_chunk_size: DEFAULT_CHUNK_SIZE,
            allocation_retry_ms: None,
        }
    }
}
