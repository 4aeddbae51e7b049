use std::io;
use thiserror::Error;

/// Errors that abort decoding of a capture log.
///
/// Unknown scancodes and a trailing entry without Enter are not errors; the
/// decoder drops them and carries on.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The byte stream can't be split into whole (scancode, flags) pairs
    #[error("malformed log: odd byte count {len}, expected whole key pairs")]
    OddLength { len: usize },
    /// An Enter arrived before the timestamp and separator pairs
    #[error("malformed log: entry {index} has {pairs} key pairs before Enter, need at least 4")]
    ShortEntry { index: usize, pairs: usize },
    /// Failed to read the log source
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl DecodeError {
    /// Whether this error describes a structurally malformed log
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::OddLength { .. } | Self::ShortEntry { .. })
    }
}
