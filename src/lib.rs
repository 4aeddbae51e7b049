//! Keylog Decoder - turns raw keystroke capture logs into readable text
//!
//! A capture log is a stream of `(scancode, flags)` byte pairs. Each typed
//! line starts with a timestamp and ends with Enter. Decoding pairs the
//! bytes, splits the lines and maps every key through a layout table.

pub mod config;
pub mod decoder;
pub mod keyboard;
pub mod report;
pub mod utils;

pub use config::Config;
pub use decoder::{decode_bytes, read_log, read_log_file, DecodeError, DecodedEntry};
pub use keyboard::LayoutTable;
