//! Capture log decoding pipeline
//!
//! Raw bytes are paired and byte-swapped ([`reorder`]), split into
//! Enter-terminated entries ([`segment`]) and rendered through a layout
//! table ([`render`]).
//!
//! ## Example
//!
//! ```
//! use keylog_decoder::decoder::decode_bytes;
//! use keylog_decoder::keyboard::LayoutTable;
//!
//! // (scancode, flags) on disk: 01:02:03, separator, 'a', Enter
//! let raw = [1u8, 0, 2, 0, 3, 0, 0xff, 0, 30, 0, 28, 0];
//! let lines = decode_bytes(&raw, &LayoutTable::builtin()).unwrap();
//! assert_eq!(lines, vec!["[01:02:03] a".to_string()]);
//! ```

mod error;
pub mod render;
pub mod reorder;
pub mod segment;

pub use error::DecodeError;
pub use render::{decode, render, DecodedEntry, Timestamp};
pub use reorder::reorder;
pub use segment::{segment, LogEntry, RawSegment, Segmenter};

use crate::keyboard::{KeyPair, LayoutTable};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::vec;

/// Lazy iterator of decoded entries over an in-memory log
pub struct Entries<'a> {
    segments: Segmenter<vec::IntoIter<KeyPair>>,
    table: &'a LayoutTable,
}

impl Iterator for Entries<'_> {
    type Item = Result<DecodedEntry, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.segments
            .next()
            .map(|segment| segment.map(|seg| decode(&seg, self.table)))
    }
}

/// Start decoding a raw log.
///
/// Byte alignment is checked up front; short entries surface as an `Err`
/// item when reached.
pub fn entries<'a>(raw: &[u8], table: &'a LayoutTable) -> Result<Entries<'a>, DecodeError> {
    let pairs = reorder(raw)?;
    Ok(Entries {
        segments: segment(pairs),
        table,
    })
}

/// Decode a raw log into entries, failing on the first malformed one
pub fn decode_entries(raw: &[u8], table: &LayoutTable) -> Result<Vec<DecodedEntry>, DecodeError> {
    entries(raw, table)?.collect()
}

/// Decode a raw log into `[HH:MM:SS] text` lines
pub fn decode_bytes(raw: &[u8], table: &LayoutTable) -> Result<Vec<String>, DecodeError> {
    entries(raw, table)?
        .map(|entry| entry.map(|e| e.to_string()))
        .collect()
}

/// Read a whole log source into memory and decode it
pub fn read_log<R: Read>(mut reader: R, table: &LayoutTable) -> Result<Vec<DecodedEntry>, DecodeError> {
    let mut raw = Vec::new();
    reader.read_to_end(&mut raw)?;
    log::debug!("read {} bytes of capture data", raw.len());
    decode_entries(&raw, table)
}

/// Open and decode a log file
pub fn read_log_file(path: &Path, table: &LayoutTable) -> Result<Vec<DecodedEntry>, DecodeError> {
    log::info!("decoding {}", path.display());
    let entries = read_log(File::open(path)?, table)?;
    log::info!("{} entries in {}", entries.len(), path.display());
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// On-disk bytes for one entry: timestamp, separator, keys, Enter
    fn entry_bytes(h: u8, m: u8, s: u8, keys: &[(u8, u8)]) -> Vec<u8> {
        let mut raw = vec![h, 0, m, 0, s, 0, 0xff, 0];
        for &(code, flags) in keys {
            raw.push(code);
            raw.push(flags);
        }
        raw.extend([28, 0]);
        raw
    }

    #[test]
    fn decodes_single_entry() {
        let raw = entry_bytes(1, 2, 3, &[(30, 0)]);
        let lines = decode_bytes(&raw, &LayoutTable::builtin()).expect("well-formed");
        assert_eq!(lines, vec!["[01:02:03] a"]);
    }

    #[test]
    fn odd_length_fails_before_any_entry() {
        let mut raw = entry_bytes(1, 2, 3, &[(30, 0)]);
        raw.push(30);
        let table = LayoutTable::builtin();
        assert!(matches!(entries(&raw, &table), Err(DecodeError::OddLength { .. })));
    }

    #[test]
    fn short_entry_aborts_decode() {
        let mut raw = entry_bytes(1, 2, 3, &[(30, 0)]);
        raw.extend([5, 0, 28, 0]);
        let result = decode_bytes(&raw, &LayoutTable::builtin());
        assert!(matches!(result, Err(DecodeError::ShortEntry { index: 1, pairs: 1 })));
    }

    #[test]
    fn entries_are_lazy() {
        let mut raw = entry_bytes(1, 2, 3, &[(30, 0)]);
        raw.extend([28, 0]);
        let table = LayoutTable::builtin();
        let mut iter = entries(&raw, &table).expect("even length");

        let first = iter.next().expect("one entry").expect("well-formed");
        assert_eq!(first.text, "a");
        assert!(matches!(iter.next(), Some(Err(DecodeError::ShortEntry { .. }))));
    }

    #[test]
    fn read_log_from_cursor() {
        let mut raw = entry_bytes(9, 30, 15, &[(35, 2), (23, 0)]);
        raw.extend(entry_bytes(9, 31, 0, &[(57, 0)]));
        let entries = read_log(Cursor::new(raw), &LayoutTable::builtin()).expect("well-formed");

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].to_string(), "[09:30:15] Hi");
        assert_eq!(entries[1].timestamp, Timestamp::new(9, 31, 0));
        assert_eq!(entries[1].text, " ");
    }

    #[test]
    fn read_log_file_missing_is_io_error() {
        let result = read_log_file(Path::new("/nonexistent/log_01012024"), &LayoutTable::builtin());
        assert!(matches!(result, Err(DecodeError::Io(_))));
    }
}
