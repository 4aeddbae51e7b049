//! Turning segments into timestamped text lines

use super::segment::RawSegment;
use crate::keyboard::LayoutTable;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Entry time as recorded by the capture agent.
///
/// Fields are the raw scancode bytes and are not range checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamp {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl Timestamp {
    pub fn new(hour: u8, minute: u8, second: u8) -> Self {
        Self {
            hour,
            minute,
            second,
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

impl RawSegment {
    /// Timestamp taken from the scancode bytes of the first three pairs
    pub fn timestamp(&self) -> Timestamp {
        let [hour, minute, second] = self.timestamp_pairs.map(|pair| pair.scancode.as_u8());
        Timestamp::new(hour, minute, second)
    }
}

/// A rendered entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedEntry {
    pub timestamp: Timestamp,
    pub text: String,
    /// Content pairs dropped because their scancode isn't in the layout
    pub skipped_keys: usize,
}

impl fmt::Display for DecodedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.timestamp, self.text)
    }
}

/// Resolve every content pair of a segment through the layout table.
///
/// Unknown scancodes contribute nothing and are counted in `skipped_keys`.
pub fn decode(segment: &RawSegment, table: &LayoutTable) -> DecodedEntry {
    let mut text = String::with_capacity(segment.content_pairs.len());
    let mut skipped_keys = 0;

    for pair in &segment.content_pairs {
        match table.resolve(pair) {
            Some(glyph) => text.push_str(glyph),
            None => {
                log::debug!(
                    "skipping unknown scancode {} (flags {:#04x})",
                    pair.scancode.as_u8(),
                    pair.flag_bits()
                );
                skipped_keys += 1;
            }
        }
    }

    DecodedEntry {
        timestamp: segment.timestamp(),
        text,
        skipped_keys,
    }
}

/// Render a segment as `[HH:MM:SS] text`
pub fn render(segment: &RawSegment, table: &LayoutTable) -> String {
    decode(segment, table).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyboard::{Glyphs, KeyCode, KeyPair, Modifiers};

    fn segment_with(content: Vec<KeyPair>) -> RawSegment {
        RawSegment {
            timestamp_pairs: [KeyPair::new(0, 1), KeyPair::new(0, 2), KeyPair::new(0, 3)],
            content_pairs: content,
        }
    }

    fn table_a() -> LayoutTable {
        let mut table = LayoutTable::new();
        table
            .insert(KeyCode::KEY_A, Glyphs::new("a", "A", "A", ""))
            .expect("valid glyphs");
        table
    }

    #[test]
    fn timestamp_is_zero_padded() {
        assert_eq!(Timestamp::new(1, 2, 3).to_string(), "01:02:03");
        assert_eq!(Timestamp::new(23, 59, 0).to_string(), "23:59:00");
    }

    #[test]
    fn timestamp_over_99_is_not_clamped() {
        assert_eq!(Timestamp::new(255, 100, 7).to_string(), "255:100:07");
    }

    #[test]
    fn timestamp_ignores_flag_bits() {
        let segment = RawSegment {
            timestamp_pairs: [KeyPair::new(0xff, 12), KeyPair::new(0x07, 34), KeyPair::new(0x01, 56)],
            content_pairs: Vec::new(),
        };
        assert_eq!(segment.timestamp(), Timestamp::new(12, 34, 56));
    }

    #[test]
    fn renders_plain_key() {
        let segment = segment_with(vec![KeyPair::plain(KeyCode::KEY_A)]);
        assert_eq!(render(&segment, &table_a()), "[01:02:03] a");
    }

    #[test]
    fn caps_and_shift_resolve_once() {
        let flags = Modifiers::CAPS | Modifiers::SHIFT;
        let segment = segment_with(vec![KeyPair::with_flags(KeyCode::KEY_A, flags)]);
        assert_eq!(render(&segment, &table_a()), "[01:02:03] A");
    }

    #[test]
    fn altgr_without_glyph_is_empty() {
        let segment = segment_with(vec![KeyPair::with_flags(KeyCode::KEY_A, Modifiers::ALTGR)]);
        let entry = decode(&segment, &table_a());
        assert_eq!(entry.text, "");
        assert_eq!(entry.skipped_keys, 0);
        assert_eq!(entry.to_string(), "[01:02:03] ");
    }

    #[test]
    fn unknown_scancode_is_dropped() {
        let segment = segment_with(vec![KeyPair::new(0, 200), KeyPair::plain(KeyCode::KEY_A)]);
        let entry = decode(&segment, &table_a());
        assert_eq!(entry.text, "a");
        assert_eq!(entry.skipped_keys, 1);
    }

    #[test]
    fn builtin_table_sentence() {
        let shift = Modifiers::SHIFT;
        let segment = segment_with(vec![
            KeyPair::with_flags(KeyCode::KEY_H, shift),
            KeyPair::plain(KeyCode::KEY_I),
            KeyPair::with_flags(KeyCode::KEY_1, shift),
            KeyPair::plain(KeyCode::KEY_SPACE),
            KeyPair::with_flags(KeyCode::KEY_W, Modifiers::ALTGR),
        ]);
        assert_eq!(render(&segment, &LayoutTable::builtin()), "[01:02:03] Hi! ?");
    }
}
