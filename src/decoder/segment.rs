//! Splitting a key pair stream into Enter-terminated entries

use super::DecodeError;
use crate::keyboard::KeyPair;

/// Pairs at the start of each entry that encode the timestamp
pub const TIMESTAMP_PAIRS: usize = 3;

/// Timestamp pairs plus the separator pair that follows them
pub const HEADER_PAIRS: usize = TIMESTAMP_PAIRS + 1;

/// One Enter-terminated entry before glyph resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSegment {
    /// Hour, minute and second pairs; only their scancode bytes matter
    pub timestamp_pairs: [KeyPair; TIMESTAMP_PAIRS],
    /// Typed keys, excluding the separator and the terminating Enter
    pub content_pairs: Vec<KeyPair>,
}

/// A captured line of input, terminated by Enter
pub type LogEntry = RawSegment;

/// Lazy iterator over the entries in a key pair stream.
///
/// Yields an error for an entry too short to hold its timestamp, then
/// stops. Pairs left over after the last Enter are dropped.
pub struct Segmenter<I> {
    pairs: I,
    buffer: Vec<KeyPair>,
    emitted: usize,
    finished: bool,
}

impl<I> Segmenter<I>
where
    I: Iterator<Item = KeyPair>,
{
    pub fn new(pairs: I) -> Self {
        Self {
            pairs,
            buffer: Vec::new(),
            emitted: 0,
            finished: false,
        }
    }

    /// Number of entries emitted so far
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    fn take_segment(&mut self) -> Result<RawSegment, DecodeError> {
        if self.buffer.len() < HEADER_PAIRS {
            return Err(DecodeError::ShortEntry {
                index: self.emitted,
                pairs: self.buffer.len(),
            });
        }

        let content_pairs = self.buffer.split_off(HEADER_PAIRS);
        let timestamp_pairs = [self.buffer[0], self.buffer[1], self.buffer[2]];
        self.buffer.clear();
        self.emitted += 1;

        Ok(RawSegment {
            timestamp_pairs,
            content_pairs,
        })
    }
}

impl<I> Iterator for Segmenter<I>
where
    I: Iterator<Item = KeyPair>,
{
    type Item = Result<RawSegment, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        while let Some(pair) = self.pairs.next() {
            if !pair.scancode.is_enter() {
                self.buffer.push(pair);
                continue;
            }

            let segment = self.take_segment();
            match &segment {
                Ok(seg) => log::trace!(
                    "entry {} with {} content pairs",
                    self.emitted - 1,
                    seg.content_pairs.len()
                ),
                Err(_) => self.finished = true,
            }
            return Some(segment);
        }

        self.finished = true;
        if !self.buffer.is_empty() {
            log::debug!(
                "dropping {} key pairs after the last Enter",
                self.buffer.len()
            );
            self.buffer.clear();
        }
        None
    }
}

/// Segment a key pair stream into entries
pub fn segment<I>(pairs: I) -> Segmenter<I::IntoIter>
where
    I: IntoIterator<Item = KeyPair>,
{
    Segmenter::new(pairs.into_iter())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyboard::KeyCode;

    fn enter() -> KeyPair {
        KeyPair::plain(KeyCode::KEY_ENTER)
    }

    fn header(h: u8, m: u8, s: u8) -> Vec<KeyPair> {
        vec![
            KeyPair::new(0x01, h),
            KeyPair::new(0x02, m),
            KeyPair::new(0x04, s),
            KeyPair::new(0x00, 0xff),
        ]
    }

    #[test]
    fn single_entry_boundary() {
        let mut pairs = header(1, 2, 3);
        pairs.push(KeyPair::plain(KeyCode::KEY_A));
        pairs.push(enter());

        let segments: Vec<_> = segment(pairs.clone())
            .collect::<Result<_, _>>()
            .expect("well-formed");

        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].timestamp_pairs, [pairs[0], pairs[1], pairs[2]]);
        assert_eq!(segments[0].content_pairs, vec![KeyPair::plain(KeyCode::KEY_A)]);
    }

    #[test]
    fn separator_pair_is_skipped() {
        let mut pairs = header(0, 0, 0);
        pairs.push(enter());

        let segments: Vec<_> = segment(pairs).collect::<Result<_, _>>().expect("well-formed");
        assert_eq!(segments.len(), 1);
        assert!(segments[0].content_pairs.is_empty());
    }

    #[test]
    fn multiple_entries_are_independent() {
        let mut pairs = header(1, 1, 1);
        pairs.push(KeyPair::plain(KeyCode::KEY_A));
        pairs.push(enter());
        pairs.extend(header(2, 2, 2));
        pairs.push(KeyPair::plain(KeyCode::KEY_B));
        pairs.push(KeyPair::plain(KeyCode::KEY_C));
        pairs.push(enter());

        let segments: Vec<_> = segment(pairs).collect::<Result<_, _>>().expect("well-formed");
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].content_pairs.len(), 1);
        assert_eq!(
            segments[1].content_pairs,
            vec![KeyPair::plain(KeyCode::KEY_B), KeyPair::plain(KeyCode::KEY_C)]
        );
        assert_eq!(segments[1].timestamp_pairs[0].scancode, KeyCode(2));
    }

    #[test]
    fn trailing_entry_without_enter_is_dropped() {
        let mut pairs = header(1, 2, 3);
        pairs.push(enter());
        pairs.extend(header(4, 5, 6));
        pairs.push(KeyPair::plain(KeyCode::KEY_Z));

        let mut segmenter = segment(pairs);
        assert!(matches!(segmenter.next(), Some(Ok(_))));
        assert!(segmenter.next().is_none());
        assert!(segmenter.next().is_none());
        assert_eq!(segmenter.emitted(), 1);
    }

    #[test]
    fn short_entry_is_an_error_and_stops() {
        let pairs = vec![
            KeyPair::new(0, 1),
            KeyPair::new(0, 2),
            enter(),
            KeyPair::new(0, 3),
        ];

        let mut segmenter = segment(pairs);
        match segmenter.next() {
            Some(Err(DecodeError::ShortEntry { index, pairs })) => {
                assert_eq!(index, 0);
                assert_eq!(pairs, 2);
            }
            other => panic!("expected ShortEntry, got {other:?}"),
        }
        assert!(segmenter.next().is_none());
    }

    #[test]
    fn lone_enter_is_short_entry() {
        let mut segmenter = segment(vec![enter()]);
        assert!(matches!(
            segmenter.next(),
            Some(Err(DecodeError::ShortEntry { pairs: 0, .. }))
        ));
    }

    #[test]
    fn empty_stream_yields_nothing() {
        assert!(segment(Vec::new()).next().is_none());
    }
}
