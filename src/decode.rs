//! Line framing and integer parsing for the sample stream.
//!
//! The device prints one decimal integer per line. Bytes arrive in arbitrary
//! pieces, so the decoder keeps the unterminated tail until the next read.

use tracing::trace;

/// Lines shorter than this (after trailing whitespace is stripped) are
/// ignored. Single-character lines are usually line noise at connect time.
pub const MIN_LINE_LEN: usize = 2;

/// Unterminated bytes kept at most before they are discarded.
pub const MAX_PENDING_BYTES: usize = 4096;

/// Parses one line into a sample value.
///
/// Returns `None` for short lines and anything that is not a signed decimal
/// integer.
pub fn parse_value(line: &[u8]) -> Option<i64> {
    let line = line.trim_ascii_end();
    if line.len() < MIN_LINE_LEN {
        return None;
    }
    let text = std::str::from_utf8(line.trim_ascii_start()).ok()?;
    text.parse::<i64>().ok()
}

/// Counters describing what the decoder has seen.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DecodeStats {
    /// Complete lines seen.
    pub lines: u64,
    /// Lines that parsed into a value.
    pub values: u64,
    /// Lines that were ignored.
    pub rejected: u64,
    /// Times the pending buffer overflowed without a newline.
    pub overflows: u64,
}

/// Splits a byte stream into lines and parses each one.
#[derive(Debug, Default)]
pub struct LineDecoder {
    pending: Vec<u8>,
    /// Inside a line that overflowed; bytes are dropped up to its newline.
    discarding: bool,
    stats: DecodeStats,
}

impl LineDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds `bytes` and returns the values of every completed line.
    pub fn push(&mut self, bytes: &[u8]) -> Vec<i64> {
        let mut values = Vec::new();
        let mut rest = bytes;

        while let Some(pos) = rest.iter().position(|&b| b == b'\n') {
            let (head, tail) = rest.split_at(pos);
            rest = &tail[1..];
            self.stats.lines += 1;

            if self.discarding {
                self.discarding = false;
                self.stats.rejected += 1;
                trace!("Dropped end of oversized line ({} bytes)", head.len());
                continue;
            }

            if !self.pending.is_empty() {
                self.pending.extend_from_slice(head);
            }
            let line = if self.pending.is_empty() {
                head
            } else {
                self.pending.as_slice()
            };

            match parse_value(line) {
                Some(v) => {
                    self.stats.values += 1;
                    values.push(v);
                }
                None => {
                    self.stats.rejected += 1;
                    trace!("Rejected line ({} bytes)", line.len());
                }
            }
            self.pending.clear();
        }

        if self.discarding {
            return values;
        }

        self.pending.extend_from_slice(rest);
        if self.pending.len() > MAX_PENDING_BYTES {
            self.stats.overflows += 1;
            self.pending.clear();
            self.discarding = true;
        }

        values
    }

    /// Bytes waiting for a newline.
    pub fn pending(&self) -> &[u8] {
        &self.pending
    }

    pub fn stats(&self) -> DecodeStats {
        self.stats
    }
}
