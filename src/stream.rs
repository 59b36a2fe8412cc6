//! Sample stream: start handshake and per-tick polling.

use std::collections::VecDeque;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::decode::{DecodeStats, LineDecoder};
use crate::source::{SampleSource, SourceError};

/// Decoded integer samples from a byte source.
pub struct SampleStream {
    source: Box<dyn SampleSource>,
    decoder: LineDecoder,
    backlog: VecDeque<i64>,
    last_error: Option<SourceError>,
    total_values: u64,
    read_errors: u64,
}

/// Snapshot of stream counters for the status line.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StreamStats {
    /// Values handed out by `wait_first_value` and `poll`.
    pub values: u64,
    /// Failed reads.
    pub read_errors: u64,
    /// Decoder counters.
    pub decode: DecodeStats,
}

impl SampleStream {
    pub fn new(source: Box<dyn SampleSource>) -> Self {
        Self {
            source,
            decoder: LineDecoder::new(),
            backlog: VecDeque::new(),
            last_error: None,
            total_values: 0,
            read_errors: 0,
        }
    }

    /// Blocks until the first non-zero value arrives.
    ///
    /// Zero values and unparsable lines are skipped. Values decoded after the
    /// first one in the same read are kept and returned by the next `poll`.
    ///
    /// # Arguments
    /// * `timeout` - give up after this long; `None` waits forever
    /// * `poll_interval` - sleep between empty reads
    pub fn wait_first_value(
        &mut self,
        timeout: Option<Duration>,
        poll_interval: Duration,
    ) -> Result<i64, SourceError> {
        let started = Instant::now();
        info!("Waiting for first value from {}", self.source.describe());

        loop {
            let bytes = self.source.read_available()?;
            let mut values = self.decoder.push(&bytes).into_iter();

            while let Some(v) = values.next() {
                if v != 0 {
                    self.backlog.extend(values);
                    self.total_values += 1;
                    info!("First value: {}", v);
                    return Ok(v);
                }
                debug!("Skipping zero value during handshake");
            }

            if let Some(limit) = timeout
                && started.elapsed() >= limit
            {
                return Err(SourceError::Timeout(limit));
            }

            if bytes.is_empty() {
                thread::sleep(poll_interval);
            }
        }
    }

    /// Returns every value available right now.
    ///
    /// A source error is recorded in `last_error()` and the values decoded so
    /// far are still returned.
    pub fn poll(&mut self) -> Vec<i64> {
        let mut values: Vec<i64> = self.backlog.drain(..).collect();

        match self.source.read_available() {
            Ok(bytes) => {
                self.last_error = None;
                if !bytes.is_empty() {
                    values.extend(self.decoder.push(&bytes));
                }
            }
            Err(e) => {
                self.record_error(e);
            }
        }

        self.total_values += values.len() as u64;
        values
    }

    /// Stores a failed read. Only an error that differs from the previous
    /// read's is logged; returns `true` in that case.
    fn record_error(&mut self, error: SourceError) -> bool {
        self.read_errors += 1;
        let changed = self.last_error.as_ref() != Some(&error);
        if changed {
            warn!("Read from {} failed: {}", self.source.describe(), error);
        }
        self.last_error = Some(error);
        changed
    }

    /// Returns the error of the last read, if it failed.
    pub fn last_error(&self) -> Option<&SourceError> {
        self.last_error.as_ref()
    }

    pub fn stats(&self) -> StreamStats {
        StreamStats {
            values: self.total_values,
            read_errors: self.read_errors,
            decode: self.decoder.stats(),
        }
    }

    /// Label of the underlying source.
    pub fn describe(&self) -> String {
        self.source.describe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MockSource;

    fn stream(mock: MockSource) -> SampleStream {
        SampleStream::new(Box::new(mock))
    }

    #[test]
    fn test_wait_first_value_skips_zero_and_noise() {
        let mock = MockSource::new()
            .idle()
            .chunk("x\n0\n")
            .chunk("00\n")
            .chunk("31");
        let mut s = stream(mock.chunk("7\n"));

        let first = s.wait_first_value(None, Duration::ZERO).unwrap();
        assert_eq!(first, 317);
        assert_eq!(s.stats().values, 1);
    }

    #[test]
    fn test_wait_first_value_keeps_backlog() {
        let mut s = stream(MockSource::new().chunk("0\n15\n16\n17\n"));
        assert_eq!(s.wait_first_value(None, Duration::ZERO).unwrap(), 15);

        // The rest of the same read is not lost
        assert_eq!(s.poll(), vec![16, 17]);
        assert_eq!(s.stats().values, 3);
    }

    #[test]
    fn test_wait_first_value_times_out() {
        let mut s = stream(MockSource::new());
        let err = s
            .wait_first_value(Some(Duration::from_millis(20)), Duration::from_millis(1))
            .unwrap_err();
        assert_eq!(err, SourceError::Timeout(Duration::from_millis(20)));
    }

    #[test]
    fn test_wait_first_value_propagates_source_error() {
        let mut s = stream(MockSource::new().fail(SourceError::Disconnected));
        assert_eq!(
            s.wait_first_value(None, Duration::ZERO),
            Err(SourceError::Disconnected)
        );
    }

    #[test]
    fn test_poll_accepts_zero_after_handshake() {
        let mut s = stream(MockSource::new().chunk("12\n").chunk("00\n-5\n"));
        s.wait_first_value(None, Duration::ZERO).unwrap();
        assert_eq!(s.poll(), vec![0, -5]);
    }

    #[test]
    fn test_poll_records_and_clears_errors() {
        let mock = MockSource::new()
            .chunk("10\n")
            .fail(SourceError::Io("framing".to_string()))
            .chunk("20\n");
        let mut s = stream(mock);
        s.wait_first_value(None, Duration::ZERO).unwrap();

        assert!(s.poll().is_empty());
        assert_eq!(
            s.last_error(),
            Some(&SourceError::Io("framing".to_string()))
        );

        assert_eq!(s.poll(), vec![20]);
        assert!(s.last_error().is_none());
    }

    #[test]
    fn test_repeated_error_is_reported_once() {
        let framing = SourceError::Io("framing".to_string());
        let mock = MockSource::new()
            .fail(framing.clone())
            .fail(framing.clone())
            .fail(SourceError::Disconnected)
            .chunk("30\n")
            .fail(SourceError::Disconnected);
        let mut s = stream(mock);

        assert!(s.poll().is_empty());
        assert!(s.poll().is_empty());
        assert_eq!(s.last_error(), Some(&framing));
        assert!(s.poll().is_empty());
        assert_eq!(s.last_error(), Some(&SourceError::Disconnected));
        assert_eq!(s.stats().read_errors, 3);

        assert_eq!(s.poll(), vec![30]);
        assert!(s.last_error().is_none());
        assert!(s.poll().is_empty());
        assert_eq!(s.stats().read_errors, 4);
    }

    #[test]
    fn test_record_error_flags_only_changes() {
        let mut s = stream(MockSource::new());
        let framing = SourceError::Io("framing".to_string());

        assert!(s.record_error(framing.clone()));
        assert!(!s.record_error(framing.clone()));
        assert!(s.record_error(SourceError::Disconnected));
        assert!(s.record_error(framing));
    }

    #[test]
    fn test_poll_empty_source() {
        let mut s = stream(MockSource::new());
        assert!(s.poll().is_empty());
        assert_eq!(s.describe(), "mock");
        assert_eq!(s.stats(), StreamStats::default());
    }
}
