//! Scripted source for tests and demos.

use std::collections::VecDeque;

use super::{SampleSource, SourceError};

enum Step {
    Bytes(Vec<u8>),
    Fail(SourceError),
}

/// Source that replays a fixed script of reads.
///
/// Each call to `read_available` consumes one scripted step. Once the script
/// is exhausted every read returns no bytes.
#[derive(Default)]
pub struct MockSource {
    steps: VecDeque<Step>,
    reads: usize,
}

impl MockSource {
    /// Creates an empty mock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one read returning `bytes`.
    pub fn chunk(mut self, bytes: impl AsRef<[u8]>) -> Self {
        self.steps.push_back(Step::Bytes(bytes.as_ref().to_vec()));
        self
    }

    /// Appends one read returning nothing.
    pub fn idle(self) -> Self {
        self.chunk([])
    }

    /// Appends one read failing with `error`.
    pub fn fail(mut self, error: SourceError) -> Self {
        self.steps.push_back(Step::Fail(error));
        self
    }

    /// Appends one read per value, each a newline-terminated line.
    pub fn lines<I, T>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: std::fmt::Display,
    {
        for v in values {
            self = self.chunk(format!("{}\n", v));
        }
        self
    }

    /// Number of reads served so far.
    pub fn reads(&self) -> usize {
        self.reads
    }

    /// Returns `true` when every scripted step has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.steps.is_empty()
    }
}

impl SampleSource for MockSource {
    fn read_available(&mut self) -> Result<Vec<u8>, SourceError> {
        self.reads += 1;
        match self.steps.pop_front() {
            Some(Step::Bytes(b)) => Ok(b),
            Some(Step::Fail(e)) => Err(e),
            None => Ok(Vec::new()),
        }
    }

    fn describe(&self) -> String {
        "mock".to_string()
    }
}
