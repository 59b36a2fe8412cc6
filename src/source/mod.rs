//! Byte sources that feed the sample decoder.
//!
//! The `SampleSource` trait lets the viewer read from a real serial port,
//! from a file that another process appends to, or from a scripted mock in
//! tests, through one interface.

mod file;
pub mod mock;
mod serial;

pub use file::FileSource;
pub use mock::MockSource;
pub use serial::{DEFAULT_BAUD_RATE, DEFAULT_START_BYTE, SerialConfig, SerialSource};

use std::io;
use std::time::Duration;

/// Error types that can occur while reading from a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The device or file could not be opened.
    Open(String),
    /// I/O error while reading.
    Io(String),
    /// No usable value arrived within the given time.
    Timeout(Duration),
    /// The source is gone and will not produce more data.
    Disconnected,
}

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceError::Open(msg) => write!(f, "Open error: {}", msg),
            SourceError::Io(msg) => write!(f, "I/O error: {}", msg),
            SourceError::Timeout(d) => write!(f, "No value received within {:?}", d),
            SourceError::Disconnected => write!(f, "Source disconnected"),
        }
    }
}

impl std::error::Error for SourceError {}

impl From<io::Error> for SourceError {
    fn from(e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::BrokenPipe | io::ErrorKind::UnexpectedEof => SourceError::Disconnected,
            _ => SourceError::Io(e.to_string()),
        }
    }
}

impl From<serialport::Error> for SourceError {
    fn from(e: serialport::Error) -> Self {
        match e.kind() {
            serialport::ErrorKind::NoDevice => SourceError::Disconnected,
            _ => SourceError::Io(e.to_string()),
        }
    }
}

/// Abstraction for anything that produces raw sample bytes.
///
/// The trait is object-safe and is used as `Box<dyn SampleSource>`.
pub trait SampleSource: Send {
    /// Reads the bytes that are currently available.
    ///
    /// Returns an empty vector when nothing is waiting. Implementations may
    /// block for at most a short read timeout.
    fn read_available(&mut self) -> Result<Vec<u8>, SourceError>;

    /// Returns a short human-readable label (port name, file path).
    fn describe(&self) -> String;
}
