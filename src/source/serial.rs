//! Serial port source.

use std::io::{self, Read, Write};
use std::time::Duration;

use serialport::SerialPort;
use tracing::{debug, info};

use super::{SampleSource, SourceError};

/// Default baud rate of the sensor firmware.
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// Byte that tells the device to start streaming.
pub const DEFAULT_START_BYTE: u8 = b'b';

/// Timeout of the short session used to send the start byte.
const START_SESSION_TIMEOUT: Duration = Duration::from_secs(1);

#[cfg(windows)]
const DEFAULT_PORT: &str = "COM10";
#[cfg(not(windows))]
const DEFAULT_PORT: &str = "/dev/ttyUSB0";

/// Serial connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialConfig {
    /// Port name (`COM10`, `/dev/ttyUSB0`, ...).
    pub port: String,
    /// Baud rate.
    pub baud_rate: u32,
    /// Byte sent before streaming starts. `None` skips the handshake write.
    pub start_byte: Option<u8>,
    /// Read timeout of the streaming session.
    pub read_timeout: Duration,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT.to_string(),
            baud_rate: DEFAULT_BAUD_RATE,
            start_byte: Some(DEFAULT_START_BYTE),
            read_timeout: Duration::from_millis(10),
        }
    }
}

/// Source reading from a serial port.
pub struct SerialSource {
    port: Box<dyn SerialPort>,
    name: String,
    baud_rate: u32,
}

impl SerialSource {
    /// Opens the port described by `config`.
    ///
    /// When a start byte is configured it is written in a separate short
    /// session that is closed again before the streaming session is opened.
    pub fn open(config: &SerialConfig) -> Result<Self, SourceError> {
        if let Some(byte) = config.start_byte {
            send_start_byte(config, byte)?;
        }

        let port = serialport::new(&config.port, config.baud_rate)
            .timeout(config.read_timeout)
            .open()
            .map_err(|e| open_error(config, e))?;

        info!(
            "Serial port '{}' opened at {} baud",
            config.port, config.baud_rate
        );

        Ok(Self {
            port,
            name: config.port.clone(),
            baud_rate: config.baud_rate,
        })
    }

    /// Lists the names of serial ports present on this machine.
    pub fn available_ports() -> Result<Vec<String>, SourceError> {
        let ports = serialport::available_ports()?;
        Ok(ports.into_iter().map(|p| p.port_name).collect())
    }
}

fn send_start_byte(config: &SerialConfig, byte: u8) -> Result<(), SourceError> {
    let mut port = serialport::new(&config.port, config.baud_rate)
        .timeout(START_SESSION_TIMEOUT)
        .open()
        .map_err(|e| open_error(config, e))?;
    port.write_all(&[byte])?;
    port.flush()?;
    debug!("Sent start byte 0x{:02x} to '{}'", byte, config.port);
    Ok(())
}

fn open_error(config: &SerialConfig, e: serialport::Error) -> SourceError {
    SourceError::Open(format!(
        "serial port '{}' at {} baud: {}",
        config.port, config.baud_rate, e
    ))
}

impl SampleSource for SerialSource {
    fn read_available(&mut self) -> Result<Vec<u8>, SourceError> {
        let waiting = self.port.bytes_to_read()? as usize;
        if waiting == 0 {
            return Ok(Vec::new());
        }

        let mut buf = vec![0u8; waiting];
        let n = match self.port.read(&mut buf) {
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::TimedOut => 0,
            Err(e) => return Err(e.into()),
        };
        buf.truncate(n);
        Ok(buf)
    }

    fn describe(&self) -> String {
        format!("{} @ {}", self.name, self.baud_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SerialConfig::default();
        assert_eq!(config.baud_rate, 115_200);
        assert_eq!(config.start_byte, Some(b'b'));
        assert!(!config.port.is_empty());
    }

    #[test]
    fn test_open_missing_port_fails() {
        let config = SerialConfig {
            port: "/nonexistent/serplot-tty".to_string(),
            start_byte: None,
            ..SerialConfig::default()
        };
        match SerialSource::open(&config) {
            Err(SourceError::Open(msg)) => assert!(msg.contains("/nonexistent/serplot-tty")),
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("opening a missing port must fail"),
        }
    }

    #[test]
    fn test_start_byte_session_fails_first() {
        // With a start byte the short session is opened first and reports the error
        let config = SerialConfig {
            port: "/nonexistent/serplot-tty".to_string(),
            ..SerialConfig::default()
        };
        assert!(matches!(
            SerialSource::open(&config),
            Err(SourceError::Open(_))
        ));
    }
}
