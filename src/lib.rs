//! serplot - real-time scrolling plots for integer samples from a serial device.
//!
//! The library is split along the data path:
//! - `source` - byte sources (serial port, tailed file, scripted mock)
//! - `decode` - newline framing and integer parsing
//! - `stream` - start handshake and per-tick polling
//! - `plot` - the three scrolling strategies and their panel views
//! - `tui` - interactive terminal viewer

pub mod decode;
pub mod plot;
pub mod source;
pub mod stream;
pub mod tui;
