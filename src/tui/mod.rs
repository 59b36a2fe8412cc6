//! Terminal user interface for serplot.
//!
//! Draws the four live panels (fixed window twice, growing buffer, chunks)
//! and handles the keyboard. Samples are polled on every tick.

mod app;
mod event;
mod input;
mod render;
mod state;
mod style;
mod widgets;

pub use app::App;
pub use state::AppState;
