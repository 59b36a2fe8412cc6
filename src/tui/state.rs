//! Viewer state shared between input handling and rendering.

use crate::stream::StreamStats;

/// Narrowest visible width of the growing-buffer panel, in samples.
pub const MIN_GROW_VIEW: f64 = 10.0;
/// Widest visible width of the growing-buffer panel, in samples.
pub const MAX_GROW_VIEW: f64 = 100_000.0;

/// Main application state.
#[derive(Debug)]
pub struct AppState {
    /// Display frozen; samples are still ingested.
    pub paused: bool,
    /// Help popup visible.
    pub show_help: bool,
    /// Help popup scroll offset.
    pub help_scroll: usize,
    /// Quit confirmation popup visible.
    pub show_quit_confirm: bool,
    /// Temporary message shown in the header until the next key press.
    pub status_message: Option<String>,
    /// Samples visible in the growing-buffer panel.
    pub grow_view: f64,
    /// Label of the sample source.
    pub source_label: String,
    /// Stream counters as of the last tick.
    pub stats: StreamStats,
    /// Last source error, cleared by the next successful read.
    pub last_error: Option<String>,
}

impl AppState {
    pub fn new(source_label: impl Into<String>, grow_view: f64) -> Self {
        Self {
            paused: false,
            show_help: false,
            help_scroll: 0,
            show_quit_confirm: false,
            status_message: None,
            grow_view: grow_view.clamp(MIN_GROW_VIEW, MAX_GROW_VIEW),
            source_label: source_label.into(),
            stats: StreamStats::default(),
            last_error: None,
        }
    }

    /// Returns `true` if a popup captures input.
    pub fn any_popup_open(&self) -> bool {
        self.show_help || self.show_quit_confirm
    }

    /// Halves the visible width of the growing-buffer panel.
    pub fn zoom_in(&mut self) {
        self.grow_view = (self.grow_view / 2.0).max(MIN_GROW_VIEW);
    }

    /// Doubles the visible width of the growing-buffer panel.
    pub fn zoom_out(&mut self) {
        self.grow_view = (self.grow_view * 2.0).min(MAX_GROW_VIEW);
    }
}
