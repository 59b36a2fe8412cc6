//! Color scheme and styles.

use ratatui::style::{Color, Modifier, Style};

/// Color palette.
pub struct Theme;

impl Theme {
    // Header bar
    pub const HEADER_BG: Color = Color::Blue;
    pub const HEADER_FG: Color = Color::White;

    // Foreground colors
    pub const FG: Color = Color::White;
    pub const FG_DIM: Color = Color::DarkGray;

    // Highlight colors
    pub const HIGHLIGHT_PAUSED: Color = Color::Yellow;
    pub const HIGHLIGHT_CRITICAL: Color = Color::Red;

    // Panel chrome
    pub const BORDER: Color = Color::Cyan;
    pub const AXIS: Color = Color::Gray;

    // Curves
    pub const CURVE: Color = Color::Yellow;
    pub const CURVE_ALT: Color = Color::Green;
    pub const GROW_CURVE: Color = Color::Cyan;

    /// Colors cycled through by the chunked panel, one per chunk.
    pub const CHUNK_PALETTE: [Color; 6] = [
        Color::LightRed,
        Color::LightGreen,
        Color::LightYellow,
        Color::LightBlue,
        Color::LightMagenta,
        Color::LightCyan,
    ];
}

/// Pre-defined styles.
pub struct Styles;

impl Styles {
    /// Header bar style.
    pub fn header() -> Style {
        Style::default()
            .fg(Theme::HEADER_FG)
            .bg(Theme::HEADER_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Paused indicator in the header.
    pub fn paused() -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(Theme::HIGHLIGHT_PAUSED)
            .add_modifier(Modifier::BOLD)
    }

    /// Status message style (yellow).
    pub fn status() -> Style {
        Style::default()
            .fg(Theme::HIGHLIGHT_PAUSED)
            .bg(Theme::HEADER_BG)
    }

    /// Error style (red).
    pub fn critical() -> Style {
        Style::default()
            .fg(Theme::HIGHLIGHT_CRITICAL)
            .add_modifier(Modifier::BOLD)
    }

    /// Dimmed text style.
    pub fn dim() -> Style {
        Style::default().fg(Theme::FG_DIM)
    }

    /// Panel border style.
    pub fn border() -> Style {
        Style::default().fg(Theme::BORDER)
    }

    /// Axis line and label style.
    pub fn axis() -> Style {
        Style::default().fg(Theme::AXIS)
    }

    /// Help text style.
    pub fn help() -> Style {
        Style::default().fg(Theme::FG_DIM)
    }

    /// Help key style (highlighted keys in help line).
    pub fn help_key() -> Style {
        Style::default().fg(Theme::FG).add_modifier(Modifier::BOLD)
    }
}
