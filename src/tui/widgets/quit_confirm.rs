//! Quit confirmation popup with a summary of the session.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::popup;
use crate::tui::state::AppState;
use crate::tui::style::Styles;

/// Renders the quit confirmation popup.
///
/// Uses the live counters, so the summary includes values received while
/// the display was frozen.
pub fn render_quit_confirm(frame: &mut Frame, area: Rect, state: &AppState) {
    let width = (area.width / 2).clamp(44, 64);
    let inner = popup::render_frame(frame, popup::centered(area, width, 8), "Exit serplot");

    let stats = &state.stats;
    let content = vec![
        Line::from(format!("Stop reading from {}?", state.source_label)),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "{} values received, {} lines rejected",
                stats.values, stats.decode.rejected
            ),
            Styles::dim(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter", Styles::help_key()),
            Span::styled("/", Styles::help()),
            Span::styled("q", Styles::help_key()),
            Span::styled(" quit   ", Styles::help()),
            Span::styled("Esc", Styles::help_key()),
            Span::styled("/", Styles::help()),
            Span::styled("n", Styles::help_key()),
            Span::styled(" keep plotting", Styles::help()),
        ]),
    ];

    frame.render_widget(Paragraph::new(content).alignment(Alignment::Center), inner);
}
