//! Header widget showing time, mode, source, and the latest value.

use chrono::Local;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::widgets::Paragraph;

use crate::stream::StreamStats;
use crate::tui::state::AppState;
use crate::tui::style::{Styles, Theme};

/// Renders the header bar.
///
/// `shown` and `last_value` describe the displayed plots. While paused, values
/// received since the freeze are shown as `(+k)`.
pub fn render_header(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    shown: &StreamStats,
    last_value: i64,
) {
    let chunks = Layout::horizontal([
        Constraint::Length(21), // Time
        Constraint::Length(9),  // Mode
        Constraint::Min(20),    // Source
        Constraint::Length(28), // Count / last value
        Constraint::Length(40), // Status or error
    ])
    .split(area);

    let time_str = Local::now().format(" %Y-%m-%d %H:%M:%S").to_string();
    frame.render_widget(Paragraph::new(time_str).style(Styles::header()), chunks[0]);

    let (mode_str, mode_style) = if state.paused {
        (" PAUSED ", Styles::paused())
    } else {
        (" LIVE ", Styles::header())
    };
    frame.render_widget(Paragraph::new(mode_str).style(mode_style), chunks[1]);

    let source = Paragraph::new(state.source_label.as_str()).style(Styles::header());
    frame.render_widget(source, chunks[2]);

    let counts = format!(
        "n={}{} last={}",
        shown.values,
        pending_suffix(shown, &state.stats),
        last_value
    );
    frame.render_widget(Paragraph::new(counts).style(Styles::header()), chunks[3]);

    let (right_content, right_style) = if let Some(msg) = &state.status_message {
        (msg.clone(), Styles::status())
    } else if let Some(err) = &state.last_error {
        (err.clone(), Styles::critical().bg(Theme::HEADER_BG))
    } else {
        (String::new(), Styles::header())
    };
    frame.render_widget(Paragraph::new(right_content).style(right_style), chunks[4]);
}

fn pending_suffix(shown: &StreamStats, live: &StreamStats) -> String {
    match live.values.saturating_sub(shown.values) {
        0 => String::new(),
        k => format!(" (+{})", k),
    }
}
