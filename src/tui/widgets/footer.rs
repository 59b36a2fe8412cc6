//! Footer line with decoder counters and key hints.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::stream::StreamStats;
use crate::tui::state::AppState;
use crate::tui::style::Styles;

const HINTS: [(&str, &str); 5] = [
    ("q", "quit"),
    ("space", "pause"),
    ("+/-", "zoom"),
    ("r", "reset"),
    ("?", "help"),
];

/// Renders the footer line with the counters of the displayed snapshot.
pub fn render_footer(frame: &mut Frame, area: Rect, state: &AppState, shown: &StreamStats) {
    let chunks = Layout::horizontal([Constraint::Min(30), Constraint::Length(46)]).split(area);

    let decode = shown.decode;
    let counters_style = if decode.rejected > 0 || decode.overflows > 0 || shown.read_errors > 0 {
        Styles::status()
    } else {
        Styles::dim()
    };
    let counters = format!(
        " lines {}  rejected {}  overflow {}  read errors {}  view {} samples",
        decode.lines, decode.rejected, decode.overflows, shown.read_errors, state.grow_view
    );
    frame.render_widget(Paragraph::new(counters).style(counters_style), chunks[0]);

    let spans: Vec<Span> = HINTS
        .iter()
        .flat_map(|(key, text)| {
            vec![
                Span::styled(*key, Styles::help_key()),
                Span::styled(format!(" {}  ", text), Styles::help()),
            ]
        })
        .collect();
    frame.render_widget(Paragraph::new(Line::from(spans)), chunks[1]);
}
