//! Main rendering logic.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use super::state::AppState;
use super::style::Theme;
use super::widgets::{
    render_footer, render_header, render_help, render_panel, render_quit_confirm,
};
use crate::plot::PlotSet;
use crate::stream::StreamStats;

/// Renders the whole screen.
///
/// `plots` and `stats` are the frozen copies while paused. `now` is the time
/// in seconds since start that the chunked panel ends at.
pub fn render(
    frame: &mut Frame,
    state: &mut AppState,
    plots: &PlotSet,
    stats: &StreamStats,
    now: f64,
) {
    let area = frame.area();

    let chunks = Layout::vertical([
        Constraint::Length(1),  // Header
        Constraint::Ratio(1, 3), // Fixed window panels
        Constraint::Ratio(1, 3), // Growing buffer
        Constraint::Ratio(1, 3), // Chunks
        Constraint::Length(1),  // Footer
    ])
    .split(area);

    render_header(frame, chunks[0], state, stats, plots.last_value());

    let top = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);
    let shift = plots.shift();
    render_panel(frame, top[0], &shift.view(), &[Theme::CURVE]);
    render_panel(frame, top[1], &shift.scrolling_view(), &[Theme::CURVE_ALT]);

    // Braille cells hold two points horizontally
    let max_points = (chunks[2].width as usize).saturating_mul(2).max(2);
    let grow = plots.grow().view(state.grow_view, max_points);
    render_panel(frame, chunks[2], &grow, &[Theme::GROW_CURVE]);

    let chunked = plots.chunked().view(now, plots.config().time_window);
    render_panel(frame, chunks[3], &chunked, &Theme::CHUNK_PALETTE);

    render_footer(frame, chunks[4], state, stats);

    // Popups are rendered last to overlay everything
    if state.show_help {
        render_help(frame, area, &mut state.help_scroll);
    }
    if state.show_quit_confirm {
        render_quit_confirm(frame, area, state);
    }
}
