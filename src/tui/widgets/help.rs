//! Help popup widget with key bindings and panel descriptions.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use super::popup;

/// Renders the help popup centered on screen with scroll support.
pub fn render_help(frame: &mut Frame, area: Rect, scroll: &mut usize) {
    // 60% width, 80% height, clamped to 40-80 x 10-30
    let width = (area.width * 60 / 100).clamp(40, 80);
    let height = (area.height * 80 / 100).clamp(10, 30);
    let inner = popup::render_frame(frame, popup::centered(area, width, height), "serplot help");

    let content = help_lines();
    let content_lines = content.len();

    let chunks = Layout::vertical([
        Constraint::Min(1),    // Content
        Constraint::Length(1), // Footer
    ])
    .split(inner);

    let visible_height = chunks[0].height as usize;
    let max_scroll = content_lines.saturating_sub(visible_height);
    if *scroll > max_scroll {
        *scroll = max_scroll;
    }

    let paragraph = Paragraph::new(content)
        .wrap(Wrap { trim: false })
        .scroll((*scroll as u16, 0))
        .style(Style::default().fg(Color::White));
    frame.render_widget(paragraph, chunks[0]);

    let scroll_info = if max_scroll > 0 {
        format!(" [{}/{}]", *scroll + 1, max_scroll + 1)
    } else {
        String::new()
    };
    let footer = Paragraph::new(Line::from(vec![
        Span::styled("Press ", Style::default().fg(Color::DarkGray)),
        Span::styled("?", Style::default().fg(Color::Yellow)),
        Span::styled(" or ", Style::default().fg(Color::DarkGray)),
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::styled(" to close, ", Style::default().fg(Color::DarkGray)),
        Span::styled("↑↓", Style::default().fg(Color::Yellow)),
        Span::styled(" to scroll", Style::default().fg(Color::DarkGray)),
        Span::styled(scroll_info, Style::default().fg(Color::DarkGray)),
    ]));
    frame.render_widget(footer, chunks[1]);
}

fn section(title: &'static str) -> Line<'static> {
    Line::from(Span::styled(title, Style::default().fg(Color::Yellow)))
}

fn key_line(key: &'static str, text: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<10}", key), Style::default().fg(Color::Cyan)),
        Span::raw(text),
    ])
}

fn help_lines() -> Vec<Line<'static>> {
    vec![
        section("Keys:"),
        key_line("Space, p", "freeze / unfreeze the display"),
        key_line("+  -", "zoom the growing-buffer panel in / out"),
        key_line("r", "clear history, restart from the last value"),
        key_line("?, H", "toggle this help"),
        key_line("q", "quit (asks for confirmation)"),
        key_line("Ctrl-C", "quit immediately"),
        Line::from(""),
        section("Panels:"),
        Line::from("Fixed window      - last N samples, shifted left on every value"),
        Line::from("Fixed, moving x   - same data, x axis follows the sample count"),
        Line::from("Growing buffer    - every sample since start; capacity doubles"),
        Line::from("                    when full; shows the last samples only,"),
        Line::from("                    dense ranges are peak-downsampled"),
        Line::from("Chunks            - last seconds on a time axis, one color per"),
        Line::from("                    chunk; oldest chunks are dropped"),
        Line::from(""),
        section("Footer counters:"),
        Line::from("lines        - complete lines received"),
        Line::from("rejected     - lines that were not an integer (or too short)"),
        Line::from("overflow     - runs of bytes without a newline that were dropped"),
        Line::from("read errors  - failed reads from the port or file"),
        Line::from(""),
        Line::from(Span::styled(
            "Samples keep arriving while the display is frozen.",
            Style::default().fg(Color::DarkGray),
        )),
    ]
}
