//! Line-chart panel for one plot view.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType};

use crate::plot::PanelView;
use crate::tui::style::Styles;

/// Renders `view` as a chart, coloring curve `i` with `palette[i % len]`.
pub fn render_panel(frame: &mut Frame, area: Rect, view: &PanelView, palette: &[Color]) {
    let datasets: Vec<Dataset> = view
        .series
        .iter()
        .enumerate()
        .map(|(i, points)| {
            let color = palette
                .get(i % palette.len().max(1))
                .copied()
                .unwrap_or(Color::White);
            Dataset::default()
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(color))
                .data(points)
        })
        .collect();

    let block = Block::default()
        .title(format!(" {} ", view.title))
        .borders(Borders::ALL)
        .border_style(Styles::border());

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .title(Span::styled(view.x_label, Styles::dim()))
                .style(Styles::axis())
                .bounds(view.x_bounds)
                .labels(axis_labels(view.x_bounds)),
        )
        .y_axis(
            Axis::default()
                .style(Styles::axis())
                .bounds(view.y_bounds)
                .labels(axis_labels(view.y_bounds)),
        );
    frame.render_widget(chart, area);
}

/// Low, middle and high labels for an axis.
fn axis_labels(bounds: [f64; 2]) -> Vec<Span<'static>> {
    let mid = (bounds[0] + bounds[1]) / 2.0;
    [bounds[0], mid, bounds[1]]
        .into_iter()
        .map(|v| Span::raw(format_tick(v)))
        .collect()
}

/// Formats an axis value compactly: integers without decimals, large values
/// with a k/M suffix.
pub(crate) fn format_tick(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if abs >= 10_000.0 {
        format!("{:.1}k", value / 1_000.0)
    } else if (value - value.round()).abs() < 1e-9 {
        format!("{}", value.round() as i64)
    } else if abs >= 10.0 {
        format!("{:.1}", value)
    } else {
        format!("{:.2}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_tick() {
        assert_eq!(format_tick(0.0), "0");
        assert_eq!(format_tick(-300.0), "-300");
        assert_eq!(format_tick(1.5), "1.50");
        assert_eq!(format_tick(-25.25), "-25.2");
        assert_eq!(format_tick(12_500.0), "12.5k");
        assert_eq!(format_tick(2_000_000.0), "2.0M");
    }

    #[test]
    fn test_axis_labels_span_bounds() {
        let labels = axis_labels([-10.0, 0.0]);
        let text: Vec<String> = labels.iter().map(|s| s.content.to_string()).collect();
        assert_eq!(text, vec!["-10", "-5", "0"]);
    }
}
