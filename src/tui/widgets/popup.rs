//! Frame shared by the popups: centered, cleared, bordered and titled.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::widgets::{Block, Borders, Clear};

use crate::tui::style::Styles;

/// Rectangle of `width` x `height` centered in `area`, clipped to it.
pub(super) fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height).intersection(area)
}

/// Clears `popup`, draws its border with `title`, and returns the inner area.
pub(super) fn render_frame(frame: &mut Frame, popup: Rect, title: &str) -> Rect {
    frame.render_widget(Clear, popup);
    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Styles::border());
    let inner = block.inner(popup);
    frame.render_widget(block, popup);
    inner
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_in_large_area() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(centered(area, 40, 10), Rect::new(30, 15, 40, 10));
    }

    #[test]
    fn test_centered_respects_area_offset() {
        let area = Rect::new(10, 5, 20, 10);
        assert_eq!(centered(area, 10, 4), Rect::new(15, 8, 10, 4));
    }

    #[test]
    fn test_centered_clipped_to_small_area() {
        let area = Rect::new(0, 0, 10, 4);
        let popup = centered(area, 40, 9);
        assert_eq!(popup, area);
    }
}
