//! Fixed-size window that shifts one sample left on every push.

use std::collections::VecDeque;

use super::{PanelView, auto_range};

/// Fixed-capacity sample window.
///
/// The window is always full: it starts filled with the seed value and each
/// push drops the oldest sample.
#[derive(Debug, Clone)]
pub struct ShiftBuffer {
    data: VecDeque<f64>,
    ptr: u64,
}

impl ShiftBuffer {
    /// Creates a window of `capacity` samples, all set to `seed`.
    pub fn new(capacity: usize, seed: f64) -> Self {
        let capacity = capacity.max(1);
        Self {
            data: std::iter::repeat_n(seed, capacity).collect(),
            ptr: 0,
        }
    }

    /// Shifts the window and appends `value`.
    pub fn push(&mut self, value: f64) {
        self.data.pop_front();
        self.data.push_back(value);
        self.ptr += 1;
    }

    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Number of values pushed since creation.
    pub fn ptr(&self) -> u64 {
        self.ptr
    }

    pub fn latest(&self) -> Option<f64> {
        self.data.back().copied()
    }

    /// Values, oldest first.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.data.iter().copied()
    }

    /// Panel with the window drawn at fixed x positions.
    pub fn view(&self) -> PanelView {
        self.view_at(0.0, "Fixed window")
    }

    /// Panel with the window positioned at `ptr`, so the x axis scrolls
    /// with the data.
    pub fn scrolling_view(&self) -> PanelView {
        self.view_at(self.ptr as f64, "Fixed window, moving x")
    }

    fn view_at(&self, offset: f64, title: &str) -> PanelView {
        let points: Vec<(f64, f64)> = self
            .data
            .iter()
            .enumerate()
            .map(|(i, v)| (offset + i as f64, *v))
            .collect();
        let series = vec![points];
        PanelView {
            title: format!("{} ({})", title, self.capacity()),
            x_label: "sample",
            x_bounds: [offset, offset + (self.capacity() - 1) as f64],
            y_bounds: auto_range(&series),
            series,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_window_is_full() {
        let buf = ShiftBuffer::new(5, 3.0);
        assert_eq!(buf.capacity(), 5);
        assert!(buf.values().all(|v| v == 3.0));
        assert_eq!(buf.ptr(), 0);
    }

    #[test]
    fn test_push_shifts_left() {
        let mut buf = ShiftBuffer::new(3, 0.0);
        buf.push(1.0);
        buf.push(2.0);
        buf.push(3.0);
        buf.push(4.0);

        assert_eq!(buf.values().collect::<Vec<_>>(), vec![2.0, 3.0, 4.0]);
        assert_eq!(buf.capacity(), 3);
        assert_eq!(buf.ptr(), 4);
        assert_eq!(buf.latest(), Some(4.0));
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let mut buf = ShiftBuffer::new(0, 1.0);
        buf.push(2.0);
        assert_eq!(buf.values().collect::<Vec<_>>(), vec![2.0]);
    }

    #[test]
    fn test_views_differ_only_in_x_offset() {
        let mut buf = ShiftBuffer::new(4, 10.0);
        buf.push(20.0);
        buf.push(30.0);

        let fixed = buf.view();
        assert_eq!(fixed.x_bounds, [0.0, 3.0]);
        assert_eq!(fixed.series[0][0], (0.0, 10.0));
        assert_eq!(fixed.series[0][3], (3.0, 30.0));

        let moving = buf.scrolling_view();
        assert_eq!(moving.x_bounds, [2.0, 5.0]);
        assert_eq!(moving.series[0][0], (2.0, 10.0));
        assert_eq!(moving.series[0][3], (5.0, 30.0));
        assert_eq!(fixed.y_bounds, moving.y_bounds);
    }
}
