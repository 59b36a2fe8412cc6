//! Accumulating buffer whose capacity doubles whenever it fills up.

use tracing::debug;

use super::downsample::peak;
use super::{PanelView, auto_range};

/// Buffer that keeps every sample.
#[derive(Debug, Clone)]
pub struct GrowBuffer {
    data: Vec<f64>,
    capacity: usize,
}

impl GrowBuffer {
    pub fn new(initial_capacity: usize) -> Self {
        let capacity = initial_capacity.max(1);
        Self {
            data: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends `value`. Returns `true` when the capacity was doubled.
    pub fn push(&mut self, value: f64) -> bool {
        self.data.push(value);
        if self.data.len() < self.capacity {
            return false;
        }

        self.capacity *= 2;
        self.data.reserve_exact(self.capacity - self.data.len());
        debug!(
            "Growing buffer doubled to {} samples ({} used)",
            self.capacity,
            self.data.len()
        );
        true
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Allocated sample slots. Always greater than `len()`.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn values(&self) -> &[f64] {
        &self.data
    }

    /// Panel with the newest sample at the right edge (x = -1) and the
    /// x axis spanning `view_width` samples.
    ///
    /// Only the visible part is drawn, peak-downsampled to `max_points`.
    pub fn view(&self, view_width: f64, max_points: usize) -> PanelView {
        let len = self.data.len();
        let x_min = -view_width;

        // First index with x = i - len >= x_min, minus one neighbour.
        let first_visible = (len as f64 + x_min).ceil().max(0.0) as usize;
        let start = first_visible.min(len).saturating_sub(1);

        let visible: Vec<(f64, f64)> = self.data[start..]
            .iter()
            .enumerate()
            .map(|(i, v)| ((start + i) as f64 - len as f64, *v))
            .collect();
        let series = vec![peak(&visible, max_points)];

        PanelView {
            title: format!("Growing buffer ({}/{})", len, self.capacity),
            x_label: "samples ago",
            x_bounds: [x_min, 0.0],
            y_bounds: auto_range(&series),
            series,
        }
    }
}
