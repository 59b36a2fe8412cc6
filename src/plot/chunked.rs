//! Time-based plot split into fixed-size chunks, one curve per chunk.

use std::collections::VecDeque;

use super::downsample::clip_to_view;
use super::{PanelView, auto_range};

/// Samples grouped into chunks of `chunk_size` points.
///
/// Every new chunk starts with the last point of the previous one so the
/// curves join. At most `max_chunks` chunks are kept.
#[derive(Debug, Clone)]
pub struct ChunkedBuffer {
    chunks: VecDeque<Vec<(f64, f64)>>,
    chunk_size: usize,
    max_chunks: usize,
    count: u64,
}

impl ChunkedBuffer {
    pub fn new(chunk_size: usize, max_chunks: usize) -> Self {
        Self {
            chunks: VecDeque::new(),
            chunk_size: chunk_size.max(1),
            max_chunks: max_chunks.max(1),
            count: 0,
        }
    }

    /// Adds the sample `value` taken at `t` seconds.
    pub fn push(&mut self, t: f64, value: f64) {
        let starts_chunk = self.count % self.chunk_size as u64 == 0;
        if starts_chunk || self.chunks.is_empty() {
            let mut chunk = Vec::with_capacity(self.chunk_size + 1);
            chunk.extend(self.last_point());
            self.chunks.push_back(chunk);
            while self.chunks.len() > self.max_chunks {
                self.chunks.pop_front();
            }
        }

        if let Some(chunk) = self.chunks.back_mut() {
            chunk.push((t, value));
        }
        self.count += 1;
    }

    fn last_point(&self) -> Option<(f64, f64)> {
        self.chunks.back().and_then(|c| c.last().copied())
    }

    /// Number of chunks currently kept.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Number of samples pushed since creation.
    pub fn sample_count(&self) -> u64 {
        self.count
    }

    pub fn chunks(&self) -> impl Iterator<Item = &[(f64, f64)]> {
        self.chunks.iter().map(Vec::as_slice)
    }

    /// Panel showing the last `time_window` seconds before `now`, with
    /// `x = t - now`.
    pub fn view(&self, now: f64, time_window: f64) -> PanelView {
        let series: Vec<Vec<(f64, f64)>> = self
            .chunks
            .iter()
            .map(|chunk| {
                let shifted: Vec<(f64, f64)> = chunk.iter().map(|&(t, v)| (t - now, v)).collect();
                clip_to_view(&shifted, -time_window, 0.0).to_vec()
            })
            .filter(|s| !s.is_empty())
            .collect();

        PanelView {
            title: format!("Chunks ({}/{})", self.chunks.len(), self.max_chunks),
            x_label: "time (s)",
            x_bounds: [-time_window, 0.0],
            y_bounds: auto_range(&series),
            series,
        }
    }
}
