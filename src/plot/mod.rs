//! Scrolling-plot strategies.
//!
//! Every received value goes to three independent buffers:
//! - `ShiftBuffer` - fixed-size window, drawn twice (fixed and moving x axis)
//! - `GrowBuffer` - keeps everything, doubling its capacity when full
//! - `ChunkedBuffer` - time axis, one curve per chunk of samples
//!
//! Each buffer renders itself into a `PanelView` that the TUI draws.

pub mod downsample;

mod chunked;
mod grow;
mod shift;

pub use chunked::ChunkedBuffer;
pub use grow::GrowBuffer;
pub use shift::ShiftBuffer;

/// Sizes of the three buffers and their default view ranges.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotConfig {
    /// Samples in the fixed window.
    pub window: usize,
    /// Initial capacity of the growing buffer.
    pub grow_capacity: usize,
    /// Samples visible in the growing buffer's panel.
    pub grow_view: f64,
    /// Samples per chunk.
    pub chunk_size: usize,
    /// Chunks kept before the oldest is dropped.
    pub max_chunks: usize,
    /// Seconds visible in the chunked panel.
    pub time_window: f64,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            window: 300,
            grow_capacity: 100,
            grow_view: 100.0,
            chunk_size: 100,
            max_chunks: 10,
            time_window: 10.0,
        }
    }
}

impl PlotConfig {
    /// Checks that every size is usable.
    pub fn validate(&self) -> Result<(), String> {
        if self.window < 2 {
            return Err(format!("window must be at least 2, got {}", self.window));
        }
        if self.grow_capacity == 0 {
            return Err("grow capacity must be positive".to_string());
        }
        if !(self.grow_view.is_finite() && self.grow_view > 0.0) {
            return Err(format!("grow view must be positive, got {}", self.grow_view));
        }
        if self.chunk_size == 0 {
            return Err("chunk size must be positive".to_string());
        }
        if self.max_chunks == 0 {
            return Err("max chunks must be positive".to_string());
        }
        if !(self.time_window.is_finite() && self.time_window > 0.0) {
            return Err(format!(
                "time window must be positive, got {}",
                self.time_window
            ));
        }
        Ok(())
    }
}

/// Everything a panel needs to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelView {
    pub title: String,
    pub x_label: &'static str,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    /// One entry per curve.
    pub series: Vec<Vec<(f64, f64)>>,
}

impl PanelView {
    /// Total number of points across all curves.
    pub fn point_count(&self) -> usize {
        self.series.iter().map(Vec::len).sum()
    }
}

/// y range covering every point with 5% padding.
///
/// A flat series gets +-1 around its value, no points at all gives [-1, 1].
pub(crate) fn auto_range(series: &[Vec<(f64, f64)>]) -> [f64; 2] {
    let (lo, hi) = series
        .iter()
        .flatten()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.1), hi.max(p.1))
        });

    if lo > hi {
        return [-1.0, 1.0];
    }
    if lo == hi {
        return [lo - 1.0, hi + 1.0];
    }
    let pad = (hi - lo) * 0.05;
    [lo - pad, hi + pad]
}

/// The three buffers fed from one sample stream.
#[derive(Debug, Clone)]
pub struct PlotSet {
    config: PlotConfig,
    shift: ShiftBuffer,
    grow: GrowBuffer,
    chunked: ChunkedBuffer,
    last_value: i64,
    updates: u64,
}

impl PlotSet {
    /// Creates the buffers and seeds all three with `first_value` at t = 0.
    pub fn new(config: PlotConfig, first_value: i64) -> Self {
        let mut set = Self {
            shift: ShiftBuffer::new(config.window, first_value as f64),
            grow: GrowBuffer::new(config.grow_capacity),
            chunked: ChunkedBuffer::new(config.chunk_size, config.max_chunks),
            config,
            last_value: first_value,
            updates: 0,
        };
        set.grow.push(first_value as f64);
        set.chunked.push(0.0, first_value as f64);
        set
    }

    /// Forwards `value`, received at `t` seconds, to all three buffers.
    pub fn update(&mut self, value: i64, t: f64) {
        let v = value as f64;
        self.shift.push(v);
        self.grow.push(v);
        self.chunked.push(t, v);
        self.last_value = value;
        self.updates += 1;
    }

    /// Drops all history and seeds fresh buffers with `seed` at `t`.
    pub fn reset(&mut self, seed: i64, t: f64) {
        let config = self.config.clone();
        *self = Self::new(config, seed);
        self.chunked = ChunkedBuffer::new(self.config.chunk_size, self.config.max_chunks);
        self.chunked.push(t, seed as f64);
    }

    pub fn config(&self) -> &PlotConfig {
        &self.config
    }

    pub fn shift(&self) -> &ShiftBuffer {
        &self.shift
    }

    pub fn grow(&self) -> &GrowBuffer {
        &self.grow
    }

    pub fn chunked(&self) -> &ChunkedBuffer {
        &self.chunked
    }

    /// Most recent value (the seed before any update).
    pub fn last_value(&self) -> i64 {
        self.last_value
    }

    /// Values received after seeding.
    pub fn updates(&self) -> u64 {
        self.updates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_layout() {
        let config = PlotConfig::default();
        assert_eq!(config.window, 300);
        assert_eq!(config.grow_capacity, 100);
        assert_eq!(config.chunk_size, 100);
        assert_eq!(config.max_chunks, 10);
        assert_eq!(config.time_window, 10.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let bad = PlotConfig {
            window: 1,
            ..PlotConfig::default()
        };
        assert!(bad.validate().unwrap_err().contains("window"));

        let bad = PlotConfig {
            chunk_size: 0,
            ..PlotConfig::default()
        };
        assert!(bad.validate().is_err());

        let bad = PlotConfig {
            time_window: f64::NAN,
            ..PlotConfig::default()
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_auto_range() {
        assert_eq!(auto_range(&[]), [-1.0, 1.0]);
        assert_eq!(auto_range(&[vec![(0.0, 4.0), (1.0, 4.0)]]), [3.0, 5.0]);

        let r = auto_range(&[vec![(0.0, 0.0)], vec![(1.0, 100.0)]]);
        assert_eq!(r, [-5.0, 105.0]);
    }

    #[test]
    fn test_plot_set_seeds_all_buffers() {
        let set = PlotSet::new(PlotConfig::default(), 512);

        assert!(set.shift().values().all(|v| v == 512.0));
        assert_eq!(set.grow().values(), &[512.0]);
        assert_eq!(set.chunked().chunk_count(), 1);
        assert_eq!(set.last_value(), 512);
        assert_eq!(set.updates(), 0);
    }

    #[test]
    fn test_plot_set_update_feeds_all_buffers() {
        let mut set = PlotSet::new(PlotConfig::default(), 1);
        for i in 0..250 {
            set.update(i, i as f64 * 0.01);
        }

        assert_eq!(set.shift().latest(), Some(249.0));
        assert_eq!(set.shift().ptr(), 250);
        assert_eq!(set.grow().len(), 251);
        assert_eq!(set.grow().capacity(), 400);
        assert_eq!(set.chunked().sample_count(), 251);
        assert_eq!(set.chunked().chunk_count(), 3);
        assert_eq!(set.last_value(), 249);
        assert_eq!(set.updates(), 250);
    }

    #[test]
    fn test_plot_set_reset() {
        let mut set = PlotSet::new(PlotConfig::default(), 1);
        for i in 0..50 {
            set.update(i, i as f64);
        }
        set.reset(-3, 60.0);

        assert_eq!(set.grow().values(), &[-3.0]);
        assert_eq!(set.shift().ptr(), 0);
        let first_chunk = set.chunked().chunks().next().unwrap();
        assert_eq!(first_chunk, &[(60.0, -3.0)]);
        assert_eq!(set.last_value(), -3);
    }
}
