//! View clipping and peak downsampling for dense series.

/// Returns the part of `points` inside `[x_min, x_max]`, plus one neighbour
/// on each side so lines run to the panel edges.
///
/// `points` must be sorted by x. Returns an empty slice when no point falls
/// inside the range.
pub fn clip_to_view(points: &[(f64, f64)], x_min: f64, x_max: f64) -> &[(f64, f64)] {
    let first_in = points.partition_point(|p| p.0 < x_min);
    let end_in = points.partition_point(|p| p.0 <= x_max);
    if first_in >= end_in {
        return &[];
    }
    let start = first_in.saturating_sub(1);
    let end = (end_in + 1).min(points.len());
    &points[start..end]
}

/// Reduces `points` to at most `max_points` by keeping the minimum and
/// maximum of each bin.
///
/// Spikes survive downsampling, which plain decimation would drop.
pub fn peak(points: &[(f64, f64)], max_points: usize) -> Vec<(f64, f64)> {
    if max_points < 2 || points.len() <= max_points {
        return points.to_vec();
    }

    let bins = max_points / 2;
    let bin_len = points.len().div_ceil(bins);

    let mut out = Vec::with_capacity(max_points);
    for bin in points.chunks(bin_len) {
        let x = bin[0].0;
        let (lo, hi) = bin
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p.1), hi.max(p.1))
            });
        out.push((x, lo));
        out.push((x, hi));
    }
    out
}
