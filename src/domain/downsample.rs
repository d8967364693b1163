// Deterministic stride downsampling for bounded-size rendering
use super::telemetry::{ParameterSeries, Sample};

/// Default render budget per chart series.
pub const DEFAULT_MAX_POINTS: usize = 50;

/// Reduce a series to at most `max_points` samples.
///
/// A series that already fits is returned as-is. Otherwise every
/// `ceil(n / max_points)`-th sample is kept starting at index 0, which
/// bounds the result by `max_points`, preserves order, and always retains
/// the first sample. The last sample is not guaranteed to survive; the
/// stride contract is what downstream renderers expect.
pub fn downsample(samples: &[Sample], max_points: usize) -> Vec<Sample> {
    if samples.len() <= max_points {
        return samples.to_vec();
    }
    if max_points == 0 {
        return Vec::new();
    }

    let step = samples.len().div_ceil(max_points);
    samples.iter().step_by(step).cloned().collect()
}

pub fn downsample_series(series: &ParameterSeries, max_points: usize) -> ParameterSeries {
    ParameterSeries::new(
        series.parameter,
        downsample(&series.samples, max_points),
        series.statistics,
    )
}
