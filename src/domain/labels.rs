// Axis label formatting driven by series density
use super::density::DensityTier;
use super::telemetry::Sample;
use super::timestamp::Timestamp;

/// Format a time label at the granularity of the series' density tier.
///
/// The tier is decided once per series after downsampling, so every point
/// of a chart carries the same granularity. When the timestamp never parsed
/// the raw wire label passes through untouched.
pub fn format_label(timestamp: Option<Timestamp>, raw_label: &str, tier: DensityTier) -> String {
    let Some(timestamp) = timestamp else {
        return raw_label.to_string();
    };

    match tier {
        DensityTier::Dense => timestamp.hour_minute(),
        DensityTier::Medium => timestamp.hour_minute_second(),
        DensityTier::Sparse => timestamp.full(),
    }
}

pub fn sample_label(sample: &Sample, tier: DensityTier) -> String {
    format_label(sample.timestamp, &sample.time_label, tier)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Sample {
        Sample::new(Timestamp::parse("2025-01-15T08:05:42Z").unwrap(), 1.0)
    }

    #[test]
    fn test_dense_trims_to_hour_minute() {
        assert_eq!(sample_label(&sample(), DensityTier::Dense), "08:05");
    }

    #[test]
    fn test_medium_keeps_seconds() {
        assert_eq!(sample_label(&sample(), DensityTier::Medium), "08:05:42");
    }

    #[test]
    fn test_sparse_keeps_full_timestamp() {
        assert_eq!(
            sample_label(&sample(), DensityTier::Sparse),
            "2025-01-15T08:05:42"
        );
    }

    #[test]
    fn test_unparsed_label_passes_through() {
        let degraded = Sample::unparsed("15/01/2025 ??".to_string(), 3.0);
        assert_eq!(sample_label(&degraded, DensityTier::Dense), "15/01/2025 ??");
    }
}
