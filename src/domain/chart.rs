// Chart-ready output models handed to external rendering
use std::collections::BTreeMap;

use super::density::DensityTier;
use super::join::CompositeRecord;
use super::labels::{format_label, sample_label};
use super::parameter::Parameter;
use super::telemetry::{Fault, Sample, SeriesStatistics};

/// One plotted point of a single-parameter chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub time: String,
    pub value: f64,
    pub full_timestamp: Option<String>,
    pub fault: Option<Fault>,
}

/// A labelled, density-classified series ready to plot.
#[derive(Debug, Clone)]
pub struct ChartSeries {
    pub parameter: Parameter,
    pub tier: DensityTier,
    pub statistics: SeriesStatistics,
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    /// Label a (typically already downsampled) sample run; the tier comes
    /// from the post-downsampling count.
    pub fn from_samples(
        parameter: Parameter,
        samples: &[Sample],
        statistics: SeriesStatistics,
    ) -> Self {
        let tier = DensityTier::of(samples.len());
        let points = samples
            .iter()
            .map(|sample| ChartPoint {
                time: sample_label(sample, tier),
                value: sample.value,
                full_timestamp: sample.timestamp.map(|t| t.full()),
                fault: sample.fault.clone(),
            })
            .collect();

        Self {
            parameter,
            tier,
            statistics,
            points,
        }
    }

    pub fn empty(parameter: Parameter) -> Self {
        Self {
            parameter,
            tier: DensityTier::Sparse,
            statistics: SeriesStatistics::default(),
            points: Vec::new(),
        }
    }
}

/// One plotted row of a multi-parameter chart.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositePoint {
    pub time: String,
    pub full_timestamp: Option<String>,
    pub values: BTreeMap<&'static str, f64>,
    pub fault: Option<Fault>,
}

/// A labelled composite chart built from joined records.
#[derive(Debug, Clone)]
pub struct CompositeSeries {
    pub tier: DensityTier,
    pub points: Vec<CompositePoint>,
}

impl CompositeSeries {
    pub fn from_records(records: Vec<CompositeRecord>) -> Self {
        let tier = DensityTier::of(records.len());
        let points = records
            .into_iter()
            .map(|record| CompositePoint {
                time: format_label(record.timestamp, &record.time_label, tier),
                full_timestamp: record.timestamp.map(|t| t.full()),
                values: record.values,
                fault: record.fault,
            })
            .collect();

        Self { tier, points }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::timestamp::Timestamp;

    fn samples(n: usize) -> Vec<Sample> {
        (0..n)
            .map(|i| {
                let raw = format!("2025-01-15T08:{:02}:{:02}Z", (i / 60) % 60, i % 60);
                Sample::new(Timestamp::parse(&raw).unwrap(), i as f64)
            })
            .collect()
    }

    #[test]
    fn test_sparse_series_keeps_full_labels() {
        let chart = ChartSeries::from_samples(
            Parameter::CurrentSpeed,
            &samples(10),
            SeriesStatistics::default(),
        );
        assert_eq!(chart.tier, DensityTier::Sparse);
        assert_eq!(chart.points[0].time, "2025-01-15T08:00:00");
        assert_eq!(
            chart.points[0].full_timestamp.as_deref(),
            Some("2025-01-15T08:00:00")
        );
    }

    #[test]
    fn test_dense_series_trims_labels_uniformly() {
        let chart = ChartSeries::from_samples(
            Parameter::CurrentSpeed,
            &samples(120),
            SeriesStatistics::default(),
        );
        assert_eq!(chart.tier, DensityTier::Dense);
        assert!(chart.points.iter().all(|p| p.time.len() == 5));
    }

    #[test]
    fn test_empty_chart() {
        let chart = ChartSeries::empty(Parameter::EngineRpm);
        assert!(chart.points.is_empty());
        assert_eq!(chart.tier, DensityTier::Sparse);
    }
}
