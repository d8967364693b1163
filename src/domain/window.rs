// Inclusive time-window filtering over telemetry records
use std::collections::HashMap;

use super::telemetry::{ParameterSeries, TelemetryRecord};
use super::timestamp::Timestamp;

/// An inclusive `[start, end]` window at second granularity.
///
/// If either bound is absent the filter is a no-op: it returns its input
/// unchanged (a clone, so callers must not rely on output identity).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TimeWindow {
    pub start: Option<Timestamp>,
    pub end: Option<Timestamp>,
}

impl TimeWindow {
    pub fn new(start: Option<Timestamp>, end: Option<Timestamp>) -> Self {
        Self { start, end }
    }

    pub fn unbounded() -> Self {
        Self::default()
    }

    /// True when at least one bound is missing and filtering is skipped.
    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() || self.end.is_none()
    }

    pub fn contains(&self, timestamp: Timestamp) -> bool {
        match (self.start, self.end) {
            (Some(start), Some(end)) => timestamp >= start && timestamp <= end,
            _ => true,
        }
    }

    /// Retain only samples inside the window.
    ///
    /// Samples whose wire timestamp never parsed cannot be ordered against
    /// the bounds; they are dropped by a bounded window and kept by an
    /// unbounded one.
    pub fn filter_series(&self, series: &ParameterSeries) -> ParameterSeries {
        if self.is_unbounded() {
            return series.clone();
        }

        let samples = series
            .samples
            .iter()
            .filter(|s| s.timestamp.is_some_and(|t| self.contains(t)))
            .cloned()
            .collect();

        ParameterSeries::new(series.parameter, samples, series.statistics)
    }

    pub fn filter_record(&self, record: &TelemetryRecord) -> TelemetryRecord {
        if self.is_unbounded() {
            return record.clone();
        }

        let series: HashMap<_, _> = record
            .series
            .iter()
            .map(|(parameter, series)| (*parameter, self.filter_series(series)))
            .collect();

        TelemetryRecord {
            series,
            ..record.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::parameter::Parameter;
    use crate::domain::telemetry::{Sample, SeriesStatistics};

    fn ts(raw: &str) -> Timestamp {
        Timestamp::parse(raw).unwrap()
    }

    fn series(raws: &[&str]) -> ParameterSeries {
        let samples = raws
            .iter()
            .enumerate()
            .map(|(i, raw)| Sample::new(ts(raw), i as f64))
            .collect();
        ParameterSeries::new(Parameter::CurrentSpeed, samples, SeriesStatistics::default())
    }

    #[test]
    fn test_inclusive_bounds() {
        let input = series(&[
            "2025-01-15T07:59:59Z",
            "2025-01-15T08:00:00Z",
            "2025-01-15T09:00:00Z",
            "2025-01-15T09:00:01Z",
        ]);
        let window = TimeWindow::new(
            Some(ts("2025-01-15T08:00:00")),
            Some(ts("2025-01-15T09:00:00")),
        );

        let filtered = window.filter_series(&input);
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered.samples[0].time_label, "2025-01-15T08:00:00");
        assert_eq!(filtered.samples[1].time_label, "2025-01-15T09:00:00");
    }

    #[test]
    fn test_single_instant_window() {
        let input = series(&[
            "2025-01-15T07:00:00Z",
            "2025-01-15T08:00:00Z",
            "2025-01-15T09:00:00Z",
        ]);
        let window = TimeWindow::new(
            Some(ts("2025-01-15T08:00:00")),
            Some(ts("2025-01-15T08:00:00")),
        );

        let filtered = window.filter_series(&input);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.samples[0].time_label, "2025-01-15T08:00:00");
    }

    #[test]
    fn test_missing_bound_is_noop() {
        let input = series(&["2025-01-15T07:00:00Z", "2025-01-15T09:00:00Z"]);

        let open_start = TimeWindow::new(None, Some(ts("2025-01-15T08:00:00")));
        assert_eq!(open_start.filter_series(&input).len(), 2);

        let open_end = TimeWindow::new(Some(ts("2025-01-15T08:00:00")), None);
        assert_eq!(open_end.filter_series(&input).len(), 2);
    }

    #[test]
    fn test_idempotent_for_fixed_bounds() {
        let input = series(&[
            "2025-01-15T07:00:00Z",
            "2025-01-15T08:30:00Z",
            "2025-01-15T10:00:00Z",
        ]);
        let window = TimeWindow::new(
            Some(ts("2025-01-15T08:00:00")),
            Some(ts("2025-01-15T09:00:00")),
        );

        let once = window.filter_series(&input);
        let twice = window.filter_series(&once);
        assert_eq!(once.samples, twice.samples);
    }

    #[test]
    fn test_bounded_window_drops_unparsed_samples() {
        let mut input = series(&["2025-01-15T08:30:00Z"]);
        input
            .samples
            .push(Sample::unparsed("corrupted".to_string(), 5.0));

        let window = TimeWindow::new(
            Some(ts("2025-01-15T08:00:00")),
            Some(ts("2025-01-15T09:00:00")),
        );
        assert_eq!(window.filter_series(&input).len(), 1);
        assert_eq!(TimeWindow::unbounded().filter_series(&input).len(), 2);
    }

    #[test]
    fn test_filter_record_covers_every_series() {
        use std::collections::HashMap;

        let mut all = HashMap::new();
        all.insert(Parameter::CurrentSpeed, series(&["2025-01-15T07:00:00Z"]));
        all.insert(Parameter::EngineRpm, series(&["2025-01-15T08:30:00Z"]));
        let record = TelemetryRecord {
            machinery_id: 1,
            machinery_name: "Cargador 1".to_string(),
            serial_number: "SN-0001".to_string(),
            total_distance_km: 0.0,
            operating_time_hours: 0.0,
            effective_working_hours: 0.0,
            operator_name: String::new(),
            series: all,
        };

        let window = TimeWindow::new(
            Some(ts("2025-01-15T08:00:00")),
            Some(ts("2025-01-15T09:00:00")),
        );
        let filtered = window.filter_record(&record);
        assert!(filtered.series(Parameter::CurrentSpeed).is_empty());
        assert_eq!(filtered.series(Parameter::EngineRpm).len(), 1);
    }
}
