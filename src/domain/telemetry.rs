// Telemetry data domain models
use std::collections::HashMap;

use super::parameter::Parameter;
use super::timestamp::Timestamp;

/// OBD fault attached to a sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Fault {
    pub code: String,
    pub name: Option<String>,
}

/// One timestamped reading within a parameter series.
///
/// `timestamp` is `None` when the wire value failed every parse; the raw
/// string is kept in `time_label` so the reading still renders with a
/// degraded label and its numeric value intact.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub timestamp: Option<Timestamp>,
    pub time_label: String,
    pub value: f64,
    pub fault: Option<Fault>,
}

impl Sample {
    pub fn new(timestamp: Timestamp, value: f64) -> Self {
        Self {
            timestamp: Some(timestamp),
            time_label: timestamp.full(),
            value,
            fault: None,
        }
    }

    /// A sample whose wire timestamp could not be parsed.
    pub fn unparsed(raw_label: String, value: f64) -> Self {
        Self {
            timestamp: None,
            time_label: raw_label,
            value,
            fault: None,
        }
    }

    pub fn with_fault(mut self, fault: Fault) -> Self {
        self.fault = Some(fault);
        self
    }
}

/// Summary statistics the backend computes per parameter, passed through.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SeriesStatistics {
    pub average: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// One parameter's full sample history for one machine.
///
/// Samples are sorted non-decreasing by timestamp (backend guarantee; the
/// pipeline never re-sorts).
#[derive(Debug, Clone)]
pub struct ParameterSeries {
    pub parameter: Parameter,
    pub samples: Vec<Sample>,
    pub statistics: SeriesStatistics,
}

impl ParameterSeries {
    pub fn new(parameter: Parameter, samples: Vec<Sample>, statistics: SeriesStatistics) -> Self {
        Self {
            parameter,
            samples,
            statistics,
        }
    }

    pub fn empty(parameter: Parameter) -> Self {
        Self {
            parameter,
            samples: Vec::new(),
            statistics: SeriesStatistics::default(),
        }
    }

    pub fn unit(&self) -> &'static str {
        self.parameter.unit()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// One machine's full telemetry response for a tracking code.
#[derive(Debug, Clone)]
pub struct TelemetryRecord {
    pub machinery_id: i64,
    pub machinery_name: String,
    pub serial_number: String,
    pub total_distance_km: f64,
    pub operating_time_hours: f64,
    pub effective_working_hours: f64,
    pub operator_name: String,
    pub series: HashMap<Parameter, ParameterSeries>,
}

impl TelemetryRecord {
    /// Extract one parameter's series with its unit conversion applied.
    ///
    /// A missing parameter is a valid, displayable state: the result is an
    /// empty series, never an error.
    pub fn series(&self, parameter: Parameter) -> ParameterSeries {
        let Some(stored) = self.series.get(&parameter) else {
            return ParameterSeries::empty(parameter);
        };

        let scale = parameter.scale();
        if scale == 1.0 {
            return stored.clone();
        }

        let samples = stored
            .samples
            .iter()
            .map(|s| Sample {
                value: s.value * scale,
                ..s.clone()
            })
            .collect();
        let statistics = SeriesStatistics {
            average: stored.statistics.average.map(|v| v * scale),
            min: stored.statistics.min.map(|v| v * scale),
            max: stored.statistics.max.map(|v| v * scale),
        };

        ParameterSeries::new(parameter, samples, statistics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(raw: &str, value: f64) -> Sample {
        Sample::new(Timestamp::parse(raw).unwrap(), value)
    }

    fn record_with(parameter: Parameter, samples: Vec<Sample>) -> TelemetryRecord {
        let mut series = HashMap::new();
        series.insert(
            parameter,
            ParameterSeries::new(parameter, samples, SeriesStatistics::default()),
        );
        TelemetryRecord {
            machinery_id: 7,
            machinery_name: "Excavadora 3".to_string(),
            serial_number: "SN-0007".to_string(),
            total_distance_km: 120.5,
            operating_time_hours: 340.0,
            effective_working_hours: 280.0,
            operator_name: "M. Rojas".to_string(),
            series,
        }
    }

    #[test]
    fn test_missing_parameter_yields_empty_series() {
        let record = record_with(Parameter::CurrentSpeed, vec![]);
        let series = record.series(Parameter::EngineRpm);
        assert!(series.is_empty());
        assert_eq!(series.parameter, Parameter::EngineRpm);
    }

    #[test]
    fn test_odometer_extraction_converts_meters_to_kilometers() {
        let record = record_with(
            Parameter::Odometer,
            vec![sample("2025-01-15T08:00:00Z", 6500.0)],
        );
        let series = record.series(Parameter::Odometer);
        assert_eq!(series.samples[0].value, 6.5);
    }

    #[test]
    fn test_unscaled_parameter_extracted_verbatim() {
        let record = record_with(
            Parameter::CurrentSpeed,
            vec![sample("2025-01-15T08:00:00Z", 42.0)],
        );
        let series = record.series(Parameter::CurrentSpeed);
        assert_eq!(series.samples[0].value, 42.0);
    }

    #[test]
    fn test_statistics_scaled_with_values() {
        let mut record = record_with(
            Parameter::Odometer,
            vec![sample("2025-01-15T08:00:00Z", 6500.0)],
        );
        record
            .series
            .get_mut(&Parameter::Odometer)
            .unwrap()
            .statistics = SeriesStatistics {
            average: Some(5000.0),
            min: Some(1000.0),
            max: Some(6500.0),
        };

        let series = record.series(Parameter::Odometer);
        assert_eq!(series.statistics.average, Some(5.0));
        assert_eq!(series.statistics.min, Some(1.0));
        assert_eq!(series.statistics.max, Some(6.5));
    }
}
