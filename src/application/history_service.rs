// History service - use cases for chart-ready telemetry views
use std::sync::Arc;

use crate::application::telemetry_repository::{FetchError, TelemetryRepository};
use crate::domain::chart::{ChartSeries, CompositeSeries};
use crate::domain::downsample::{downsample_series, DEFAULT_MAX_POINTS};
use crate::domain::join::aligned_join;
use crate::domain::parameter::Parameter;
use crate::domain::telemetry::{SeriesStatistics, TelemetryRecord};
use crate::domain::window::TimeWindow;

/// Parameters of the combined performance chart, primary first.
const PERFORMANCE_PARAMETERS: [Parameter; 4] = [
    Parameter::CurrentSpeed,
    Parameter::EngineRpm,
    Parameter::CoolantTemperature,
    Parameter::EngineLoad,
];

#[derive(Clone)]
pub struct HistoryService {
    repository: Arc<dyn TelemetryRepository>,
}

impl HistoryService {
    pub fn new(repository: Arc<dyn TelemetryRepository>) -> Self {
        Self { repository }
    }

    /// Fetch the record for a tracking code. Requests carry one machine per
    /// response in practice; extra elements are ignored with a warning.
    async fn fetch_record(
        &self,
        tracking_code: &str,
        window: &TimeWindow,
    ) -> Result<Option<TelemetryRecord>, FetchError> {
        let mut records = self.repository.fetch_history(tracking_code, window).await?;
        if records.len() > 1 {
            tracing::warn!(
                "history for {} returned {} machines, using the first",
                tracking_code,
                records.len()
            );
        }
        Ok(if records.is_empty() {
            None
        } else {
            Some(records.swap_remove(0))
        })
    }

    /// Single-parameter chart: filter, downsample, classify density, label.
    pub async fn parameter_chart(
        &self,
        tracking_code: &str,
        window: &TimeWindow,
        parameter: Parameter,
        max_points: usize,
    ) -> Result<ChartSeries, FetchError> {
        let Some(record) = self.fetch_record(tracking_code, window).await? else {
            return Ok(ChartSeries::empty(parameter));
        };

        let filtered = window.filter_record(&record);
        let series = filtered.series(parameter);
        let reduced = downsample_series(&series, max_points);

        tracing::debug!(
            "chart {} for {}: {} samples, {} after downsampling",
            parameter.key(),
            tracking_code,
            series.len(),
            reduced.len()
        );

        Ok(ChartSeries::from_samples(
            parameter,
            &reduced.samples,
            reduced.statistics,
        ))
    }

    /// Combined speed/RPM/temperature/load chart with fault markers.
    pub async fn performance_chart(
        &self,
        tracking_code: &str,
        window: &TimeWindow,
    ) -> Result<CompositeSeries, FetchError> {
        self.composite_chart(tracking_code, window, &PERFORMANCE_PARAMETERS)
            .await
    }

    /// Fuel level paired with instantaneous consumption.
    pub async fn fuel_chart(
        &self,
        tracking_code: &str,
        window: &TimeWindow,
    ) -> Result<CompositeSeries, FetchError> {
        self.composite_chart(
            tracking_code,
            window,
            &[Parameter::FuelLevel, Parameter::InstantConsumption],
        )
        .await
    }

    async fn composite_chart(
        &self,
        tracking_code: &str,
        window: &TimeWindow,
        parameters: &[Parameter],
    ) -> Result<CompositeSeries, FetchError> {
        let Some(record) = self.fetch_record(tracking_code, window).await? else {
            return Ok(CompositeSeries::from_records(Vec::new()));
        };

        let filtered = window.filter_record(&record);
        // A parameter the device never reported would truncate the whole
        // join to nothing; charts plot whatever series do have data.
        let reduced: Vec<_> = parameters
            .iter()
            .map(|p| downsample_series(&filtered.series(*p), DEFAULT_MAX_POINTS))
            .filter(|s| !s.is_empty())
            .collect();
        let refs: Vec<_> = reduced.iter().collect();
        let records = aligned_join(&refs, None);

        Ok(CompositeSeries::from_records(records))
    }

    /// Header fields plus per-parameter statistics for the summary view.
    pub async fn machine_summary(
        &self,
        tracking_code: &str,
    ) -> Result<Option<MachineSummary>, FetchError> {
        let Some(record) = self
            .fetch_record(tracking_code, &TimeWindow::unbounded())
            .await?
        else {
            return Ok(None);
        };

        let mut statistics: Vec<ParameterStatistics> = Parameter::ALL
            .iter()
            .filter_map(|parameter| {
                let series = record.series(*parameter);
                if series.is_empty() {
                    None
                } else {
                    Some(ParameterStatistics {
                        parameter: *parameter,
                        statistics: series.statistics,
                    })
                }
            })
            .collect();
        statistics.sort_by_key(|s| s.parameter.key());

        Ok(Some(MachineSummary {
            machinery_id: record.machinery_id,
            machinery_name: record.machinery_name,
            serial_number: record.serial_number,
            total_distance_km: record.total_distance_km,
            operating_time_hours: record.operating_time_hours,
            effective_working_hours: record.effective_working_hours,
            operator_name: record.operator_name,
            statistics,
        }))
    }
}

#[derive(Debug, Clone)]
pub struct MachineSummary {
    pub machinery_id: i64,
    pub machinery_name: String,
    pub serial_number: String,
    pub total_distance_km: f64,
    pub operating_time_hours: f64,
    pub effective_working_hours: f64,
    pub operator_name: String,
    pub statistics: Vec<ParameterStatistics>,
}

#[derive(Debug, Clone)]
pub struct ParameterStatistics {
    pub parameter: Parameter,
    pub statistics: SeriesStatistics,
}
