// Mappers from domain models to JSON response shapes
use std::collections::BTreeMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::application::history_service::MachineSummary;
use crate::application::telemetry_repository::FetchError;
use crate::domain::chart::{ChartSeries, CompositeSeries};
use crate::domain::duty_cycle::DutyCycle;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPointDto {
    pub time: String,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fault_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fault_label: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeriesDto {
    pub parameter: String,
    pub name: String,
    pub unit: String,
    pub density: &'static str,
    pub tick_interval: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    pub points: Vec<ChartPointDto>,
}

impl ChartSeriesDto {
    /// Response for a parameter name outside the registry: an empty series,
    /// not an error.
    pub fn unknown(requested: &str) -> Self {
        Self {
            parameter: requested.to_string(),
            name: String::new(),
            unit: String::new(),
            density: "sparse",
            tick_interval: 1,
            average: None,
            min: None,
            max: None,
            points: Vec::new(),
        }
    }
}

impl From<ChartSeries> for ChartSeriesDto {
    fn from(chart: ChartSeries) -> Self {
        let points = chart
            .points
            .into_iter()
            .map(|point| ChartPointDto {
                time: point.time,
                value: point.value,
                full_timestamp: point.full_timestamp,
                fault_code: point.fault.as_ref().map(|f| f.code.clone()),
                fault_label: point.fault.and_then(|f| f.name),
            })
            .collect();

        Self {
            parameter: chart.parameter.key().to_string(),
            name: chart.parameter.display_name().to_string(),
            unit: chart.parameter.unit().to_string(),
            density: chart.tier.as_str(),
            tick_interval: chart.tier.tick_interval(),
            average: chart.statistics.average,
            min: chart.statistics.min,
            max: chart.statistics.max,
            points,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositePointDto {
    pub time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_timestamp: Option<String>,
    #[serde(flatten)]
    pub values: BTreeMap<&'static str, f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fault_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fault_label: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeSeriesDto {
    pub density: &'static str,
    pub tick_interval: usize,
    pub points: Vec<CompositePointDto>,
}

impl From<CompositeSeries> for CompositeSeriesDto {
    fn from(chart: CompositeSeries) -> Self {
        let points = chart
            .points
            .into_iter()
            .map(|point| CompositePointDto {
                time: point.time,
                full_timestamp: point.full_timestamp,
                values: point.values,
                fault_code: point.fault.as_ref().map(|f| f.code.clone()),
                fault_label: point.fault.and_then(|f| f.name),
            })
            .collect();

        Self {
            density: chart.tier.as_str(),
            tick_interval: chart.tier.tick_interval(),
            points,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DutyCycleDto {
    pub off: u32,
    pub on: u32,
    pub in_motion: u32,
}

impl From<DutyCycle> for DutyCycleDto {
    fn from(d: DutyCycle) -> Self {
        Self {
            off: d.off,
            on: d.on,
            in_motion: d.in_motion,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterStatisticsDto {
    pub parameter: String,
    pub name: String,
    pub unit: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineSummaryDto {
    pub machinery_id: i64,
    pub machinery_name: String,
    pub serial_number: String,
    pub total_distance_km: f64,
    pub operating_time_hours: f64,
    pub effective_working_hours: f64,
    pub operator_name: String,
    pub statistics: Vec<ParameterStatisticsDto>,
}

impl From<MachineSummary> for MachineSummaryDto {
    fn from(summary: MachineSummary) -> Self {
        let statistics = summary
            .statistics
            .into_iter()
            .map(|s| ParameterStatisticsDto {
                parameter: s.parameter.key().to_string(),
                name: s.parameter.display_name().to_string(),
                unit: s.parameter.unit().to_string(),
                average: s.statistics.average,
                min: s.statistics.min,
                max: s.statistics.max,
            })
            .collect();

        Self {
            machinery_id: summary.machinery_id,
            machinery_name: summary.machinery_name,
            serial_number: summary.serial_number,
            total_distance_km: summary.total_distance_km,
            operating_time_hours: summary.operating_time_hours,
            effective_working_hours: summary.effective_working_hours,
            operator_name: summary.operator_name,
            statistics,
        }
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub hint: &'static str,
}

fn fetch_error_parts(error: &FetchError) -> (StatusCode, &'static str) {
    match error {
        FetchError::Timeout => (
            StatusCode::GATEWAY_TIMEOUT,
            "narrow the time range and try again",
        ),
        FetchError::Upstream(_) => (StatusCode::BAD_GATEWAY, "retry the request"),
    }
}

/// Map a fetch failure to an HTTP response with actionable advice.
pub fn fetch_error_response(error: FetchError) -> Response {
    let (status, hint) = fetch_error_parts(&error);

    tracing::error!("telemetry fetch failed: {}", error);
    (
        status,
        Json(ErrorBody {
            error: error.to_string(),
            hint,
        }),
    )
        .into_response()
}
