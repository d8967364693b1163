// REST telemetry backend repository implementation
use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::application::telemetry_repository::{FetchError, TelemetryRepository};
use crate::domain::parameter::Parameter;
use crate::domain::telemetry::{
    Fault, ParameterSeries, Sample, SeriesStatistics, TelemetryRecord,
};
use crate::domain::timestamp::Timestamp;
use crate::domain::window::TimeWindow;

#[derive(Debug, Clone)]
pub struct HttpTelemetryRepository {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

// Wire format of the telemetry backend, one element per machine.

#[derive(Debug, Deserialize)]
struct WireMachinery {
    id_machinery: i64,
    machinery_name: String,
    serial_number: String,
    #[serde(default)]
    total_distance_km: f64,
    #[serde(default)]
    operating_time_hours: f64,
    #[serde(default)]
    effective_working_hours: f64,
    #[serde(default)]
    user_name: String,
    #[serde(default)]
    parameters: Vec<WireParameter>,
}

#[derive(Debug, Deserialize)]
struct WireParameter {
    parameter_name: String,
    #[serde(default)]
    statistics: WireStatistics,
    #[serde(default)]
    data_points: Vec<WirePoint>,
}

#[derive(Debug, Deserialize, Default)]
struct WireStatistics {
    average: Option<f64>,
    min: Option<f64>,
    max: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct WirePoint {
    registered_at: String,
    data: f64,
    obd_fault: Option<String>,
    obd_fault_name: Option<String>,
}

impl HttpTelemetryRepository {
    pub fn new(base_url: String, token: String, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }
}

/// `from`/`to` query parameters for a bounded window, empty otherwise.
fn window_query(window: &TimeWindow) -> Vec<(&'static str, String)> {
    match (window.start, window.end) {
        (Some(start), Some(end)) => vec![("from", start.full()), ("to", end.full())],
        _ => Vec::new(),
    }
}

#[async_trait]
impl TelemetryRepository for HttpTelemetryRepository {
    async fn fetch_history(
        &self,
        tracking_code: &str,
        window: &TimeWindow,
    ) -> Result<Vec<TelemetryRecord>, FetchError> {
        let url = format!("{}/machineries/{}/history", self.base_url, tracking_code);
        tracing::debug!("fetching telemetry history from {}", url);

        let response = self
            .client
            .get(&url)
            .query(&window_query(window))
            .bearer_auth(&self.token)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(map_reqwest_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Upstream(format!(
                "status {status}: {body}"
            )));
        }

        let wire: Vec<WireMachinery> = response.json().await.map_err(map_reqwest_error)?;
        Ok(wire.into_iter().map(decode_machinery).collect())
    }
}

fn map_reqwest_error(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Upstream(error.to_string())
    }
}

fn decode_machinery(wire: WireMachinery) -> TelemetryRecord {
    let mut series: HashMap<Parameter, ParameterSeries> = HashMap::new();
    for wire_parameter in wire.parameters {
        let Some(parameter) = Parameter::from_wire_name(&wire_parameter.parameter_name) else {
            tracing::debug!(
                "ignoring unknown parameter \"{}\"",
                wire_parameter.parameter_name
            );
            continue;
        };
        series.insert(parameter, decode_series(parameter, wire_parameter));
    }

    TelemetryRecord {
        machinery_id: wire.id_machinery,
        machinery_name: wire.machinery_name,
        serial_number: wire.serial_number,
        total_distance_km: wire.total_distance_km,
        operating_time_hours: wire.operating_time_hours,
        effective_working_hours: wire.effective_working_hours,
        operator_name: wire.user_name,
        series,
    }
}

fn decode_series(parameter: Parameter, wire: WireParameter) -> ParameterSeries {
    let samples: Vec<Sample> = wire
        .data_points
        .into_iter()
        .map(|point| {
            let mut sample = match Timestamp::parse(&point.registered_at) {
                Some(timestamp) => Sample::new(timestamp, point.data),
                None => {
                    tracing::debug!(
                        "unparsable timestamp \"{}\" for {}",
                        point.registered_at,
                        parameter.key()
                    );
                    Sample::unparsed(point.registered_at, point.data)
                }
            };
            if let Some(code) = point.obd_fault {
                sample = sample.with_fault(Fault {
                    code,
                    name: point.obd_fault_name,
                });
            }
            sample
        })
        .collect();

    // Order is a backend guarantee; validate cheaply instead of re-sorting.
    let ordered = samples
        .windows(2)
        .all(|pair| match (pair[0].timestamp, pair[1].timestamp) {
            (Some(a), Some(b)) => a <= b,
            _ => true,
        });
    if !ordered {
        tracing::warn!("series {} arrived out of order", parameter.key());
    }

    ParameterSeries::new(
        parameter,
        samples,
        SeriesStatistics {
            average: wire.statistics.average,
            min: wire.statistics.min,
            max: wire.statistics.max,
        },
    )
}
