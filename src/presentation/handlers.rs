// HTTP request handlers
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use crate::domain::downsample::DEFAULT_MAX_POINTS;
use crate::domain::parameter::Parameter;
use crate::domain::timestamp::Timestamp;
use crate::domain::window::TimeWindow;
use crate::presentation::app_state::AppState;
use crate::presentation::responses::{
    fetch_error_response, ChartSeriesDto, CompositeSeriesDto, DutyCycleDto, MachineSummaryDto,
};

#[derive(Deserialize)]
pub struct WindowQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    pub max_points: Option<usize>,
}

impl WindowQuery {
    /// Both bounds must parse for the window to take effect; a missing or
    /// unparsable bound leaves the filter unbounded (a no-op).
    fn window(&self) -> TimeWindow {
        let parse = |raw: &Option<String>| {
            raw.as_deref().and_then(|value| {
                let parsed = Timestamp::parse(value);
                if parsed.is_none() {
                    tracing::warn!("ignoring unparsable window bound \"{}\"", value);
                }
                parsed
            })
        };
        TimeWindow::new(parse(&self.from), parse(&self.to))
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Header fields and per-parameter statistics for one machine.
pub async fn machine_summary(
    Path(code): Path<String>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    match state.history_service.machine_summary(&code).await {
        Ok(Some(summary)) => Json(MachineSummaryDto::from(summary)).into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => fetch_error_response(e),
    }
}

/// Single-parameter history chart.
pub async fn parameter_chart(
    Path((code, parameter_key)): Path<(String, String)>,
    Query(query): Query<WindowQuery>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    // Names outside the registry are valid requests with empty answers.
    let Some(parameter) = Parameter::from_key(&parameter_key) else {
        return Json(ChartSeriesDto::unknown(&parameter_key)).into_response();
    };

    let window = query.window();
    let max_points = query.max_points.unwrap_or(DEFAULT_MAX_POINTS);
    match state
        .history_service
        .parameter_chart(&code, &window, parameter, max_points)
        .await
    {
        Ok(chart) => Json(ChartSeriesDto::from(chart)).into_response(),
        Err(e) => fetch_error_response(e),
    }
}

/// Combined speed/RPM/temperature/load chart.
pub async fn performance_chart(
    Path(code): Path<String>,
    Query(query): Query<WindowQuery>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    match state
        .history_service
        .performance_chart(&code, &query.window())
        .await
    {
        Ok(chart) => Json(CompositeSeriesDto::from(chart)).into_response(),
        Err(e) => fetch_error_response(e),
    }
}

/// Fuel level paired with instantaneous consumption.
pub async fn fuel_chart(
    Path(code): Path<String>,
    Query(query): Query<WindowQuery>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    match state
        .history_service
        .fuel_chart(&code, &query.window())
        .await
    {
        Ok(chart) => Json(CompositeSeriesDto::from(chart)).into_response(),
        Err(e) => fetch_error_response(e),
    }
}

/// Off / idle / in-motion percentage breakdown.
pub async fn duty_cycle(
    Path(code): Path<String>,
    Query(query): Query<WindowQuery>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    match state
        .duty_cycle_service
        .duty_cycle(&code, &query.window())
        .await
    {
        Ok(result) => Json(DutyCycleDto::from(result)).into_response(),
        Err(e) => fetch_error_response(e),
    }
}
