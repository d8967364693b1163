// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::application::duty_cycle_service::DutyCycleService;
use crate::application::history_service::HistoryService;
use crate::infrastructure::config::load_config;
use crate::infrastructure::http_repository::HttpTelemetryRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    duty_cycle, fuel_chart, health_check, machine_summary, parameter_chart, performance_chart,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = load_config()?;

    // Create repository (infrastructure layer)
    let repository = Arc::new(HttpTelemetryRepository::new(
        config.backend.base_url,
        config.backend.token,
        Duration::from_secs(config.backend.timeout_secs),
    )?);

    // Create services (application layer)
    let history_service = HistoryService::new(repository.clone());
    let duty_cycle_service = DutyCycleService::new(repository);

    // Create application state
    let state = Arc::new(AppState {
        history_service,
        duty_cycle_service,
    });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/machineries/:code/summary", get(machine_summary))
        .route("/machineries/:code/charts/:parameter", get(parameter_chart))
        .route("/machineries/:code/performance", get(performance_chart))
        .route("/machineries/:code/fuel", get(fuel_chart))
        .route("/machineries/:code/duty-cycle", get(duty_cycle))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = config.server.listen_addr.parse()?;
    tracing::info!("starting fleet-telemetry service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
