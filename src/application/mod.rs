// Application layer - use cases over the telemetry pipeline
pub mod duty_cycle_service;
pub mod history_service;
pub mod telemetry_repository;
