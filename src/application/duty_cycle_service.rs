// Duty-cycle service - use case for the off / idle / in-motion breakdown
use std::sync::Arc;

use crate::application::telemetry_repository::{FetchError, TelemetryRepository};
use crate::domain::duty_cycle::{duty_cycle, DutyCycle};
use crate::domain::parameter::Parameter;
use crate::domain::window::TimeWindow;

#[derive(Clone)]
pub struct DutyCycleService {
    repository: Arc<dyn TelemetryRepository>,
}

impl DutyCycleService {
    pub fn new(repository: Arc<dyn TelemetryRepository>) -> Self {
        Self { repository }
    }

    pub async fn duty_cycle(
        &self,
        tracking_code: &str,
        window: &TimeWindow,
    ) -> Result<DutyCycle, FetchError> {
        let records = self.repository.fetch_history(tracking_code, window).await?;
        let Some(record) = records.first() else {
            return Ok(DutyCycle::zero());
        };

        let filtered = window.filter_record(record);
        let ignition = filtered.series(Parameter::IgnitionState);
        let movement = filtered.series(Parameter::MovementState);

        tracing::debug!(
            "duty cycle for {}: {} ignition samples, {} movement samples",
            tracking_code,
            ignition.len(),
            movement.len()
        );

        Ok(duty_cycle(&ignition, &movement))
    }
}
