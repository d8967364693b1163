// Application state for HTTP handlers
use crate::application::duty_cycle_service::DutyCycleService;
use crate::application::history_service::HistoryService;

#[derive(Clone)]
pub struct AppState {
    pub history_service: HistoryService,
    pub duty_cycle_service: DutyCycleService,
}
