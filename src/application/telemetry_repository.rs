// Repository trait for telemetry data access
use crate::domain::telemetry::TelemetryRecord;
use crate::domain::window::TimeWindow;
use async_trait::async_trait;

/// How an upstream fetch can fail. A failed fetch short-circuits before any
/// transformation stage runs; the two variants carry different advice for
/// the caller.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The backend did not answer in time. Narrowing the time range is the
    /// usual remedy.
    #[error("telemetry backend timed out")]
    Timeout,

    /// Any other upstream failure; worth retrying as-is.
    #[error("telemetry backend request failed: {0}")]
    Upstream(String),
}

#[async_trait]
pub trait TelemetryRepository: Send + Sync {
    /// Fetch the per-parameter history for a tracking code.
    ///
    /// A bounded window is forwarded to the backend as `from`/`to` query
    /// parameters so it can narrow the response; the pipeline still applies
    /// its own inclusive filter afterwards. The backend answers with one
    /// array element per machine, typically exactly one. An empty array
    /// means no telemetry is known for the code, which is a valid,
    /// displayable state.
    async fn fetch_history(
        &self,
        tracking_code: &str,
        window: &TimeWindow,
    ) -> Result<Vec<TelemetryRecord>, FetchError>;
}
