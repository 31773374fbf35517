use std::sync::Arc;

use tracing::{debug, info, warn};

use shared_models::{ServiceError, WaitTimeMinutes};
use shared_scheduling::SchedulingService;

use crate::models::WaitTimeError;

/// Reads and overrides the clinic-wide wait time.
pub struct WaitTimeService {
    scheduling: Arc<dyn SchedulingService>,
}

impl WaitTimeService {
    pub fn with_service(scheduling: Arc<dyn SchedulingService>) -> Self {
        Self { scheduling }
    }

    pub async fn get_wait_time(&self) -> Result<WaitTimeMinutes, ServiceError> {
        let minutes = self.scheduling.wait_time().await?;
        debug!("Current wait time: {}", minutes);
        Ok(minutes)
    }

    pub async fn set_wait_time(&self, minutes: i64) -> Result<WaitTimeMinutes, WaitTimeError> {
        let minutes = WaitTimeMinutes::try_from(minutes).map_err(|e| {
            warn!("Rejected wait time override: {}", e);
            e
        })?;
        self.apply_override(minutes).await
    }

    /// Accepts the operator's raw input, e.g. from a prompt.
    pub async fn set_wait_time_from_input(
        &self,
        input: &str,
    ) -> Result<WaitTimeMinutes, WaitTimeError> {
        let minutes: WaitTimeMinutes = input.parse().map_err(|e| {
            warn!("Rejected wait time override: {}", e);
            e
        })?;
        self.apply_override(minutes).await
    }

    /// Forwards the override and returns the value the service reports
    /// afterwards, which is not assumed to equal the input.
    pub async fn apply_override(
        &self,
        minutes: WaitTimeMinutes,
    ) -> Result<WaitTimeMinutes, WaitTimeError> {
        self.scheduling.set_wait_time(minutes).await?;
        let canonical = self.scheduling.wait_time().await?;

        if canonical != minutes {
            info!("Wait time override {} settled at {}", minutes, canonical);
        } else {
            info!("Wait time set to {}", canonical);
        }

        Ok(canonical)
    }
}
