use std::sync::Arc;

use tracing::{debug, info, warn};

use shared_models::{PositionLookup, QueuePosition};
use shared_scheduling::SchedulingService;

use crate::{ArrivalError, LookupError};

/// Bridges a patient's name to the arrival queue kept by the Scheduling
/// Service. Positions are always the service's; nothing is computed or
/// cached here.
pub struct QueueCoordinator {
    scheduling: Arc<dyn SchedulingService>,
}

impl QueueCoordinator {
    pub fn with_service(scheduling: Arc<dyn SchedulingService>) -> Self {
        Self { scheduling }
    }

    /// Registers an arrival. Repeated arrivals under the same name are
    /// forwarded as-is; how they are treated is up to the service.
    pub async fn announce_arrival(&self, patient_name: &str) -> Result<QueuePosition, ArrivalError> {
        if patient_name.trim().is_empty() {
            return Err(ArrivalError::MissingName);
        }

        let position = self.scheduling.register_arrival(patient_name).await?;
        info!("{} arrived, queue position {}", patient_name, position);

        Ok(position)
    }

    pub async fn lookup_position(&self, patient_name: &str) -> Result<QueuePosition, LookupError> {
        if patient_name.trim().is_empty() {
            return Err(LookupError::MissingName);
        }

        match self.scheduling.queue_position(patient_name).await? {
            PositionLookup::Queued(position) => {
                debug!("{} is at queue position {}", patient_name, position);
                Ok(position)
            }
            PositionLookup::NotQueued(message) => {
                warn!("No queue entry for {}: {}", patient_name, message);
                Err(LookupError::NotFound(message))
            }
        }
    }
}
