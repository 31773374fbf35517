use async_trait::async_trait;

use shared_models::{
    Appointment, AppointmentDraft, AppointmentId, PositionLookup, QueuePosition, ServiceError,
    WaitTimeMinutes,
};

/// Operations the front desk needs from the remote Scheduling Service.
///
/// The service owns all state. Every call is a single round trip and is never
/// retried; a rejection is returned verbatim as [`ServiceError::Rejected`].
#[async_trait]
pub trait SchedulingService: Send + Sync {
    async fn list_appointments(&self) -> Result<Vec<Appointment>, ServiceError>;

    /// Returns the id the service assigned, when its response carries one.
    async fn create_appointment(
        &self,
        draft: &AppointmentDraft,
    ) -> Result<Option<AppointmentId>, ServiceError>;

    async fn replace_appointment(
        &self,
        id: &AppointmentId,
        draft: &AppointmentDraft,
    ) -> Result<(), ServiceError>;

    async fn delete_appointment(&self, id: &AppointmentId) -> Result<(), ServiceError>;

    async fn wait_time(&self) -> Result<WaitTimeMinutes, ServiceError>;

    async fn set_wait_time(&self, minutes: WaitTimeMinutes) -> Result<(), ServiceError>;

    async fn register_arrival(&self, patient_name: &str) -> Result<QueuePosition, ServiceError>;

    async fn queue_position(&self, patient_name: &str) -> Result<PositionLookup, ServiceError>;
}
