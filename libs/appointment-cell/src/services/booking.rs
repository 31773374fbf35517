// libs/appointment-cell/src/services/booking.rs
use std::sync::Arc;

use tracing::{debug, info, warn};

use shared_models::{
    AppointmentDraft, AppointmentId, ClinicTime, ScheduleSnapshot, ValidationError,
};
use shared_scheduling::SchedulingService;

use crate::models::AppointmentError;
use crate::services::conflict::{validate_create, validate_edit};

/// Runs the front-desk appointment flow: refresh the snapshot, validate
/// against it, dispatch one mutation, then re-fetch the canonical list.
///
/// Nothing is cached between calls. A failed mutation returns the error and
/// leaves the caller's previous snapshot untouched.
pub struct AppointmentBookService {
    scheduling: Arc<dyn SchedulingService>,
}

impl AppointmentBookService {
    pub fn with_service(scheduling: Arc<dyn SchedulingService>) -> Self {
        Self { scheduling }
    }

    pub async fn snapshot(&self) -> Result<ScheduleSnapshot, AppointmentError> {
        let appointments = self.scheduling.list_appointments().await?;
        debug!("Fetched schedule snapshot with {} appointments", appointments.len());
        Ok(ScheduleSnapshot::new(appointments))
    }

    pub async fn create(
        &self,
        patient_name: &str,
        time: Option<ClinicTime>,
    ) -> Result<ScheduleSnapshot, AppointmentError> {
        let current = self.snapshot().await?;

        if let Err(e) = validate_create(current.appointments(), patient_name, time) {
            warn!("Rejected new appointment for '{}': {}", patient_name, e);
            return Err(e.into());
        }

        let draft = draft(patient_name, time)?;
        let assigned = self.scheduling.create_appointment(&draft).await?;

        match assigned {
            Some(id) => info!("Appointment {} created at {}", id, draft.time),
            None => info!("Appointment created at {}", draft.time),
        }

        self.snapshot().await
    }

    pub async fn edit(
        &self,
        id: &AppointmentId,
        patient_name: &str,
        time: Option<ClinicTime>,
    ) -> Result<ScheduleSnapshot, AppointmentError> {
        let current = self.snapshot().await?;

        if let Err(e) = validate_edit(current.appointments(), id, patient_name, time) {
            warn!("Rejected edit of appointment {}: {}", id, e);
            return Err(e.into());
        }

        let draft = draft(patient_name, time)?;
        self.scheduling.replace_appointment(id, &draft).await?;
        info!("Appointment {} moved to {}", id, draft.time);

        self.snapshot().await
    }

    pub async fn delete(&self, id: &AppointmentId) -> Result<ScheduleSnapshot, AppointmentError> {
        self.scheduling.delete_appointment(id).await?;
        info!("Appointment {} deleted", id);

        self.snapshot().await
    }
}

fn draft(patient_name: &str, time: Option<ClinicTime>) -> Result<AppointmentDraft, ValidationError> {
    Ok(AppointmentDraft {
        patient_name: patient_name.trim().to_string(),
        time: time.ok_or(ValidationError::MissingField("time"))?,
    })
}
