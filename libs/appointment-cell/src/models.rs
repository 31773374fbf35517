// libs/appointment-cell/src/models.rs
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use shared_models::{
    error::AppError, Appointment, AppointmentId, ClinicTime, ServiceError, ValidationError,
    WaitTimeMinutes,
};

// ==============================================================================
// REQUEST / RESPONSE MODELS
// ==============================================================================

/// Create or edit form as submitted by the front desk.
///
/// Fields stay loosely typed until the handler reads them, so an absent,
/// `null` or blank value is reported as a missing field and a wrongly typed
/// one as an invalid value, never as a body decode failure.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentForm {
    #[serde(default)]
    pub patient_name: Option<String>,
    #[serde(default)]
    pub time: Option<Value>,
}

impl AppointmentForm {
    /// Empty when absent; the validator reports it as missing.
    pub fn patient_name(&self) -> &str {
        self.patient_name.as_deref().unwrap_or_default()
    }

    pub fn parsed_time(&self) -> Result<Option<ClinicTime>, ValidationError> {
        match &self.time {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(raw)) if raw.trim().is_empty() => Ok(None),
            Some(Value::String(raw)) => ClinicTime::parse(raw.trim())
                .map(Some)
                .map_err(|e| ValidationError::InvalidValue(e.to_string())),
            Some(other) => Err(ValidationError::InvalidValue(format!(
                "time must be text, got {}",
                other
            ))),
        }
    }
}

/// One line of the front-desk appointment list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentView {
    pub id: AppointmentId,
    pub patient_name: String,
    pub time: ClinicTime,
    pub display: String,
}

impl From<&Appointment> for AppointmentView {
    fn from(appointment: &Appointment) -> Self {
        Self {
            id: appointment.id.clone(),
            patient_name: appointment.patient_name.clone(),
            time: appointment.time,
            display: format!(
                "{} - {}",
                appointment.patient_name,
                appointment.time.display()
            ),
        }
    }
}

/// Wait-time override. The front desk sends whatever its prompt produced,
/// which may be a number, a string, or `null` for unparsable input.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitTimeForm {
    #[serde(default)]
    pub new_wait_time: Value,
}

impl WaitTimeForm {
    pub fn minutes(&self) -> Result<WaitTimeMinutes, ValidationError> {
        match &self.new_wait_time {
            Value::Number(number) => match number.as_i64() {
                Some(minutes) => WaitTimeMinutes::try_from(minutes),
                None => Err(ValidationError::InvalidValue(format!(
                    "wait time must be a whole number of minutes, got {}",
                    number
                ))),
            },
            Value::String(text) => text.parse(),
            other => Err(ValidationError::InvalidValue(format!(
                "wait time must be a whole number of minutes, got {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitTimeResponse {
    pub wait_time: WaitTimeMinutes,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppointmentError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Service(#[from] ServiceError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WaitTimeError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl From<AppointmentError> for AppError {
    fn from(err: AppointmentError) -> Self {
        match err {
            AppointmentError::Validation(e) => e.into(),
            AppointmentError::Service(e) => e.into(),
        }
    }
}

impl From<WaitTimeError> for AppError {
    fn from(err: WaitTimeError) -> Self {
        match err {
            WaitTimeError::Validation(e) => e.into(),
            WaitTimeError::Service(e) => e.into(),
        }
    }
}
