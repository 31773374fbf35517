use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ValidationError;
use crate::time::ClinicTime;

// ==============================================================================
// APPOINTMENTS
// ==============================================================================

/// Identifier assigned by the Scheduling Service. Opaque to the front desk.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct AppointmentId(String);

impl AppointmentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AppointmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AppointmentId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl<'de> Deserialize<'de> for AppointmentId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => Self(text),
            RawId::Number(number) => Self(number.to_string()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: AppointmentId,
    pub patient_name: String,
    pub time: ClinicTime,
}

/// Body of both the create and the full-replace edit request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentDraft {
    pub patient_name: String,
    pub time: ClinicTime,
}

/// The client-held copy of the schedule.
///
/// Only ever replaced wholesale by a fresh fetch; it is a pre-check cache,
/// the Scheduling Service stays authoritative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleSnapshot {
    appointments: Vec<Appointment>,
}

impl ScheduleSnapshot {
    pub fn new(appointments: Vec<Appointment>) -> Self {
        Self { appointments }
    }

    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn find(&self, id: &AppointmentId) -> Option<&Appointment> {
        self.appointments.iter().find(|appointment| &appointment.id == id)
    }

    pub fn len(&self) -> usize {
        self.appointments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.appointments.is_empty()
    }

    pub fn sorted_by_time(&self) -> Vec<&Appointment> {
        let mut sorted: Vec<&Appointment> = self.appointments.iter().collect();
        sorted.sort_by_key(|appointment| appointment.time);
        sorted
    }
}

// ==============================================================================
// WAIT TIME
// ==============================================================================

/// Clinic-wide estimated wait, in whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WaitTimeMinutes(u32);

impl WaitTimeMinutes {
    pub fn new(minutes: u32) -> Self {
        Self(minutes)
    }

    pub fn minutes(&self) -> u32 {
        self.0
    }
}

impl TryFrom<i64> for WaitTimeMinutes {
    type Error = ValidationError;

    fn try_from(minutes: i64) -> Result<Self, Self::Error> {
        u32::try_from(minutes).map(Self).map_err(|_| {
            ValidationError::InvalidValue(format!(
                "wait time must be a non-negative whole number of minutes, got {}",
                minutes
            ))
        })
    }
}

impl FromStr for WaitTimeMinutes {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let minutes: i64 = s.trim().parse().map_err(|_| {
            ValidationError::InvalidValue(format!(
                "wait time must be a whole number of minutes, got '{}'",
                s.trim()
            ))
        })?;
        Self::try_from(minutes)
    }
}

impl fmt::Display for WaitTimeMinutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} minutes", self.0)
    }
}

// ==============================================================================
// ARRIVAL QUEUE
// ==============================================================================

/// 1-based rank in the arrival queue, as reported by the Scheduling Service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct QueuePosition(NonZeroU32);

impl QueuePosition {
    pub fn new(rank: u32) -> Option<Self> {
        NonZeroU32::new(rank).map(Self)
    }

    pub fn rank(&self) -> u32 {
        self.0.get()
    }

    /// Patients queued ahead of this one.
    pub fn ahead(&self) -> u32 {
        self.0.get() - 1
    }
}

impl TryFrom<i64> for QueuePosition {
    type Error = String;

    fn try_from(rank: i64) -> Result<Self, Self::Error> {
        u32::try_from(rank)
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| format!("queue position must be 1 or greater, got {}", rank))
    }
}

impl From<QueuePosition> for u32 {
    fn from(position: QueuePosition) -> Self {
        position.rank()
    }
}

impl fmt::Display for QueuePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outcome of a position query. A missing entry is an answer, not a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionLookup {
    Queued(QueuePosition),
    /// Carries the service's message, e.g. `not found`.
    NotQueued(String),
}
