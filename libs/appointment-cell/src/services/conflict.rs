// libs/appointment-cell/src/services/conflict.rs
//
// Admissibility checks run against the client-held snapshot before any
// create or edit is dispatched. The Scheduling Service still has the final
// word: a snapshot can be stale by the time the mutation lands.

use chrono::{Local, NaiveDateTime};

use shared_models::{Appointment, AppointmentId, ClinicTime, ValidationError};

/// Check a new appointment against the schedule, using the current local time.
pub fn validate_create(
    existing: &[Appointment],
    candidate_name: &str,
    candidate_time: Option<ClinicTime>,
) -> Result<(), ValidationError> {
    validate_create_at(existing, candidate_name, candidate_time, Local::now().naive_local())
}

/// Check an edit of `edited_id` against the schedule, using the current local time.
pub fn validate_edit(
    existing: &[Appointment],
    edited_id: &AppointmentId,
    candidate_name: &str,
    candidate_time: Option<ClinicTime>,
) -> Result<(), ValidationError> {
    validate_edit_at(
        existing,
        edited_id,
        candidate_name,
        candidate_time,
        Local::now().naive_local(),
    )
}

pub fn validate_create_at(
    existing: &[Appointment],
    candidate_name: &str,
    candidate_time: Option<ClinicTime>,
    now: NaiveDateTime,
) -> Result<(), ValidationError> {
    let time = check_fields_and_time(candidate_name, candidate_time, now)?;

    if slot_taken(existing, time, None) {
        return Err(ValidationError::SlotTaken);
    }

    Ok(())
}

/// Same as [`validate_create_at`], except the appointment being edited never
/// conflicts with itself, so an edit that keeps its time is admissible.
pub fn validate_edit_at(
    existing: &[Appointment],
    edited_id: &AppointmentId,
    candidate_name: &str,
    candidate_time: Option<ClinicTime>,
    now: NaiveDateTime,
) -> Result<(), ValidationError> {
    let time = check_fields_and_time(candidate_name, candidate_time, now)?;

    if slot_taken(existing, time, Some(edited_id)) {
        return Err(ValidationError::SlotTaken);
    }

    Ok(())
}

fn check_fields_and_time(
    candidate_name: &str,
    candidate_time: Option<ClinicTime>,
    now: NaiveDateTime,
) -> Result<ClinicTime, ValidationError> {
    if candidate_name.trim().is_empty() {
        return Err(ValidationError::MissingField("patientName"));
    }

    let time = candidate_time.ok_or(ValidationError::MissingField("time"))?;

    if time.is_before(now) {
        return Err(ValidationError::PastTime);
    }

    Ok(time)
}

// Collisions are exact start-instant equality. Appointments carry no
// duration, so there is no interval to overlap.
fn slot_taken(existing: &[Appointment], time: ClinicTime, exclude: Option<&AppointmentId>) -> bool {
    existing
        .iter()
        .filter(|appointment| Some(&appointment.id) != exclude)
        .any(|appointment| appointment.time == time)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2030, 5, 1)
            .unwrap()
            .and_hms_opt(8, 0, 30)
            .unwrap()
    }

    fn slot(hour: u32, minute: u32) -> ClinicTime {
        ClinicTime::new(
            NaiveDate::from_ymd_opt(2030, 5, 1)
                .unwrap()
                .and_hms_opt(hour, minute, 0)
                .unwrap(),
        )
    }

    #[test]
    fn slot_scan_honours_exclusion() {
        let existing = vec![Appointment {
            id: "1".into(),
            patient_name: "Alice".to_string(),
            time: slot(9, 0),
        }];

        assert!(slot_taken(&existing, slot(9, 0), None));
        assert!(!slot_taken(&existing, slot(9, 0), Some(&"1".into())));
        assert!(slot_taken(&existing, slot(9, 0), Some(&"2".into())));
        assert!(!slot_taken(&existing, slot(9, 1), None));
    }

    #[test]
    fn current_minute_is_already_past_once_started() {
        let result = validate_create_at(&[], "Bob", Some(slot(8, 0)), now());
        assert_eq!(result, Err(ValidationError::PastTime));

        let exact = now() - Duration::seconds(30);
        assert_eq!(validate_create_at(&[], "Bob", Some(slot(8, 0)), exact), Ok(()));
    }
}
