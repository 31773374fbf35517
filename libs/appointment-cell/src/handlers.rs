// libs/appointment-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use shared_models::{error::AppError, AppointmentId, ScheduleSnapshot};
use shared_scheduling::SchedulingService;

use crate::models::{AppointmentForm, AppointmentView, WaitTimeForm, WaitTimeResponse};
use crate::services::{AppointmentBookService, WaitTimeService};

fn listing(snapshot: &ScheduleSnapshot) -> Vec<AppointmentView> {
    snapshot
        .sorted_by_time()
        .into_iter()
        .map(AppointmentView::from)
        .collect()
}

// ==============================================================================
// APPOINTMENT HANDLERS
// ==============================================================================

pub async fn list_appointments(
    State(scheduling): State<Arc<dyn SchedulingService>>,
) -> Result<Json<Vec<AppointmentView>>, AppError> {
    let book = AppointmentBookService::with_service(scheduling);
    let snapshot = book.snapshot().await?;

    Ok(Json(listing(&snapshot)))
}

/// Validates against a freshly fetched snapshot, creates, and answers with
/// the re-fetched schedule.
pub async fn create_appointment(
    State(scheduling): State<Arc<dyn SchedulingService>>,
    Json(form): Json<AppointmentForm>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let time = form.parsed_time()?;
    let book = AppointmentBookService::with_service(scheduling);

    let snapshot = book.create(form.patient_name(), time).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "appointments": listing(&snapshot),
        })),
    ))
}

pub async fn update_appointment(
    State(scheduling): State<Arc<dyn SchedulingService>>,
    Path(appointment_id): Path<String>,
    Json(form): Json<AppointmentForm>,
) -> Result<Json<Value>, AppError> {
    let time = form.parsed_time()?;
    let id = AppointmentId::new(appointment_id);
    let book = AppointmentBookService::with_service(scheduling);

    let snapshot = book.edit(&id, form.patient_name(), time).await?;

    Ok(Json(json!({
        "success": true,
        "appointments": listing(&snapshot),
    })))
}

pub async fn delete_appointment(
    State(scheduling): State<Arc<dyn SchedulingService>>,
    Path(appointment_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let id = AppointmentId::new(appointment_id);
    let book = AppointmentBookService::with_service(scheduling);

    let snapshot = book.delete(&id).await?;

    Ok(Json(json!({
        "success": true,
        "appointments": listing(&snapshot),
    })))
}

// ==============================================================================
// WAIT TIME HANDLERS
// ==============================================================================

pub async fn get_wait_time(
    State(scheduling): State<Arc<dyn SchedulingService>>,
) -> Result<Json<WaitTimeResponse>, AppError> {
    let wait_time = WaitTimeService::with_service(scheduling).get_wait_time().await?;

    Ok(Json(WaitTimeResponse { wait_time }))
}

pub async fn set_wait_time(
    State(scheduling): State<Arc<dyn SchedulingService>>,
    Json(form): Json<WaitTimeForm>,
) -> Result<Json<WaitTimeResponse>, AppError> {
    let minutes = form.minutes()?;
    let wait_time = WaitTimeService::with_service(scheduling).apply_override(minutes).await?;

    Ok(Json(WaitTimeResponse { wait_time }))
}
