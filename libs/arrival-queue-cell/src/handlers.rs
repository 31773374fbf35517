use std::sync::Arc;
use axum::{
    extract::{Path, State},
    response::Json,
};
use tracing::info;

use shared_models::error::AppError;
use shared_scheduling::SchedulingService;

use crate::{ArrivalRequest, PositionResponse, QueueCoordinator};

/// Register a walk-in arrival and report the position the service assigned
pub async fn announce_arrival(
    State(scheduling): State<Arc<dyn SchedulingService>>,
    Json(request): Json<ArrivalRequest>,
) -> Result<Json<PositionResponse>, AppError> {
    info!("Arrival announced at front desk");

    let coordinator = QueueCoordinator::with_service(scheduling);
    let position = coordinator.announce_arrival(&request.patient_name).await?;

    Ok(Json(position.into()))
}

/// Look up a patient's current queue position
pub async fn get_queue_position(
    State(scheduling): State<Arc<dyn SchedulingService>>,
    Path(patient_name): Path<String>,
) -> Result<Json<PositionResponse>, AppError> {
    let coordinator = QueueCoordinator::with_service(scheduling);
    let position = coordinator.lookup_position(&patient_name).await?;

    Ok(Json(position.into()))
}
