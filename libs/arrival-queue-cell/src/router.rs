use std::sync::Arc;
use axum::{
    Router,
    routing::{get, post},
};

use shared_scheduling::SchedulingService;
use crate::handlers::{announce_arrival, get_queue_position};

pub fn create_arrival_queue_router(scheduling: Arc<dyn SchedulingService>) -> Router {
    Router::new()
        .route("/arrive", post(announce_arrival))
        .route("/queue-position/{patient_name}", get(get_queue_position))
        .with_state(scheduling)
}
