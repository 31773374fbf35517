use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use appointment_cell::router::appointment_routes;
use arrival_queue_cell::router::create_arrival_queue_router;
use shared_scheduling::SchedulingService;

pub fn create_router(scheduling: Arc<dyn SchedulingService>) -> Router {
    let api = Router::new()
        .merge(appointment_routes(scheduling.clone()))
        .merge(create_arrival_queue_router(scheduling));

    Router::new()
        .route("/", get(|| async { "Clinic front desk API is running!" }))
        .nest("/api", api)
}
