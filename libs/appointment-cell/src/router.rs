// libs/appointment-cell/src/router.rs
use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};

use shared_scheduling::SchedulingService;

use crate::handlers;

pub fn appointment_routes(scheduling: Arc<dyn SchedulingService>) -> Router {
    Router::new()
        .route(
            "/appointments",
            get(handlers::list_appointments).post(handlers::create_appointment),
        )
        .route(
            "/appointments/{appointment_id}",
            put(handlers::update_appointment).delete(handlers::delete_appointment),
        )
        .route(
            "/wait-time",
            get(handlers::get_wait_time).post(handlers::set_wait_time),
        )
        .with_state(scheduling)
}
