use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use admin_cell::router::admin_routes;
use doctor_cell::router::doctor_routes;
use shared_utils::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "Clinic API is running!" }))
        .nest("/api/doctor", doctor_routes(state.clone()))
        .nest("/api/admin", admin_routes(state))
}
