use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
    middleware,
};

use shared_utils::extractor::auth_middleware;
use shared_utils::AppState;

use crate::handlers;

pub fn doctor_routes(state: Arc<AppState>) -> Router {
    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/login", post(handlers::login_doctor))
        .route("/list", get(handlers::doctor_list));

    // Protected routes: the acting doctor comes from the token, never the body
    let protected_routes = Router::new()
        .route("/change-availability", post(handlers::change_availability))
        .route("/appointments", get(handlers::appointments_doctor))
        .route("/complete-appointment", post(handlers::appointment_complete))
        .route("/cancel-appointment", post(handlers::appointment_cancel))
        .route("/dashboard", get(handlers::doctor_dashboard))
        .route("/profile", get(handlers::doctor_profile))
        .route("/update-profile", post(handlers::update_doctor_profile))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
}
