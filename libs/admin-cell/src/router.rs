use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
    middleware,
};

use shared_utils::extractor::auth_middleware;
use shared_utils::AppState;

use crate::handlers;

pub fn admin_routes(state: Arc<AppState>) -> Router {
    let public_routes = Router::new()
        .route("/login", post(handlers::login_admin));

    // Every other admin action needs a token with the admin role
    let protected_routes = Router::new()
        .route("/add-doctor", post(handlers::add_doctor))
        .route("/all-doctors", get(handlers::all_doctors))
        .route("/change-availability", post(handlers::change_availability))
        .route("/appointments", get(handlers::appointments_admin))
        .route("/cancel-appointment", post(handlers::appointment_cancel))
        .route("/dashboard", get(handlers::admin_dashboard))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
}
