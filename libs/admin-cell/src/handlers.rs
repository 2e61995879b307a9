use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, State},
    Json,
};
use serde_json::{json, Value};

use shared_models::auth::{LoginRequest, User, ROLE_ADMIN};
use shared_models::error::AppError;
use shared_utils::extractor::require_role;
use shared_utils::AppState;

use crate::models::{AddDoctorRequest, AppointmentIdRequest, DoctorIdRequest};
use crate::services::AdminService;

#[axum::debug_handler]
pub async fn login_admin(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(request) = payload?;
    let token = AdminService::new(&state).login(&request)?;

    Ok(Json(json!({
        "success": true,
        "token": token
    })))
}

#[axum::debug_handler]
pub async fn add_doctor(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    payload: Result<Json<AddDoctorRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    require_role(&user, ROLE_ADMIN)?;
    let Json(request) = payload?;

    let doctor = AdminService::new(&state).add_doctor(request).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Doctor Added",
        "doctor": doctor
    })))
}

#[axum::debug_handler]
pub async fn all_doctors(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    require_role(&user, ROLE_ADMIN)?;

    let doctors = AdminService::new(&state).all_doctors().await?;

    Ok(Json(json!({
        "success": true,
        "doctors": doctors
    })))
}

#[axum::debug_handler]
pub async fn change_availability(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    payload: Result<Json<DoctorIdRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    require_role(&user, ROLE_ADMIN)?;
    let Json(request) = payload?;

    let available = AdminService::new(&state)
        .change_availability(&request.doctor_id)
        .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Availability changed",
        "available": available
    })))
}

#[axum::debug_handler]
pub async fn appointments_admin(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    require_role(&user, ROLE_ADMIN)?;

    let appointments = AdminService::new(&state).list_appointments().await?;

    Ok(Json(json!({
        "success": true,
        "appointments": appointments
    })))
}

#[axum::debug_handler]
pub async fn appointment_cancel(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    payload: Result<Json<AppointmentIdRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    require_role(&user, ROLE_ADMIN)?;
    let Json(request) = payload?;

    AdminService::new(&state)
        .cancel_appointment(&request.appointment_id)
        .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Appointment Cancelled"
    })))
}

#[axum::debug_handler]
pub async fn admin_dashboard(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    require_role(&user, ROLE_ADMIN)?;

    let dash_data = AdminService::new(&state).dashboard().await?;

    Ok(Json(json!({
        "success": true,
        "dash_data": dash_data
    })))
}
