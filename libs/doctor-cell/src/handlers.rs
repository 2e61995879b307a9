use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, State},
    Json,
};
use serde_json::{json, Value};

use shared_models::auth::{LoginRequest, User, ROLE_DOCTOR};
use shared_models::error::AppError;
use shared_utils::extractor::require_role;
use shared_utils::AppState;

use crate::models::{AppointmentActionRequest, UpdateProfileRequest};
use crate::services::{DashboardService, DoctorAppointmentService, DoctorService};

// ==============================================================================
// PUBLIC HANDLERS (NO AUTHENTICATION REQUIRED)
// ==============================================================================

#[axum::debug_handler]
pub async fn login_doctor(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(request) = payload?;
    let token = DoctorService::new(&state).login(request).await?;

    Ok(Json(json!({
        "success": true,
        "token": token
    })))
}

#[axum::debug_handler]
pub async fn doctor_list(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    let doctors = DoctorService::new(&state).list_doctors().await?;

    Ok(Json(json!({
        "success": true,
        "doctors": doctors
    })))
}

// ==============================================================================
// PROTECTED HANDLERS (acting doctor = verified token subject)
// ==============================================================================

#[axum::debug_handler]
pub async fn change_availability(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    require_role(&user, ROLE_DOCTOR)?;

    let available = DoctorService::new(&state)
        .change_availability(&user.id)
        .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Availability changed",
        "available": available
    })))
}

#[axum::debug_handler]
pub async fn appointments_doctor(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    require_role(&user, ROLE_DOCTOR)?;

    let appointments = DoctorAppointmentService::new(&state)
        .list_appointments(&user.id)
        .await?;

    Ok(Json(json!({
        "success": true,
        "appointments": appointments
    })))
}

#[axum::debug_handler]
pub async fn appointment_complete(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    payload: Result<Json<AppointmentActionRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    require_role(&user, ROLE_DOCTOR)?;
    let Json(request) = payload?;

    DoctorAppointmentService::new(&state)
        .complete_appointment(&user.id, &request.appointment_id)
        .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Appointment Completed"
    })))
}

#[axum::debug_handler]
pub async fn appointment_cancel(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    payload: Result<Json<AppointmentActionRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    require_role(&user, ROLE_DOCTOR)?;
    let Json(request) = payload?;

    DoctorAppointmentService::new(&state)
        .cancel_appointment(&user.id, &request.appointment_id)
        .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Appointment Cancelled"
    })))
}

#[axum::debug_handler]
pub async fn doctor_dashboard(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    require_role(&user, ROLE_DOCTOR)?;

    let dash_data = DashboardService::new(&state).dashboard(&user.id).await?;

    Ok(Json(json!({
        "success": true,
        "dash_data": dash_data
    })))
}

#[axum::debug_handler]
pub async fn doctor_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    require_role(&user, ROLE_DOCTOR)?;

    let profile_data = DoctorService::new(&state).get_profile(&user.id).await?;

    Ok(Json(json!({
        "success": true,
        "profile_data": profile_data
    })))
}

#[axum::debug_handler]
pub async fn update_doctor_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    payload: Result<Json<UpdateProfileRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    require_role(&user, ROLE_DOCTOR)?;
    let Json(request) = payload?;

    DoctorService::new(&state)
        .update_profile(&user.id, request.into())
        .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Profile Updated"
    })))
}
