use std::sync::Arc;

use assert_matches::assert_matches;
use axum::{
    extract::{rejection::JsonRejection, Extension, State},
    Json,
};

use admin_cell::handlers::*;
use admin_cell::models::{AddDoctorRequest, AppointmentIdRequest, DoctorIdRequest};
use shared_models::auth::{LoginRequest, User};
use shared_models::error::AppError;
use shared_models::{Address, AppointmentStatus};
use shared_utils::jwt::validate_token;
use shared_utils::test_utils::{TestConfig, TestFixtures, TestUser};
use shared_utils::AppState;

fn admin_extension() -> Extension<User> {
    Extension(TestUser::admin("admin@clinic.test").to_user())
}

fn login(email: &str, password: &str) -> Result<Json<LoginRequest>, JsonRejection> {
    Ok(Json(LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    }))
}

fn new_doctor(email: &str) -> AddDoctorRequest {
    AddDoctorRequest {
        name: "Dr. Emily Larson".to_string(),
        email: email.to_string(),
        password: "long-enough-password".to_string(),
        speciality: "Gynecologist".to_string(),
        degree: "MBBS".to_string(),
        experience: "3 Years".to_string(),
        about: "Women's health.".to_string(),
        fees: 60.0,
        address: Address {
            line1: "27th Cross, Richmond".to_string(),
            line2: "Circle, Ring Road".to_string(),
        },
        image: None,
    }
}

fn cancel(appointment_id: &str) -> Result<Json<AppointmentIdRequest>, JsonRejection> {
    Ok(Json(AppointmentIdRequest {
        appointment_id: appointment_id.to_string(),
    }))
}

async fn status_of(state: &Arc<AppState>, appointment_id: &str) -> AppointmentStatus {
    state
        .store
        .find_appointment(appointment_id)
        .await
        .unwrap()
        .unwrap()
        .status
}

// ==============================================================================
// LOGIN
// ==============================================================================

#[tokio::test]
async fn test_admin_login_issues_admin_token() {
    let config = TestConfig::default();
    let state = config.to_state();

    let response = login_admin(
        State(state),
        login(&config.admin_email, &config.admin_password),
    )
    .await
    .unwrap()
    .0;

    assert_eq!(response["success"], true);
    let token = response["token"].as_str().unwrap();
    let user = validate_token(token, &config.jwt_secret).unwrap();
    assert!(user.has_role("admin"));
}

#[tokio::test]
async fn test_admin_login_ignores_email_case_and_whitespace() {
    let config = TestConfig::default();
    let state = config.to_state();

    let response = login_admin(
        State(state),
        login("  ADMIN@Clinic.test ", &config.admin_password),
    )
    .await
    .unwrap()
    .0;

    assert_eq!(response["success"], true);
}

#[tokio::test]
async fn test_admin_login_wrong_password() {
    let config = TestConfig::default();
    let state = config.to_state();

    let result = login_admin(State(state), login(&config.admin_email, "guess")).await;

    assert_matches!(result, Err(AppError::Auth(msg)) if msg == "Invalid credentials");
}

#[tokio::test]
async fn test_admin_login_unconfigured() {
    let config = TestConfig {
        admin_email: String::new(),
        admin_password: String::new(),
        ..TestConfig::default()
    };
    let state = config.to_state();

    let result = login_admin(State(state), login("", "")).await;

    assert_matches!(result, Err(AppError::Auth(_)));
}

// ==============================================================================
// ROLE CHECKS
// ==============================================================================

#[tokio::test]
async fn test_doctor_token_cannot_use_admin_handlers() {
    let state = TestConfig::default().to_state();
    let doctor = TestFixtures::seed_doctor(&state, "richard@clinic.test").await;
    let as_doctor = Extension(TestUser::doctor(&doctor).to_user());

    let result = all_doctors(State(state), as_doctor).await;

    assert_matches!(result, Err(AppError::Auth(_)));
}

// ==============================================================================
// DOCTORS
// ==============================================================================

#[tokio::test]
async fn test_add_doctor_then_list() {
    let state = TestConfig::default().to_state();

    let added = add_doctor(
        State(state.clone()),
        admin_extension(),
        Ok(Json(new_doctor("Emily@Clinic.test"))),
    )
    .await
    .unwrap()
    .0;
    assert_eq!(added["success"], true);
    assert_eq!(added["message"], "Doctor Added");
    assert!(added["doctor"].get("password").is_none());
    assert_eq!(added["doctor"]["email"], "emily@clinic.test");
    assert_eq!(added["doctor"]["available"], true);

    let stored = state
        .store
        .find_doctor_by_email("emily@clinic.test")
        .await
        .unwrap()
        .unwrap();
    assert_ne!(stored.password_hash, "long-enough-password");

    let listed = all_doctors(State(state), admin_extension()).await.unwrap().0;
    let doctors = listed["doctors"].as_array().unwrap();
    assert_eq!(doctors.len(), 1);
    assert_eq!(doctors[0]["_id"], stored.id.as_str());
}

#[tokio::test]
async fn test_add_doctor_duplicate_email() {
    let state = TestConfig::default().to_state();
    TestFixtures::seed_doctor(&state, "richard@clinic.test").await;

    let result = add_doctor(
        State(state),
        admin_extension(),
        Ok(Json(new_doctor("richard@clinic.test"))),
    )
    .await;

    assert_matches!(result, Err(AppError::Conflict(_)));
}

#[tokio::test]
async fn test_add_doctor_missing_details() {
    let state = TestConfig::default().to_state();
    let mut request = new_doctor("emily@clinic.test");
    request.speciality.clear();

    let result = add_doctor(State(state.clone()), admin_extension(), Ok(Json(request))).await;

    assert_matches!(result, Err(AppError::ValidationError(msg)) if msg == "Missing Details: speciality");
    assert!(state.store.list_doctors().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_admin_toggles_any_doctor() {
    let state = TestConfig::default().to_state();
    let doctor = TestFixtures::seed_doctor(&state, "richard@clinic.test").await;

    let response = change_availability(
        State(state.clone()),
        admin_extension(),
        Ok(Json(DoctorIdRequest {
            doctor_id: doctor.id.clone(),
        })),
    )
    .await
    .unwrap()
    .0;

    assert_eq!(response["available"], false);
    let stored = state.store.find_doctor(&doctor.id).await.unwrap().unwrap();
    assert!(!stored.available);
}

#[tokio::test]
async fn test_admin_toggle_unknown_doctor() {
    let state = TestConfig::default().to_state();

    let result = change_availability(
        State(state),
        admin_extension(),
        Ok(Json(DoctorIdRequest {
            doctor_id: "missing".to_string(),
        })),
    )
    .await;

    assert_matches!(result, Err(AppError::NotFound(_)));
}

// ==============================================================================
// APPOINTMENTS
// ==============================================================================

#[tokio::test]
async fn test_admin_sees_all_appointments() {
    let state = TestConfig::default().to_state();
    let first = TestFixtures::seed_doctor(&state, "richard@clinic.test").await;
    let second = TestFixtures::seed_doctor(&state, "emily@clinic.test").await;
    TestFixtures::seed_appointment(&state, TestFixtures::appointment(&first.id, "p1", 50.0)).await;
    TestFixtures::seed_appointment(&state, TestFixtures::appointment(&second.id, "p2", 60.0)).await;

    let response = appointments_admin(State(state), admin_extension()).await.unwrap().0;

    assert_eq!(response["appointments"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_admin_cancels_any_appointment_once() {
    let state = TestConfig::default().to_state();
    let doctor = TestFixtures::seed_doctor(&state, "richard@clinic.test").await;
    let appointment =
        TestFixtures::seed_appointment(&state, TestFixtures::appointment(&doctor.id, "p1", 50.0)).await;

    let response = appointment_cancel(State(state.clone()), admin_extension(), cancel(&appointment.id))
        .await
        .unwrap()
        .0;
    assert_eq!(response["message"], "Appointment Cancelled");
    assert_eq!(status_of(&state, &appointment.id).await, AppointmentStatus::Cancelled);

    let again = appointment_cancel(State(state), admin_extension(), cancel(&appointment.id)).await;
    assert_matches!(again, Err(AppError::Conflict(_)));
}

#[tokio::test]
async fn test_admin_cancel_unknown_appointment() {
    let state = TestConfig::default().to_state();

    let result = appointment_cancel(State(state), admin_extension(), cancel("missing")).await;

    assert_matches!(result, Err(AppError::NotFound(msg)) if msg == "Appointment not found");
}

#[tokio::test]
async fn test_admin_cannot_cancel_completed_appointment() {
    let state = TestConfig::default().to_state();
    let doctor = TestFixtures::seed_doctor(&state, "richard@clinic.test").await;
    let mut appointment = TestFixtures::appointment(&doctor.id, "p1", 50.0);
    appointment.status = AppointmentStatus::Completed;
    let appointment = TestFixtures::seed_appointment(&state, appointment).await;

    let result = appointment_cancel(State(state.clone()), admin_extension(), cancel(&appointment.id)).await;

    assert_matches!(result, Err(AppError::Conflict(_)));
    assert_eq!(status_of(&state, &appointment.id).await, AppointmentStatus::Completed);
}

// ==============================================================================
// DASHBOARD
// ==============================================================================

#[tokio::test]
async fn test_admin_dashboard_counts() {
    let state = TestConfig::default().to_state();
    let first = TestFixtures::seed_doctor(&state, "richard@clinic.test").await;
    let second = TestFixtures::seed_doctor(&state, "emily@clinic.test").await;
    for (doctor_id, patient) in [
        (&first.id, "p1"),
        (&first.id, "p2"),
        (&second.id, "p1"),
        (&second.id, "p3"),
        (&first.id, "p4"),
        (&second.id, "p2"),
    ] {
        TestFixtures::seed_appointment(&state, TestFixtures::appointment(doctor_id, patient, 40.0)).await;
    }

    let response = admin_dashboard(State(state), admin_extension()).await.unwrap().0;
    let dash = &response["dash_data"];

    assert_eq!(dash["doctors"], 2);
    assert_eq!(dash["appointments"], 6);
    assert_eq!(dash["patients"], 4);

    let latest = dash["latest_appointments"].as_array().unwrap();
    assert_eq!(latest.len(), 5);
    // Newest first
    assert_eq!(latest[0]["patient_id"], "p2");
    assert_eq!(latest[1]["patient_id"], "p4");
}
