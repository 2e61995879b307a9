use tracing::{debug, error, info, warn};

use shared_config::AppConfig;
use shared_database::Store;
use shared_models::auth::{LoginRequest, ROLE_DOCTOR};
use shared_models::error::AppError;
use shared_models::{DoctorListing, DoctorProfile, ProfileUpdate};
use shared_utils::jwt::issue_token;
use shared_utils::password::PasswordService;
use shared_utils::AppState;

pub const INVALID_CREDENTIALS: &str = "Invalid credentials";
pub const DOCTOR_NOT_FOUND: &str = "Doctor not found";

pub struct DoctorService {
    store: Store,
    config: AppConfig,
}

impl DoctorService {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            config: state.config.clone(),
        }
    }

    /// Check email and password, then sign a doctor token. Unknown email and
    /// wrong password produce the same error.
    pub async fn login(&self, request: LoginRequest) -> Result<String, AppError> {
        let email = request.email.trim().to_lowercase();
        debug!("Doctor login attempt for {}", email);

        let doctor = self.store.find_doctor_by_email(&email).await?;

        let Some(doctor) = doctor else {
            tokio::task::spawn_blocking(move || PasswordService::verify_against_dummy(&request.password))
                .await
                .map_err(|e| AppError::Internal(e.to_string()))?;
            warn!("Login rejected: unknown email");
            return Err(AppError::Auth(INVALID_CREDENTIALS.to_string()));
        };

        let hash = doctor.password_hash.clone();
        let password = request.password;
        let is_match = tokio::task::spawn_blocking(move || PasswordService::verify_password(&password, &hash))
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?
            .unwrap_or_else(|e| {
                error!("Stored password hash for doctor {} is unreadable: {}", doctor.id, e);
                false
            });

        if !is_match {
            warn!("Login rejected for doctor {}: password mismatch", doctor.id);
            return Err(AppError::Auth(INVALID_CREDENTIALS.to_string()));
        }

        let token = issue_token(
            &doctor.id,
            Some(&doctor.email),
            ROLE_DOCTOR,
            &self.config.jwt_secret,
            self.config.jwt_expiry_hours,
        )
        .map_err(AppError::Internal)?;

        info!("Doctor {} logged in", doctor.id);
        Ok(token)
    }

    /// Flip the doctor's availability. Returns the new value.
    pub async fn change_availability(&self, doctor_id: &str) -> Result<bool, AppError> {
        debug!("Changing availability for doctor {}", doctor_id);

        let available = self
            .store
            .toggle_availability(doctor_id)
            .await?
            .ok_or_else(|| AppError::NotFound(DOCTOR_NOT_FOUND.to_string()))?;

        info!("Doctor {} availability is now {}", doctor_id, available);
        Ok(available)
    }

    /// Public directory: no password, no email.
    pub async fn list_doctors(&self) -> Result<Vec<DoctorListing>, AppError> {
        let doctors = self.store.list_doctors().await?;
        Ok(doctors.iter().map(DoctorListing::from).collect())
    }

    pub async fn get_profile(&self, doctor_id: &str) -> Result<DoctorProfile, AppError> {
        debug!("Fetching profile for doctor {}", doctor_id);

        self.store
            .find_doctor(doctor_id)
            .await?
            .map(|doctor| DoctorProfile::from(&doctor))
            .ok_or_else(|| AppError::NotFound(DOCTOR_NOT_FOUND.to_string()))
    }

    pub async fn update_profile(&self, doctor_id: &str, update: ProfileUpdate) -> Result<(), AppError> {
        debug!("Updating profile for doctor {}", doctor_id);

        if !update.fees.is_finite() || update.fees < 0.0 {
            return Err(AppError::ValidationError(
                "Fees must be a non-negative number".to_string(),
            ));
        }

        if !self.store.update_profile(doctor_id, &update).await? {
            return Err(AppError::NotFound(DOCTOR_NOT_FOUND.to_string()));
        }

        info!("Doctor {} profile updated", doctor_id);
        Ok(())
    }
}
