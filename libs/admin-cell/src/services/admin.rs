use chrono::Utc;
use ring::constant_time::verify_slices_are_equal;
use ring::digest::{digest, SHA256};
use tracing::{debug, info, warn};

use shared_config::AppConfig;
use shared_database::Store;
use shared_models::auth::{LoginRequest, ROLE_ADMIN};
use shared_models::error::AppError;
use shared_models::{
    distinct_patient_count, latest_first, Appointment, AppointmentStatus, Doctor, DoctorProfile,
    LATEST_APPOINTMENTS_LIMIT,
};
use shared_utils::jwt::issue_token;
use shared_utils::password::PasswordService;
use shared_utils::AppState;

use crate::models::{AddDoctorRequest, AdminDashboardData};
use crate::services::validation::validate_new_doctor;

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Compare SHA-256 digests so the comparison length never depends on the input.
fn credential_matches(given: &str, expected: &str) -> bool {
    let given = digest(&SHA256, given.as_bytes());
    let expected = digest(&SHA256, expected.as_bytes());
    verify_slices_are_equal(given.as_ref(), expected.as_ref()).is_ok()
}

pub struct AdminService {
    store: Store,
    config: AppConfig,
}

impl AdminService {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            config: state.config.clone(),
        }
    }

    /// Compare against the configured administrator credentials and sign an
    /// admin token.
    pub fn login(&self, request: &LoginRequest) -> Result<String, AppError> {
        if !self.config.is_admin_configured() {
            warn!("Admin login attempted but no admin credentials are configured");
            return Err(AppError::Auth("Invalid credentials".to_string()));
        }

        let email_ok = credential_matches(
            &normalize_email(&request.email),
            &normalize_email(&self.config.admin_email),
        );
        let password_ok = credential_matches(&request.password, &self.config.admin_password);

        if !(email_ok && password_ok) {
            warn!("Admin login rejected");
            return Err(AppError::Auth("Invalid credentials".to_string()));
        }

        let token = issue_token(
            &self.config.admin_email,
            Some(&self.config.admin_email),
            ROLE_ADMIN,
            &self.config.jwt_secret,
            self.config.jwt_expiry_hours,
        )
        .map_err(AppError::Internal)?;

        info!("Admin logged in");
        Ok(token)
    }

    pub async fn add_doctor(&self, request: AddDoctorRequest) -> Result<DoctorProfile, AppError> {
        validate_new_doctor(&request)?;

        let email = normalize_email(&request.email);
        debug!("Adding doctor {}", email);

        if self.store.find_doctor_by_email(&email).await?.is_some() {
            return Err(AppError::Conflict(
                "Doctor with this email already exists".to_string(),
            ));
        }

        let password = request.password;
        let password_hash = tokio::task::spawn_blocking(move || PasswordService::hash_password(&password))
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;

        let doctor = Doctor {
            id: Doctor::new_id(),
            name: request.name.trim().to_string(),
            email,
            password_hash,
            image: request.image,
            speciality: request.speciality,
            degree: request.degree,
            experience: request.experience,
            about: request.about,
            available: true,
            fees: request.fees,
            address: request.address,
            created_at: Utc::now(),
        };

        self.store.insert_doctor(&doctor).await?;

        info!("Doctor {} added", doctor.id);
        Ok(DoctorProfile::from(&doctor))
    }

    pub async fn all_doctors(&self) -> Result<Vec<DoctorProfile>, AppError> {
        let doctors = self.store.list_doctors().await?;
        Ok(doctors.iter().map(DoctorProfile::from).collect())
    }

    pub async fn change_availability(&self, doctor_id: &str) -> Result<bool, AppError> {
        debug!("Admin changing availability for doctor {}", doctor_id);

        let available = self
            .store
            .toggle_availability(doctor_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Doctor not found".to_string()))?;

        info!("Doctor {} availability is now {}", doctor_id, available);
        Ok(available)
    }

    pub async fn list_appointments(&self) -> Result<Vec<Appointment>, AppError> {
        Ok(self.store.list_appointments().await?)
    }

    /// Administrators may cancel any scheduled appointment.
    pub async fn cancel_appointment(&self, appointment_id: &str) -> Result<(), AppError> {
        debug!("Admin cancelling appointment {}", appointment_id);

        let appointment = self
            .store
            .find_appointment(appointment_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Appointment not found".to_string()))?;

        let next = appointment
            .status
            .transition_to(AppointmentStatus::Cancelled)
            .map_err(|e| AppError::Conflict(e.to_string()))?;

        if !self
            .store
            .transition_appointment(appointment_id, appointment.status, next)
            .await?
        {
            return Err(AppError::Conflict(
                "Appointment is no longer scheduled".to_string(),
            ));
        }

        info!("Appointment {} cancelled by admin", appointment_id);
        Ok(())
    }

    pub async fn dashboard(&self) -> Result<AdminDashboardData, AppError> {
        let doctors = self.store.list_doctors().await?;
        let appointments = self.store.list_appointments().await?;

        Ok(AdminDashboardData {
            doctors: doctors.len(),
            appointments: appointments.len(),
            patients: distinct_patient_count(&appointments),
            latest_appointments: latest_first(&appointments, LATEST_APPOINTMENTS_LIMIT),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_matches() {
        assert!(credential_matches("admin-password-123", "admin-password-123"));
        assert!(!credential_matches("admin-password-12", "admin-password-123"));
        assert!(!credential_matches("", "admin-password-123"));
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Admin@Clinic.TEST "), "admin@clinic.test");
    }
}
