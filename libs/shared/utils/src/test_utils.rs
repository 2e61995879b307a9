use std::sync::Arc;
use std::time::Duration;

use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Algorithm, Argon2, Params, PasswordHasher, Version};
use chrono::Utc;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::{MemoryStore, Store};
use shared_models::auth::{User, ROLE_ADMIN, ROLE_DOCTOR};
use shared_models::{Address, Appointment, AppointmentStatus, Doctor};

use crate::jwt::issue_token;
use crate::state::AppState;

pub const TEST_DOCTOR_PASSWORD: &str = "doctor-password-123";

pub struct TestConfig {
    pub jwt_secret: String,
    pub admin_email: String,
    pub admin_password: String,
    pub store_timeout: Duration,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "test-secret-key-for-jwt-validation-must-be-long-enough".to_string(),
            admin_email: "admin@clinic.test".to_string(),
            admin_password: "admin-password-123".to_string(),
            store_timeout: Duration::from_secs(2),
        }
    }
}

impl TestConfig {
    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            mongo_uri: "mongodb://localhost:27017".to_string(),
            mongo_database: "clinic_test".to_string(),
            jwt_secret: self.jwt_secret.clone(),
            jwt_expiry_hours: 24,
            admin_email: self.admin_email.clone(),
            admin_password: self.admin_password.clone(),
            store_timeout: self.store_timeout,
            server_port: 0,
        }
    }

    /// State backed by a fresh in-memory store.
    pub fn to_state(&self) -> Arc<AppState> {
        self.to_state_with(Arc::new(MemoryStore::new()))
    }

    pub fn to_state_with(&self, memory: Arc<MemoryStore>) -> Arc<AppState> {
        let store = Store::from_memory(memory, self.store_timeout);
        AppState::new(self.to_app_config(), store).into_arc()
    }
}

pub struct TestUser {
    pub id: String,
    pub email: String,
    pub role: String,
}

impl Default for TestUser {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: "test@example.com".to_string(),
            role: ROLE_DOCTOR.to_string(),
        }
    }
}

impl TestUser {
    pub fn new(id: &str, email: &str, role: &str) -> Self {
        Self {
            id: id.to_string(),
            email: email.to_string(),
            role: role.to_string(),
        }
    }

    pub fn doctor(doctor: &Doctor) -> Self {
        Self::new(&doctor.id, &doctor.email, ROLE_DOCTOR)
    }

    pub fn admin(email: &str) -> Self {
        Self::new(email, email, ROLE_ADMIN)
    }

    pub fn to_user(&self) -> User {
        User {
            id: self.id.clone(),
            email: Some(self.email.clone()),
            role: Some(self.role.clone()),
            created_at: Some(Utc::now()),
        }
    }
}

pub struct JwtTestUtils;

impl JwtTestUtils {
    pub fn create_test_token(user: &TestUser, secret: &str, exp_hours: Option<i64>) -> String {
        issue_token(
            &user.id,
            Some(&user.email),
            &user.role,
            secret,
            exp_hours.unwrap_or(24),
        )
        .expect("test secret must not be empty")
    }

    pub fn create_expired_token(user: &TestUser, secret: &str) -> String {
        Self::create_test_token(user, secret, Some(-1))
    }

    pub fn create_invalid_signature_token(user: &TestUser) -> String {
        Self::create_test_token(user, "wrong-secret", Some(24))
    }

    pub fn create_malformed_token() -> String {
        "invalid.token.format".to_string()
    }
}

pub struct TestFixtures;

impl TestFixtures {
    /// Argon2id hash with minimal cost so fixtures stay fast; verification
    /// reads the parameters back from the hash string.
    pub fn cheap_hash(password: &str) -> String {
        let params = Params::new(1024, 1, 1, None).expect("valid argon2 params");
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
        let salt = SaltString::generate(&mut OsRng);
        argon2
            .hash_password(password.as_bytes(), &salt)
            .expect("hashing with fixed params")
            .to_string()
    }

    /// Doctor whose password is [`TEST_DOCTOR_PASSWORD`].
    pub fn doctor(email: &str) -> Doctor {
        Doctor {
            id: Doctor::new_id(),
            name: "Dr. Richard James".to_string(),
            email: email.to_string(),
            password_hash: Self::cheap_hash(TEST_DOCTOR_PASSWORD),
            image: None,
            speciality: "General physician".to_string(),
            degree: "MBBS".to_string(),
            experience: "4 Years".to_string(),
            about: "Focused on preventive care.".to_string(),
            available: true,
            fees: 50.0,
            address: Address {
                line1: "17th Cross, Richmond".to_string(),
                line2: "Circle, Ring Road".to_string(),
            },
            created_at: Utc::now(),
        }
    }

    pub fn appointment(doctor_id: &str, patient_id: &str, amount: f64) -> Appointment {
        Appointment {
            id: Appointment::new_id(),
            doctor_id: doctor_id.to_string(),
            patient_id: patient_id.to_string(),
            slot_date: "20_10_2026".to_string(),
            slot_time: "10:30 AM".to_string(),
            amount,
            payment: false,
            status: AppointmentStatus::Scheduled,
            created_at: Utc::now(),
        }
    }

    pub async fn seed_doctor(state: &AppState, email: &str) -> Doctor {
        let doctor = Self::doctor(email);
        state
            .store
            .insert_doctor(&doctor)
            .await
            .expect("seed doctor");
        doctor
    }

    pub async fn seed_appointment(state: &AppState, appointment: Appointment) -> Appointment {
        state
            .store
            .insert_appointment(&appointment)
            .await
            .expect("seed appointment");
        appointment
    }
}
