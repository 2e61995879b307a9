use async_trait::async_trait;

use shared_models::{Appointment, AppointmentStatus, Doctor, ProfileUpdate};

use crate::error::StoreError;

#[async_trait]
pub trait DoctorRepository: Send + Sync {
    async fn insert(&self, doctor: &Doctor) -> Result<(), StoreError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Doctor>, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Doctor>, StoreError>;

    async fn list(&self) -> Result<Vec<Doctor>, StoreError>;

    /// Flip `available` in one step. Returns the new value, or `None` when
    /// no doctor has this id.
    async fn toggle_availability(&self, id: &str) -> Result<Option<bool>, StoreError>;

    /// Returns `false` when no doctor has this id.
    async fn update_profile(&self, id: &str, update: &ProfileUpdate) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    async fn insert(&self, appointment: &Appointment) -> Result<(), StoreError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Appointment>, StoreError>;

    /// Appointments for one doctor, oldest first.
    async fn list_by_doctor(&self, doctor_id: &str) -> Result<Vec<Appointment>, StoreError>;

    async fn list(&self) -> Result<Vec<Appointment>, StoreError>;

    /// Compare-and-set on the status field. Returns `false` if the
    /// appointment is missing or no longer in `from`.
    async fn transition(
        &self,
        id: &str,
        from: AppointmentStatus,
        to: AppointmentStatus,
    ) -> Result<bool, StoreError>;
}
