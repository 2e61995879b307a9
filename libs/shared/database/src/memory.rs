use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use shared_models::{Appointment, AppointmentStatus, Doctor, ProfileUpdate};

use crate::error::StoreError;
use crate::repository::{AppointmentRepository, DoctorRepository};

/// Insertion-ordered in-process store. Used by tests and local runs
/// without a MongoDB server.
#[derive(Default)]
pub struct MemoryStore {
    doctors: RwLock<Vec<Doctor>>,
    appointments: RwLock<Vec<Appointment>>,
    latency: Option<Duration>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every operation sleeps for `latency` before touching the data.
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency: Some(latency),
            ..Self::default()
        }
    }

    async fn delay(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl DoctorRepository for MemoryStore {
    async fn insert(&self, doctor: &Doctor) -> Result<(), StoreError> {
        self.delay().await;
        let mut doctors = self.doctors.write().await;
        if doctors.iter().any(|d| d.id == doctor.id || d.email == doctor.email) {
            return Err(StoreError::Backend(format!(
                "duplicate key: doctor {} already exists",
                doctor.email
            )));
        }
        doctors.push(doctor.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Doctor>, StoreError> {
        self.delay().await;
        Ok(self.doctors.read().await.iter().find(|d| d.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Doctor>, StoreError> {
        self.delay().await;
        Ok(self.doctors.read().await.iter().find(|d| d.email == email).cloned())
    }

    async fn list(&self) -> Result<Vec<Doctor>, StoreError> {
        self.delay().await;
        Ok(self.doctors.read().await.clone())
    }

    async fn toggle_availability(&self, id: &str) -> Result<Option<bool>, StoreError> {
        self.delay().await;
        let mut doctors = self.doctors.write().await;
        Ok(doctors.iter_mut().find(|d| d.id == id).map(|doctor| {
            doctor.available ^= true;
            doctor.available
        }))
    }

    async fn update_profile(&self, id: &str, update: &ProfileUpdate) -> Result<bool, StoreError> {
        self.delay().await;
        let mut doctors = self.doctors.write().await;
        match doctors.iter_mut().find(|d| d.id == id) {
            Some(doctor) => {
                doctor.fees = update.fees;
                if let Some(address) = &update.address {
                    doctor.address = address.clone();
                }
                doctor.available = update.available;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl AppointmentRepository for MemoryStore {
    async fn insert(&self, appointment: &Appointment) -> Result<(), StoreError> {
        self.delay().await;
        let mut appointments = self.appointments.write().await;
        if appointments.iter().any(|a| a.id == appointment.id) {
            return Err(StoreError::Backend(format!(
                "duplicate key: appointment {} already exists",
                appointment.id
            )));
        }
        appointments.push(appointment.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Appointment>, StoreError> {
        self.delay().await;
        Ok(self.appointments.read().await.iter().find(|a| a.id == id).cloned())
    }

    async fn list_by_doctor(&self, doctor_id: &str) -> Result<Vec<Appointment>, StoreError> {
        self.delay().await;
        Ok(self
            .appointments
            .read()
            .await
            .iter()
            .filter(|a| a.doctor_id == doctor_id)
            .cloned()
            .collect())
    }

    async fn list(&self) -> Result<Vec<Appointment>, StoreError> {
        self.delay().await;
        Ok(self.appointments.read().await.clone())
    }

    async fn transition(
        &self,
        id: &str,
        from: AppointmentStatus,
        to: AppointmentStatus,
    ) -> Result<bool, StoreError> {
        self.delay().await;
        let mut appointments = self.appointments.write().await;
        match appointments.iter_mut().find(|a| a.id == id && a.status == from) {
            Some(appointment) => {
                appointment.status = to;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
