use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use mongodb::Database;
use tokio::time::timeout;
use tracing::error;

use shared_models::{Appointment, AppointmentStatus, Doctor, ProfileUpdate};

use crate::error::StoreError;
use crate::memory::MemoryStore;
use crate::mongo::{MongoAppointmentRepository, MongoDoctorRepository};
use crate::repository::{AppointmentRepository, DoctorRepository};

/// Handle passed to every service. Each call is bounded by `op_timeout`;
/// a call that overruns fails with [`StoreError::Timeout`] and is not retried.
#[derive(Clone)]
pub struct Store {
    doctors: Arc<dyn DoctorRepository>,
    appointments: Arc<dyn AppointmentRepository>,
    op_timeout: Duration,
}

impl Store {
    pub fn new(
        doctors: Arc<dyn DoctorRepository>,
        appointments: Arc<dyn AppointmentRepository>,
        op_timeout: Duration,
    ) -> Self {
        Self {
            doctors,
            appointments,
            op_timeout,
        }
    }

    pub fn mongo(database: &Database, op_timeout: Duration) -> Self {
        Self::new(
            Arc::new(MongoDoctorRepository::new(database, op_timeout)),
            Arc::new(MongoAppointmentRepository::new(database, op_timeout)),
            op_timeout,
        )
    }

    pub fn memory(op_timeout: Duration) -> Self {
        Self::from_memory(Arc::new(MemoryStore::new()), op_timeout)
    }

    pub fn from_memory(memory: Arc<MemoryStore>, op_timeout: Duration) -> Self {
        Self::new(memory.clone(), memory, op_timeout)
    }

    pub fn op_timeout(&self) -> Duration {
        self.op_timeout
    }

    async fn bounded<T, F>(&self, operation: &str, fut: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        match timeout(self.op_timeout, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) => {
                error!("Store operation {} failed: {}", operation, err);
                Err(err)
            }
            Err(_) => {
                error!("Store operation {} timed out after {:?}", operation, self.op_timeout);
                Err(StoreError::Timeout(self.op_timeout))
            }
        }
    }

    // Doctors

    pub async fn insert_doctor(&self, doctor: &Doctor) -> Result<(), StoreError> {
        self.bounded("insert_doctor", self.doctors.insert(doctor)).await
    }

    pub async fn find_doctor(&self, id: &str) -> Result<Option<Doctor>, StoreError> {
        self.bounded("find_doctor", self.doctors.find_by_id(id)).await
    }

    pub async fn find_doctor_by_email(&self, email: &str) -> Result<Option<Doctor>, StoreError> {
        self.bounded("find_doctor_by_email", self.doctors.find_by_email(email)).await
    }

    pub async fn list_doctors(&self) -> Result<Vec<Doctor>, StoreError> {
        self.bounded("list_doctors", self.doctors.list()).await
    }

    pub async fn toggle_availability(&self, doctor_id: &str) -> Result<Option<bool>, StoreError> {
        self.bounded("toggle_availability", self.doctors.toggle_availability(doctor_id))
            .await
    }

    pub async fn update_profile(
        &self,
        doctor_id: &str,
        update: &ProfileUpdate,
    ) -> Result<bool, StoreError> {
        self.bounded("update_profile", self.doctors.update_profile(doctor_id, update))
            .await
    }

    // Appointments

    pub async fn insert_appointment(&self, appointment: &Appointment) -> Result<(), StoreError> {
        self.bounded("insert_appointment", self.appointments.insert(appointment))
            .await
    }

    pub async fn find_appointment(&self, id: &str) -> Result<Option<Appointment>, StoreError> {
        self.bounded("find_appointment", self.appointments.find_by_id(id)).await
    }

    pub async fn appointments_for_doctor(
        &self,
        doctor_id: &str,
    ) -> Result<Vec<Appointment>, StoreError> {
        self.bounded(
            "appointments_for_doctor",
            self.appointments.list_by_doctor(doctor_id),
        )
        .await
    }

    pub async fn list_appointments(&self) -> Result<Vec<Appointment>, StoreError> {
        self.bounded("list_appointments", self.appointments.list()).await
    }

    pub async fn transition_appointment(
        &self,
        id: &str,
        from: AppointmentStatus,
        to: AppointmentStatus,
    ) -> Result<bool, StoreError> {
        self.bounded(
            "transition_appointment",
            self.appointments.transition(id, from, to),
        )
        .await
    }
}
