use tracing::{debug, info, warn};

use shared_database::Store;
use shared_models::error::AppError;
use shared_models::{Appointment, AppointmentStatus};
use shared_utils::AppState;

pub const COMPLETE_FAILED: &str = "Mark Failed";
pub const CANCEL_FAILED: &str = "Cancellation Failed";

pub struct DoctorAppointmentService {
    store: Store,
}

impl DoctorAppointmentService {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }

    pub async fn list_appointments(&self, doctor_id: &str) -> Result<Vec<Appointment>, AppError> {
        debug!("Listing appointments for doctor {}", doctor_id);
        Ok(self.store.appointments_for_doctor(doctor_id).await?)
    }

    pub async fn complete_appointment(
        &self,
        doctor_id: &str,
        appointment_id: &str,
    ) -> Result<(), AppError> {
        self.finish(doctor_id, appointment_id, AppointmentStatus::Completed, COMPLETE_FAILED)
            .await
    }

    pub async fn cancel_appointment(
        &self,
        doctor_id: &str,
        appointment_id: &str,
    ) -> Result<(), AppError> {
        self.finish(doctor_id, appointment_id, AppointmentStatus::Cancelled, CANCEL_FAILED)
            .await
    }

    /// Move an appointment the doctor owns out of `Scheduled`. Missing and
    /// foreign appointments report the same `failure` message.
    async fn finish(
        &self,
        doctor_id: &str,
        appointment_id: &str,
        target: AppointmentStatus,
        failure: &str,
    ) -> Result<(), AppError> {
        debug!("Doctor {} moving appointment {} to {}", doctor_id, appointment_id, target);

        let appointment = match self.store.find_appointment(appointment_id).await? {
            Some(appointment) => appointment,
            None => {
                warn!("Appointment {} not found", appointment_id);
                return Err(AppError::NotFound(failure.to_string()));
            }
        };

        if !appointment.is_owned_by(doctor_id) {
            warn!(
                "Doctor {} tried to modify appointment {} owned by {}",
                doctor_id, appointment_id, appointment.doctor_id
            );
            return Err(AppError::Auth(failure.to_string()));
        }

        let next = appointment
            .status
            .transition_to(target)
            .map_err(|e| AppError::Conflict(e.to_string()))?;

        let applied = self
            .store
            .transition_appointment(appointment_id, appointment.status, next)
            .await?;

        if !applied {
            warn!("Appointment {} changed state before it could be {}", appointment_id, target);
            return Err(AppError::Conflict(
                "Appointment is no longer scheduled".to_string(),
            ));
        }

        info!("Appointment {} is now {}", appointment_id, next);
        Ok(())
    }
}
