use tracing::debug;

use shared_database::Store;
use shared_models::error::AppError;
use shared_models::{distinct_patient_count, latest_first, Appointment, LATEST_APPOINTMENTS_LIMIT};
use shared_utils::AppState;

use crate::models::DashboardData;

/// Fold a doctor's appointments, in store order, into dashboard counters.
pub fn aggregate(appointments: Vec<Appointment>) -> DashboardData {
    let earnings: f64 = appointments
        .iter()
        .filter(|a| a.counts_toward_earnings())
        .map(|a| a.amount)
        .sum();

    DashboardData {
        earnings,
        appointments: appointments.len(),
        patients: distinct_patient_count(&appointments),
        latest_appointments: latest_first(&appointments, LATEST_APPOINTMENTS_LIMIT),
    }
}

pub struct DashboardService {
    store: Store,
}

impl DashboardService {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }

    pub async fn dashboard(&self, doctor_id: &str) -> Result<DashboardData, AppError> {
        debug!("Building dashboard for doctor {}", doctor_id);
        let appointments = self.store.appointments_for_doctor(doctor_id).await?;
        Ok(aggregate(appointments))
    }
}
