use serde::{Deserialize, Serialize};

use shared_models::{Address, Appointment};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddDoctorRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub speciality: String,
    pub degree: String,
    pub experience: String,
    #[serde(default)]
    pub about: String,
    pub fees: f64,
    #[serde(default)]
    pub address: Address,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorIdRequest {
    pub doctor_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentIdRequest {
    pub appointment_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminDashboardData {
    pub doctors: usize,
    pub appointments: usize,
    pub patients: usize,
    pub latest_appointments: Vec<Appointment>,
}
