use serde::{Deserialize, Serialize};

use shared_models::{Address, Appointment, ProfileUpdate};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentActionRequest {
    pub appointment_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub fees: f64,
    #[serde(default)]
    pub address: Option<Address>,
    pub available: bool,
}

impl From<UpdateProfileRequest> for ProfileUpdate {
    fn from(request: UpdateProfileRequest) -> Self {
        Self {
            fees: request.fees,
            address: request.address,
            available: request.available,
        }
    }
}

/// Summary counters shown on the doctor's dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardData {
    pub earnings: f64,
    pub appointments: usize,
    pub patients: usize,
    pub latest_appointments: Vec<Appointment>,
}
