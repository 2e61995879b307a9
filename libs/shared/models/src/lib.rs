pub mod appointment;
pub mod auth;
pub mod doctor;
pub mod error;

pub use appointment::{
    distinct_patient_count, latest_first, Appointment, AppointmentStatus, TransitionError,
    LATEST_APPOINTMENTS_LIMIT,
};
pub use doctor::{Address, Doctor, DoctorListing, DoctorProfile, ProfileUpdate};
