pub mod appointments;
pub mod dashboard;
pub mod doctor;

pub use appointments::DoctorAppointmentService;
pub use dashboard::DashboardService;
pub use doctor::DoctorService;
