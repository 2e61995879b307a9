pub mod connection;
pub mod error;
pub mod memory;
pub mod mongo;
pub mod repository;
pub mod store;

pub use connection::connect;
pub use error::StoreError;
pub use memory::MemoryStore;
pub use repository::{AppointmentRepository, DoctorRepository};
pub use store::Store;
