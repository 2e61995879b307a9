pub mod admin;
pub mod validation;

pub use admin::AdminService;
