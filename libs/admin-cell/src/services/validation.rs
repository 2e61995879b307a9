use std::sync::OnceLock;

use regex::Regex;

use shared_models::error::AppError;
use shared_utils::password::{PasswordService, MIN_PASSWORD_LENGTH};

use crate::models::AddDoctorRequest;

const EMAIL_PATTERN: &str = r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$";

pub fn is_valid_email(email: &str) -> bool {
    static EMAIL_RE: OnceLock<Option<Regex>> = OnceLock::new();

    EMAIL_RE
        .get_or_init(|| Regex::new(EMAIL_PATTERN).ok())
        .as_ref()
        .is_some_and(|re| re.is_match(email))
}

pub fn validate_new_doctor(request: &AddDoctorRequest) -> Result<(), AppError> {
    let required = [
        ("name", &request.name),
        ("email", &request.email),
        ("password", &request.password),
        ("speciality", &request.speciality),
        ("degree", &request.degree),
        ("experience", &request.experience),
    ];
    let missing: Vec<&str> = required
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| *field)
        .collect();
    if !missing.is_empty() {
        return Err(AppError::ValidationError(format!(
            "Missing Details: {}",
            missing.join(", ")
        )));
    }

    if !is_valid_email(request.email.trim()) {
        return Err(AppError::ValidationError(
            "Please enter a valid email".to_string(),
        ));
    }

    if !PasswordService::is_long_enough(&request.password) {
        return Err(AppError::ValidationError(format!(
            "Please enter a strong password (at least {} characters)",
            MIN_PASSWORD_LENGTH
        )));
    }

    if !request.fees.is_finite() || request.fees < 0.0 {
        return Err(AppError::ValidationError(
            "Fees must be a non-negative number".to_string(),
        ));
    }

    Ok(())
}
