use std::sync::OnceLock;

use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use tracing::{instrument, warn};

pub const MIN_PASSWORD_LENGTH: usize = 8;

pub struct PasswordService;

impl PasswordService {
    #[instrument(skip(password))]
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(password_hash.to_string())
    }

    #[instrument(skip(password, hash))]
    pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
        let parsed_hash = PasswordHash::new(hash)?;
        let argon2 = Argon2::default();

        match argon2.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Spend the same work as a real verification when the account does not
    /// exist, so response time does not reveal which emails are registered.
    pub fn verify_against_dummy(password: &str) {
        static DUMMY_HASH: OnceLock<Option<String>> = OnceLock::new();

        let dummy = DUMMY_HASH.get_or_init(|| Self::hash_password("dummy-password-for-timing").ok());
        match dummy {
            Some(hash) => {
                let _ = Self::verify_password(password, hash);
            }
            None => warn!("Dummy password hash unavailable"),
        }
    }

    pub fn is_long_enough(password: &str) -> bool {
        password.chars().count() >= MIN_PASSWORD_LENGTH
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = PasswordService::hash_password("correct horse").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(PasswordService::verify_password("correct horse", &hash).unwrap());
        assert!(!PasswordService::verify_password("wrong horse", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = PasswordService::hash_password("same").unwrap();
        let b = PasswordService::hash_password("same").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_garbage_hash_is_an_error() {
        assert!(PasswordService::verify_password("x", "not-a-phc-string").is_err());
    }

    #[test]
    fn test_length_rule() {
        assert!(!PasswordService::is_long_enough("short"));
        assert!(PasswordService::is_long_enough("longenough"));
    }
}
