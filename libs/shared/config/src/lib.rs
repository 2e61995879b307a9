use std::env;
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_STORE_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_JWT_EXPIRY_HOURS: i64 = 24;
pub const DEFAULT_SERVER_PORT: u16 = 4000;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub mongo_uri: String,
    pub mongo_database: String,
    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,
    pub admin_email: String,
    pub admin_password: String,
    pub store_timeout: Duration,
    pub server_port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            mongo_uri: env::var("MONGO_URI")
                .unwrap_or_else(|_| {
                    warn!("MONGO_URI not set, using empty value");
                    String::new()
                }),
            mongo_database: env::var("MONGO_DATABASE")
                .unwrap_or_else(|_| {
                    warn!("MONGO_DATABASE not set, using default");
                    "clinic".to_string()
                }),
            jwt_secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| {
                    warn!("JWT_SECRET not set, using empty value");
                    String::new()
                }),
            jwt_expiry_hours: parse_or_default("JWT_EXPIRY_HOURS", DEFAULT_JWT_EXPIRY_HOURS),
            admin_email: env::var("ADMIN_EMAIL")
                .unwrap_or_else(|_| {
                    warn!("ADMIN_EMAIL not set, admin login disabled");
                    String::new()
                }),
            admin_password: env::var("ADMIN_PASSWORD")
                .unwrap_or_else(|_| {
                    warn!("ADMIN_PASSWORD not set, admin login disabled");
                    String::new()
                }),
            store_timeout: Duration::from_secs(parse_value(
                "STORE_TIMEOUT_SECS",
                env::var("STORE_TIMEOUT_SECS").ok(),
                DEFAULT_STORE_TIMEOUT_SECS,
                |secs| *secs > 0,
            )),
            server_port: parse_or_default("PORT", DEFAULT_SERVER_PORT),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.mongo_uri.is_empty() && !self.jwt_secret.is_empty()
    }

    pub fn is_admin_configured(&self) -> bool {
        !self.admin_email.is_empty() && !self.admin_password.is_empty()
    }
}

fn parse_or_default<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Display,
{
    parse_value(key, env::var(key).ok(), default, |_| true)
}

/// Parse `raw`, falling back to `default` when it is unset, unparsable or
/// rejected by `accept`.
fn parse_value<T, F>(key: &str, raw: Option<String>, default: T, accept: F) -> T
where
    T: std::str::FromStr + std::fmt::Display,
    F: Fn(&T) -> bool,
{
    let Some(raw) = raw else {
        return default;
    };

    match raw.trim().parse::<T>() {
        Ok(value) if accept(&value) => value,
        _ => {
            warn!("{} has an invalid value {:?}, using default {}", key, raw, default);
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AppConfig {
        AppConfig {
            mongo_uri: "mongodb://localhost:27017".to_string(),
            mongo_database: "clinic".to_string(),
            jwt_secret: "secret".to_string(),
            jwt_expiry_hours: DEFAULT_JWT_EXPIRY_HOURS,
            admin_email: String::new(),
            admin_password: String::new(),
            store_timeout: Duration::from_secs(DEFAULT_STORE_TIMEOUT_SECS),
            server_port: DEFAULT_SERVER_PORT,
        }
    }

    #[test]
    fn test_is_configured_requires_uri_and_secret() {
        let mut cfg = config();
        assert!(cfg.is_configured());

        cfg.jwt_secret.clear();
        assert!(!cfg.is_configured());
    }

    #[test]
    fn test_admin_configured_needs_both_credentials() {
        let mut cfg = config();
        assert!(!cfg.is_admin_configured());

        cfg.admin_email = "admin@clinic.test".to_string();
        assert!(!cfg.is_admin_configured());

        cfg.admin_password = "hunter22".to_string();
        assert!(cfg.is_admin_configured());
    }

    #[test]
    fn test_zero_store_timeout_uses_default() {
        let positive = |secs: &u64| *secs > 0;

        let zero = parse_value("STORE_TIMEOUT_SECS", Some("0".to_string()), DEFAULT_STORE_TIMEOUT_SECS, positive);
        assert_eq!(zero, DEFAULT_STORE_TIMEOUT_SECS);

        let five = parse_value("STORE_TIMEOUT_SECS", Some(" 5 ".to_string()), DEFAULT_STORE_TIMEOUT_SECS, positive);
        assert_eq!(five, 5);

        let junk = parse_value("STORE_TIMEOUT_SECS", Some("soon".to_string()), DEFAULT_STORE_TIMEOUT_SECS, positive);
        assert_eq!(junk, DEFAULT_STORE_TIMEOUT_SECS);
    }

    #[test]
    fn test_parse_or_default_falls_back_when_unset() {
        let value: u64 = parse_or_default("CLINIC_CONFIG_TEST_UNSET_KEY", 7);
        assert_eq!(value, 7);
    }
}
