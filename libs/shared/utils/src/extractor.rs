use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, Request},
    middleware::Next,
    response::Response,
    body::Body,
};
use tracing::debug;

use shared_models::auth::User;
use shared_models::error::AppError;

use crate::jwt::validate_token;
use crate::state::AppState;

pub const NOT_AUTHORIZED: &str = "Not Authorized Login Again";

/// Role-specific headers (doctor, admin) that carry the raw token without a
/// `Bearer` prefix. `Authorization` wins when both are present.
const ROLE_TOKEN_HEADERS: [&str; 2] = ["dtoken", "atoken"];

pub fn extract_token(headers: &HeaderMap) -> Result<String, AppError> {
    if let Some(auth_header) = headers.get("Authorization") {
        let auth_value = auth_header
            .to_str()
            .map_err(|_| AppError::Auth("Invalid authorization header format".to_string()))?;

        return auth_value
            .strip_prefix("Bearer ")
            .map(|token| token.trim().to_string())
            .ok_or_else(|| AppError::Auth("Invalid authorization header format".to_string()));
    }

    ROLE_TOKEN_HEADERS
        .iter()
        .find_map(|name| headers.get(*name))
        .and_then(|value| value.to_str().ok())
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::Auth(NOT_AUTHORIZED.to_string()))
}

// Middleware for authentication
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_token(request.headers())?;

    let user = validate_token(&token, &state.config.jwt_secret)
        .map_err(|e| {
            debug!("Rejected token: {}", e);
            AppError::Auth(NOT_AUTHORIZED.to_string())
        })?;

    // Add user to request extensions
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

/// Reject callers whose verified token does not carry `role`.
pub fn require_role(user: &User, role: &str) -> Result<(), AppError> {
    if user.has_role(role) {
        Ok(())
    } else {
        debug!("User {} lacks role {}", user.id, role);
        Err(AppError::Auth(NOT_AUTHORIZED.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_header_is_preferred() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer abc.def.ghi"));
        headers.insert("dtoken", HeaderValue::from_static("other.raw.token"));

        assert_eq!(extract_token(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_role_token_header_is_accepted() {
        let mut headers = HeaderMap::new();
        headers.insert("dtoken", HeaderValue::from_static("abc.def.ghi"));

        assert_eq!(extract_token(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_missing_token() {
        assert_matches!(extract_token(&HeaderMap::new()), Err(AppError::Auth(msg)) if msg == NOT_AUTHORIZED);
    }

    #[test]
    fn test_authorization_without_bearer_prefix() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Token abc"));

        assert_matches!(extract_token(&headers), Err(AppError::Auth(_)));
    }

    #[test]
    fn test_require_role() {
        let user = User {
            id: "u1".to_string(),
            email: None,
            role: Some("doctor".to_string()),
            created_at: None,
        };
        assert!(require_role(&user, "doctor").is_ok());
        assert_matches!(require_role(&user, "admin"), Err(AppError::Auth(_)));
    }
}
