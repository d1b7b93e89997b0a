//! Request authentication
//!
//! Authentication is a pluggable capability in front of the run endpoint.
//! Credentials are never embedded in code; the bearer token comes from
//! configuration.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use thiserror::Error;

use crate::api::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Missing credentials.")]
    Missing,
    #[error("Invalid credentials.")]
    Invalid,
}

/// Decides whether a request may proceed
pub trait Authenticator: Send + Sync {
    fn authenticate(&self, headers: &HeaderMap) -> Result<(), AuthError>;

    /// Short name for logs
    fn name(&self) -> &'static str;
}

/// Lets every request through
pub struct AllowAll;

impl Authenticator for AllowAll {
    fn authenticate(&self, _headers: &HeaderMap) -> Result<(), AuthError> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "allow-all"
    }
}

/// Requires `Authorization: Bearer <token>`
pub struct BearerToken {
    token: String,
}

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl Authenticator for BearerToken {
    fn authenticate(&self, headers: &HeaderMap) -> Result<(), AuthError> {
        let value = headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::Missing)?
            .to_str()
            .map_err(|_| AuthError::Invalid)?;

        let presented = value
            .strip_prefix("Bearer ")
            .ok_or(AuthError::Invalid)?
            .trim();

        if constant_time_eq(presented.as_bytes(), self.token.as_bytes()) {
            Ok(())
        } else {
            Err(AuthError::Invalid)
        }
    }

    fn name(&self) -> &'static str {
        "bearer-token"
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Middleware rejecting requests the configured authenticator refuses
pub async fn require_auth(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if let Err(err) = state.authenticator.authenticate(request.headers()) {
        tracing::debug!(
            "Rejected {} {} ({}): {}",
            request.method(),
            request.uri().path(),
            state.authenticator.name(),
            err
        );
        return Err(ApiError::Unauthorized(err.to_string()));
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: Option<&'static str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(value) = value {
            headers.insert(AUTHORIZATION, HeaderValue::from_static(value));
        }
        headers
    }

    #[test]
    fn test_allow_all() {
        assert!(AllowAll.authenticate(&headers(None)).is_ok());
    }

    #[test]
    fn test_bearer_token() {
        let auth = BearerToken::new("s3cret");
        assert_eq!(auth.authenticate(&headers(None)), Err(AuthError::Missing));
        assert_eq!(
            auth.authenticate(&headers(Some("Bearer wrong"))),
            Err(AuthError::Invalid)
        );
        assert_eq!(
            auth.authenticate(&headers(Some("Basic s3cret"))),
            Err(AuthError::Invalid)
        );
        assert!(auth.authenticate(&headers(Some("Bearer s3cret"))).is_ok());
    }
}
