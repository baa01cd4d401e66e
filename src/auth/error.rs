//! Session error definitions.

use std::fmt;

use crate::error::{ApiError, StoreError};

/// Errors surfaced by login, registration and access checks.
#[derive(Debug)]
pub enum AuthError {
    Api(ApiError),
    Store(StoreError),
    /// Login answered 2xx without a token.
    MissingToken,
    Forbidden(String),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(err) => match backend_message(err) {
                Some(msg) => write!(f, "{msg}"),
                None => write!(f, "{err}"),
            },
            Self::Store(err) => write!(f, "session storage: {err}"),
            Self::MissingToken => write!(f, "login succeeded but no token was returned"),
            Self::Forbidden(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for AuthError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(err) => Some(err),
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ApiError> for AuthError {
    fn from(value: ApiError) -> Self {
        Self::Api(value)
    }
}

impl From<StoreError> for AuthError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Human-readable reason from an error body (`message`, `error`, `detail`).
fn backend_message(err: &ApiError) -> Option<String> {
    let ApiError::Status { body, .. } = err else {
        return None;
    };
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "error", "detail"]
        .iter()
        .find_map(|key| value.get(key)?.as_str().map(str::to_string))
}
