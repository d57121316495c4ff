//! HTTP request handlers for the mock server.

pub mod documents;
pub mod projects;
pub mod suggestions;

pub use documents::*;
pub use projects::*;
pub use suggestions::*;

use axum::{
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::mock_server::state::MockState;
use crate::{AUTH_TOKEN_HEADER, AUTH_USER_HEADER};

/// Reject the request unless it carries the required credentials.
pub(crate) fn check_credentials(state: &MockState, headers: &HeaderMap) -> Result<(), Response> {
    let Some((username, key)) = &state.required_credentials else {
        return Ok(());
    };

    let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());
    if header(AUTH_USER_HEADER) == Some(username.as_str())
        && header(AUTH_TOKEN_HEADER) == Some(key.as_str())
    {
        return Ok(());
    }

    Err(error_response(
        StatusCode::UNAUTHORIZED,
        "Unauthorized",
        "Invalid or missing API credentials",
    ))
}

/// JSON error body in the shape the client extracts messages from.
pub(crate) fn error_response(status: StatusCode, error: &str, message: &str) -> Response {
    (
        status,
        Json(serde_json::json!({
            "error": error,
            "message": message,
        })),
    )
        .into_response()
}
