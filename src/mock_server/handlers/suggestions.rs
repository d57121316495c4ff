//! Translation memory endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tokio::sync::RwLock;

use super::{check_credentials, error_response};
use crate::mock_server::state::MockState;
use crate::Suggestion;

/// Query parameters for suggestions.
#[derive(Debug, Default, Deserialize)]
pub struct SuggestionsQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

/// POST /rest/suggestions?from={locale}&to={locale}
pub async fn post_suggestions(
    State(state): State<Arc<RwLock<MockState>>>,
    Query(query): Query<SuggestionsQuery>,
    headers: HeaderMap,
    Json(terms): Json<Vec<String>>,
) -> impl IntoResponse {
    let state = state.read().await;
    if let Err(response) = check_credentials(&state, &headers) {
        return response;
    }

    // Both locales are required by the real API
    if query.from.is_none() || query.to.is_none() {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Bad request",
            "'from' and 'to' query parameters are required",
        );
    }

    let suggestions: Vec<Suggestion> = state
        .find_suggestions(&terms)
        .into_iter()
        .cloned()
        .collect();

    (StatusCode::OK, Json(suggestions)).into_response()
}
