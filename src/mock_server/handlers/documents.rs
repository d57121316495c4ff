//! Translated document endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
};
use serde::Deserialize;
use tokio::sync::RwLock;

use super::{check_credentials, error_response};
use crate::mock_server::state::{DocumentKey, MockState};

/// Query parameters for document downloads.
#[derive(Debug, Default, Deserialize)]
pub struct DocumentQuery {
    pub ext: Option<String>,
}

/// Path segments of a document download.
#[derive(Debug, Deserialize)]
pub struct DocumentPath {
    pub project: String,
    pub iteration: String,
    pub document: String,
    pub locale: String,
}

/// GET /rest/projects/p/{project}/iterations/i/{iteration}/r/{document}/translations/{locale}
pub async fn get_translations(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(path): Path<DocumentPath>,
    Query(query): Query<DocumentQuery>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let state = state.read().await;
    if let Err(response) = check_credentials(&state, &headers) {
        return response;
    }

    if query.ext.as_deref() != Some("gettext") {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Bad request",
            "only the gettext extension is supported",
        );
    }

    let key = DocumentKey::new(&path.project, &path.iteration, &path.document, &path.locale);
    match state.get_document(&key) {
        Some(contents) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            contents.clone(),
        )
            .into_response(),
        None => error_response(
            StatusCode::NOT_FOUND,
            "Document not found",
            &format!(
                "No translations of '{}' in {}/{} for {}",
                path.document, path.project, path.iteration, path.locale
            ),
        ),
    }
}
