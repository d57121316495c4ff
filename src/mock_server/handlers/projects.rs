//! Project endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use tokio::sync::RwLock;

use super::{check_credentials, error_response};
use crate::mock_server::state::{MockProject, MockState};
use crate::ProjectStatus;

/// Entry of the project list; the list endpoint omits iterations.
#[derive(Debug, Serialize)]
pub struct ProjectSummary {
    pub id: String,
    pub name: String,
    pub status: ProjectStatus,
    #[serde(rename = "defaultType")]
    pub default_type: &'static str,
}

impl From<&MockProject> for ProjectSummary {
    fn from(project: &MockProject) -> Self {
        Self {
            id: project.id.clone(),
            name: project.name.clone(),
            status: project.status,
            default_type: "Gettext",
        }
    }
}

/// GET /rest/projects
pub async fn list_projects(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let state = state.read().await;
    if let Err(response) = check_credentials(&state, &headers) {
        return response;
    }

    let projects: Vec<ProjectSummary> = state
        .list_projects()
        .into_iter()
        .map(ProjectSummary::from)
        .collect();

    (StatusCode::OK, Json(projects)).into_response()
}

/// GET /rest/projects/p/{id}
pub async fn get_project(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let mut state = state.write().await;
    if let Err(response) = check_credentials(&state, &headers) {
        return response;
    }

    state.record_project_fetch(&id);

    match state.get_project(&id) {
        Some(project) => (StatusCode::OK, Json(project.clone())).into_response(),
        None => error_response(
            StatusCode::NOT_FOUND,
            "Project not found",
            &format!("No project found with id: {id}"),
        ),
    }
}
