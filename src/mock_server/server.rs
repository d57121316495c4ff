//! Mock Zanata API server.
//!
//! Provides an axum-based HTTP server that simulates the Zanata REST API.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::fixtures::{DefaultScenario, Fixtures};
use super::handlers;
use super::state::MockState;
use crate::{Session, StaticAuthorizer};

/// Domain name used by sessions created through [`MockServer::session`].
pub const MOCK_DOMAIN: &str = "mock";

/// A mock Zanata API server for testing.
///
/// The server runs in the background and keeps its data between requests,
/// so whole workflows can run against it.
pub struct MockServer {
    url: String,
    handle: JoinHandle<()>,
    state: Arc<RwLock<MockState>>,
}

impl MockServer {
    /// Start a new mock server with default fixtures.
    ///
    /// The server listens on a random available port and returns immediately.
    pub async fn start() -> Self {
        Self::with_state(Self::default_state()).await
    }

    /// Start a mock server with empty state.
    pub async fn start_empty() -> Self {
        Self::with_state(MockState::new()).await
    }

    /// Start a mock server with custom state.
    pub async fn with_state(state: MockState) -> Self {
        let shared_state = state.shared();
        let app = Self::create_router(shared_state.clone());

        // Bind to a random available port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("Failed to get local address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server error");
        });

        Self {
            url: format!("http://{addr}/"),
            handle,
            state: shared_state,
        }
    }

    /// Base URL of the server, with a trailing slash.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Shared state, for inspecting or changing mock data during a test.
    pub fn state(&self) -> Arc<RwLock<MockState>> {
        self.state.clone()
    }

    /// An anonymous session pointed at this server.
    pub fn session(&self) -> Session {
        let authorizer = StaticAuthorizer::new(&self.url).expect("mock server URL is valid");
        Session::new(Arc::new(authorizer), MOCK_DOMAIN).expect("Failed to build session")
    }

    /// A session that sends the given user name and API key.
    pub fn session_with_credentials(&self, username: &str, key: &str) -> Session {
        let authorizer = StaticAuthorizer::new(&self.url)
            .expect("mock server URL is valid")
            .with_credentials(username, key);
        Session::new(Arc::new(authorizer), MOCK_DOMAIN).expect("Failed to build session")
    }

    /// Shutdown the server. Safe to call multiple times.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }

    fn default_state() -> MockState {
        Self::state_from_scenario(Fixtures::default_scenario())
    }

    fn state_from_scenario(scenario: DefaultScenario) -> MockState {
        let mut state = MockState::new();

        for project in scenario.projects {
            state.projects.insert(project.id.clone(), project);
        }

        state.suggestions = scenario.suggestions;

        for (key, contents) in scenario.documents {
            state.documents.insert(key, contents);
        }

        state
    }

    /// Create the axum router with all routes.
    pub(crate) fn create_router(state: Arc<RwLock<MockState>>) -> Router {
        Router::new()
            // Project routes
            .route("/rest/projects", get(handlers::list_projects))
            .route("/rest/projects/p/:id", get(handlers::get_project))
            // Translation memory
            .route("/rest/suggestions", post(handlers::post_suggestions))
            // Documents
            .route(
                "/rest/projects/p/:project/iterations/i/:iteration/r/:document/translations/:locale",
                get(handlers::get_translations),
            )
            // Health check
            .route("/health", get(health_check))
            .with_state(state)
    }
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "ok"
}
