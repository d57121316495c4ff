//! Mock Zanata API server for E2E testing.
//!
//! This module provides an in-memory server that simulates the Zanata REST
//! API for integration and end-to-end testing. Unlike wiremock, which mocks
//! single requests per test, this server keeps state across requests so whole
//! workflows can be exercised.
//!
//! # Example
//!
//! ```no_run
//! use zanata::mock_server::MockServer;
//!
//! # async fn example() -> zanata::Result<()> {
//! let server = MockServer::start().await;
//! let session = server.session();
//!
//! // Server comes with default fixtures
//! let project = session.get_project("coala", None).await?;
//! assert_eq!(project.get_iterations(None).await?.len(), 2);
//!
//! server.shutdown().await;
//! # Ok(())
//! # }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::{DefaultScenario, Fixtures};
pub use server::{MockServer, MOCK_DOMAIN};
pub use state::{DocumentKey, MockIteration, MockProject, MockState};
