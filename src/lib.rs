//! Zanata API client library.
//!
//! A Rust library for the REST API of the Zanata translation platform:
//! listing projects and their iterations, querying the translation memory,
//! and downloading translated documents.
//!
//! # Quick Start
//!
//! ```no_run
//! use zanata::Session;
//!
//! #[tokio::main]
//! async fn main() -> zanata::Result<()> {
//!     // Credentials from ~/.config/zanata.ini, domain from ZANATA_DOMAIN
//!     let session = Session::from_env()?;
//!
//!     // List all projects
//!     let projects = session.get_projects(None).await?;
//!     println!("Found {} projects", projects.len());
//!
//!     // Iterations are fetched on first use and kept afterwards
//!     if let Some(project) = projects.first() {
//!         for iteration in project.get_iterations(None).await? {
//!             println!("{} {}", iteration.id, iteration.status);
//!         }
//!     }
//!
//!     // Ask the translation memory
//!     let suggestions = session
//!         .get_suggestions(&["Open file"], "en-US", "ja", None)
//!         .await?;
//!     println!("Found {} suggestions", suggestions.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`Authorizer`] supplies the server URL and credentials of a credential
//!   domain. [`KeyFileAuthorizer`] reads them from an INI key file,
//!   [`StaticAuthorizer`] takes them directly.
//! - [`Session`] resolves endpoints, sends authorized requests via
//!   [`Session::invoke`] and decodes responses.
//! - Entity types implement the [`Get`] and [`List`] traits for the
//!   endpoints they support.
//!
//! Every network operation accepts an optional
//! [`CancellationToken`](tokio_util::sync::CancellationToken); cancelling it
//! makes the operation fail with [`ZanataError::Cancelled`].
//!
//! # Configuration
//!
//! The key file keeps one `[servers]` group:
//!
//! ```ini
//! [servers]
//! translate_zanata_org.url=https://translate.zanata.org/
//! translate_zanata_org.username=alice
//! translate_zanata_org.key=0123456789abcdef
//! ```

mod authorizer;
mod cancel;
pub mod cli;
mod error;
mod models;
mod output;
mod request;
mod session;
mod traits;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use authorizer::{
    refresh_authorization_async, Authorizer, KeyFileAuthorizer, StaticAuthorizer,
    AUTH_TOKEN_HEADER, AUTH_USER_HEADER,
};
pub use error::{Result, ZanataError};
pub use request::{encode_query, Invocation, Parameter, ResponseBody, JSON_CONTENT_TYPE};
pub use session::{Session, DEFAULT_DOMAIN};

// Re-export traits
pub use traits::{Get, List};

// Re-export models
pub use models::{
    Iteration, IterationStatus, Project, ProjectStatus, Suggestion, SuggestionQuery,
};

// Re-export output formatting
pub use output::PrettyPrint;

pub use tokio_util::sync::CancellationToken;
