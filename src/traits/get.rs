//! Get trait for fetching single entities.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::Result;
use crate::session::Session;

/// Fetch a single entity by ID.
///
/// Implement this trait for entity types that can be fetched individually
/// by a unique identifier (typically a slug).
///
/// # Example
///
/// ```no_run
/// use zanata::{Get, Project, Session};
///
/// # async fn example() -> zanata::Result<()> {
/// let session = Session::from_env()?;
/// let project = Project::get(&session, "coala".to_string(), None).await?;
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait Get: Sized {
    /// The ID type for this entity (e.g., String slug).
    type Id;

    /// Fetch the entity by ID.
    ///
    /// # Arguments
    ///
    /// * `session` - The Zanata session
    /// * `id` - The entity identifier
    /// * `cancellable` - Optional token to abort the request
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found, the response is
    /// malformed, or the request fails or is cancelled.
    async fn get(
        session: &Session,
        id: Self::Id,
        cancellable: Option<&CancellationToken>,
    ) -> Result<Self>;
}
