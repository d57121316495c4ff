//! List trait for fetching collections of entities.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::Result;
use crate::session::Session;

/// Fetch every entity matching a query.
///
/// The Zanata endpoints covered here are not paginated, so one call
/// returns the whole collection in server order.
///
/// # Example
///
/// ```no_run
/// use zanata::{List, Session, Suggestion, SuggestionQuery};
///
/// # async fn example(session: &Session) -> zanata::Result<()> {
/// let query = SuggestionQuery {
///     terms: vec!["Open file".to_string()],
///     from_locale: "en-US".to_string(),
///     to_locale: "ja".to_string(),
/// };
/// let suggestions = Suggestion::list(session, &query, None).await?;
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait List: Sized + Send {
    /// Query parameters for filtering.
    type Query: Default + Send + Sync;

    /// List entities matching the query.
    ///
    /// # Arguments
    ///
    /// * `session` - The Zanata session
    /// * `query` - Query parameters
    /// * `cancellable` - Optional token to abort the request
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, is cancelled, or the response
    /// root has the wrong shape.
    async fn list(
        session: &Session,
        query: &Self::Query,
        cancellable: Option<&CancellationToken>,
    ) -> Result<Vec<Self>>;
}
