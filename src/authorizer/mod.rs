//! Request authorization.
//!
//! An [`Authorizer`] knows where a credential domain lives and how to
//! authenticate requests sent to it. [`Session`](crate::Session) only talks to
//! this trait, so alternative credential sources can be plugged in without
//! touching the session.

mod key_file;
mod fixed;

use std::sync::Arc;

use reqwest::RequestBuilder;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::cancel::run_cancellable;
use crate::error::{Result, ZanataError};

pub use fixed::StaticAuthorizer;
pub use key_file::KeyFileAuthorizer;

/// Header carrying the account name.
pub const AUTH_USER_HEADER: &str = "X-Auth-User";

/// Header carrying the API key.
pub const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";

/// Supplies server URLs and credentials for credential domains.
///
/// All methods may be called from several threads at once.
pub trait Authorizer: Send + Sync + std::fmt::Debug {
    /// Base URL of the server configured for `domain`.
    ///
    /// Returns `None` (and logs a warning) if nothing usable is configured.
    fn url(&self, domain: &str) -> Option<Url>;

    /// Attach authentication headers for `domain` to an outgoing request.
    ///
    /// Missing credentials are not an error: the request is sent without them.
    fn process_request(&self, domain: &str, request: RequestBuilder) -> RequestBuilder;

    /// Force a refresh of any tokens held by the authorizer.
    ///
    /// This may block. Use [`refresh_authorization_async`] from async code.
    ///
    /// # Errors
    ///
    /// Returns [`ZanataError::Cancelled`] if `cancellable` fires, or whatever
    /// the credential source reports.
    fn refresh_authorization(&self, cancellable: Option<&CancellationToken>) -> Result<bool>;
}

/// Run [`Authorizer::refresh_authorization`] on the blocking thread pool.
///
/// # Errors
///
/// Propagates the refresh error, [`ZanataError::Cancelled`] if `cancellable`
/// fires first, or [`ZanataError::WorkerError`] if the worker panicked.
#[tracing::instrument(skip_all)]
pub async fn refresh_authorization_async(
    authorizer: Arc<dyn Authorizer>,
    cancellable: Option<&CancellationToken>,
) -> Result<bool> {
    let worker_token = cancellable.cloned();
    let worker = tokio::task::spawn_blocking(move || {
        authorizer.refresh_authorization(worker_token.as_ref())
    });

    run_cancellable(cancellable, async move {
        worker
            .await
            .map_err(|e| ZanataError::WorkerError(e.to_string()))?
    })
    .await
}

/// Add the user and token headers that are present.
fn apply_credentials(
    request: RequestBuilder,
    username: Option<&str>,
    key: Option<&str>,
) -> RequestBuilder {
    let request = match username {
        Some(user) => request.header(AUTH_USER_HEADER, user),
        None => request,
    };
    match key {
        Some(key) => request.header(AUTH_TOKEN_HEADER, key),
        None => request,
    }
}
