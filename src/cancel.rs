//! Cancellation support for async operations.

use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::error::{Result, ZanataError};

/// Drive `fut` to completion unless `cancellable` fires first.
///
/// A token that is already cancelled wins over a future that is ready.
pub(crate) async fn run_cancellable<F, T>(
    cancellable: Option<&CancellationToken>,
    fut: F,
) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match cancellable {
        Some(token) => {
            tokio::select! {
                biased;
                _ = token.cancelled() => Err(ZanataError::Cancelled),
                result = fut => result,
            }
        }
        None => fut.await,
    }
}

/// Fail early if the token has already been cancelled.
pub(crate) fn check_cancelled(cancellable: Option<&CancellationToken>) -> Result<()> {
    match cancellable {
        Some(token) if token.is_cancelled() => Err(ZanataError::Cancelled),
        _ => Ok(()),
    }
}
