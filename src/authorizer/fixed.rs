//! Authorizer with a single, explicitly configured server.

use std::env;

use reqwest::RequestBuilder;
use tokio_util::sync::CancellationToken;
use url::Url;

use super::{apply_credentials, Authorizer};
use crate::cancel::check_cancelled;
use crate::error::{Result, ZanataError};

/// Serves the same URL and credentials for every domain.
///
/// # Example
///
/// ```no_run
/// use zanata::StaticAuthorizer;
///
/// # fn example() -> zanata::Result<()> {
/// let authorizer = StaticAuthorizer::new("https://translate.zanata.org/")?
///     .with_credentials("alice", "0123456789abcdef");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct StaticAuthorizer {
    url: Url,
    username: Option<String>,
    key: Option<String>,
}

impl std::fmt::Debug for StaticAuthorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticAuthorizer")
            .field("url", &self.url.as_str())
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl StaticAuthorizer {
    /// Create an unauthenticated authorizer for `url`.
    ///
    /// # Errors
    ///
    /// Returns an error if `url` is not a valid URL.
    pub fn new(url: &str) -> Result<Self> {
        Ok(Self {
            url: Url::parse(url)?,
            username: None,
            key: None,
        })
    }

    /// Attach a user name and API key.
    #[must_use]
    pub fn with_credentials(mut self, username: &str, key: &str) -> Self {
        self.username = Some(username.to_string());
        self.key = Some(key.to_string());
        self
    }

    /// Create from environment variables.
    ///
    /// Uses `ZANATA_URL` (required), `ZANATA_USERNAME` and `ZANATA_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns an error if `ZANATA_URL` is unset or invalid.
    pub fn from_env() -> Result<Self> {
        let url = env::var("ZANATA_URL").map_err(|_| {
            ZanataError::ConfigMissing("ZANATA_URL environment variable not set".to_string())
        })?;

        let mut authorizer = Self::new(&url)?;
        authorizer.username = env::var("ZANATA_USERNAME").ok();
        authorizer.key = env::var("ZANATA_API_KEY").ok();
        Ok(authorizer)
    }
}

impl Authorizer for StaticAuthorizer {
    fn url(&self, _domain: &str) -> Option<Url> {
        Some(self.url.clone())
    }

    fn process_request(&self, domain: &str, request: RequestBuilder) -> RequestBuilder {
        if self.username.is_none() || self.key.is_none() {
            tracing::warn!(domain, "incomplete credentials, sending request without them");
        }
        apply_credentials(request, self.username.as_deref(), self.key.as_deref())
    }

    fn refresh_authorization(&self, cancellable: Option<&CancellationToken>) -> Result<bool> {
        check_cancelled(cancellable)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authorizer::{AUTH_TOKEN_HEADER, AUTH_USER_HEADER};

    #[test]
    fn test_same_url_for_every_domain() {
        let authorizer = StaticAuthorizer::new("https://translate.example.org/zanata").unwrap();
        assert_eq!(authorizer.url("a"), authorizer.url("b"));
    }

    #[test]
    fn test_credentials_are_applied() {
        let authorizer = StaticAuthorizer::new("https://translate.example.org/")
            .unwrap()
            .with_credentials("alice", "key");
        let request = authorizer
            .process_request("any", reqwest::Client::new().get("https://translate.example.org/"))
            .build()
            .unwrap();

        assert_eq!(request.headers()[AUTH_USER_HEADER], "alice");
        assert_eq!(request.headers()[AUTH_TOKEN_HEADER], "key");
    }

    #[test]
    fn test_invalid_url() {
        assert!(matches!(
            StaticAuthorizer::new("::nope::"),
            Err(ZanataError::UrlError(_))
        ));
    }

    #[test]
    fn test_debug_hides_key() {
        let authorizer = StaticAuthorizer::new("https://translate.example.org/")
            .unwrap()
            .with_credentials("alice", "hidden-key");
        assert!(!format!("{authorizer:?}").contains("hidden-key"));
    }
}
