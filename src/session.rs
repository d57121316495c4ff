//! Zanata API session.
//!
//! A session binds an [`Authorizer`] to one credential domain. It resolves
//! REST endpoints, performs authenticated calls and hands out decoded domain
//! objects. Entity-specific decoding lives with the model types.

use std::env;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, Response};
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::authorizer::{refresh_authorization_async, Authorizer, KeyFileAuthorizer};
use crate::cancel::run_cancellable;
use crate::error::{Result, ZanataError};
use crate::models::{Project, Suggestion, SuggestionQuery};
use crate::request::{Invocation, ResponseBody};
use crate::traits::{Get, List};

/// Credential domain of the public Zanata instance.
pub const DEFAULT_DOMAIN: &str = "translate_zanata_org";

const USER_AGENT: &str = concat!("zanata/", env!("CARGO_PKG_VERSION"));

/// An authorized connection to one Zanata server.
///
/// This struct is cheaply cloneable; clones share the authorizer and the
/// underlying connection pool.
///
/// # Example
///
/// ```no_run
/// use zanata::Session;
///
/// # async fn example() -> zanata::Result<()> {
/// let session = Session::from_key_file("zanata.ini", "translate_zanata_org")?;
///
/// for project in session.get_projects(None).await? {
///     println!("{} ({})", project.name, project.status);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Session {
    http: Client,
    authorizer: Arc<dyn Authorizer>,
    domain: Arc<str>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("domain", &self.domain)
            .field("authorizer", &self.authorizer)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Create a session for `domain` using `authorizer`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(authorizer: Arc<dyn Authorizer>, domain: &str) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(ZanataError::HttpError)?;

        Ok(Self {
            http,
            authorizer,
            domain: Arc::from(domain),
        })
    }

    /// Create a session whose credentials come from the key file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key file cannot be loaded.
    pub fn from_key_file(path: impl AsRef<Path>, domain: &str) -> Result<Self> {
        let authorizer = KeyFileAuthorizer::from_path(path)?;
        Self::new(Arc::new(authorizer), domain)
    }

    /// Create a session from environment variables.
    ///
    /// Uses `ZANATA_DOMAIN` (defaults to `translate_zanata_org`) and
    /// `ZANATA_KEY_FILE` (defaults to `zanata.ini` in the user config
    /// directory).
    ///
    /// # Errors
    ///
    /// Returns an error if the key file cannot be loaded.
    pub fn from_env() -> Result<Self> {
        let domain = env::var("ZANATA_DOMAIN").unwrap_or_else(|_| DEFAULT_DOMAIN.to_string());

        let authorizer = match env::var("ZANATA_KEY_FILE") {
            Ok(path) => KeyFileAuthorizer::from_path(path)?,
            Err(_) => KeyFileAuthorizer::from_default_location()?,
        };

        Self::new(Arc::new(authorizer), &domain)
    }

    /// The authorizer used by this session.
    pub fn authorizer(&self) -> &Arc<dyn Authorizer> {
        &self.authorizer
    }

    /// The credential domain of this session.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Compute the full URL for a REST `mountpoint` such as `/rest/projects`.
    ///
    /// The mountpoint is appended to the path of the configured server URL,
    /// dropping one trailing slash from that path first. Any query or
    /// fragment on the configured URL is discarded.
    ///
    /// # Errors
    ///
    /// Returns [`ZanataError::ConfigMissing`] if the authorizer has no URL for
    /// this session's domain.
    pub fn endpoint(&self, mountpoint: &str) -> Result<Url> {
        let mut url = self.authorizer.url(&self.domain).ok_or_else(|| {
            ZanataError::ConfigMissing(format!(
                "no server URL configured for domain '{}'",
                self.domain
            ))
        })?;

        let base_path = url.path();
        let path = if base_path.is_empty() {
            mountpoint.to_string()
        } else {
            let trimmed = base_path.strip_suffix('/').unwrap_or(base_path);
            format!("{trimmed}{mountpoint}")
        };
        url.set_path(&path);
        url.set_query(None);
        url.set_fragment(None);

        Ok(url)
    }

    /// Perform an authorized REST call and return the response body.
    ///
    /// Parameters are percent-encoded into the query string in order. The
    /// authorizer adds its headers before the request is sent.
    ///
    /// # Errors
    ///
    /// Returns [`ZanataError::HttpError`] for transport failures,
    /// [`ZanataError::ApiError`] for non-success statuses and
    /// [`ZanataError::Cancelled`] if `cancellable` fires first.
    #[tracing::instrument(
        skip(self, invocation, cancellable),
        fields(method = %invocation.method, endpoint = %invocation.endpoint)
    )]
    pub async fn invoke(
        &self,
        invocation: Invocation,
        cancellable: Option<&CancellationToken>,
    ) -> Result<ResponseBody> {
        let url = invocation.url();
        tracing::debug!(%url, "sending request");

        let mut request = self.http.request(invocation.method, url);
        if let Some((content_type, body)) = invocation.body {
            request = request.header(CONTENT_TYPE, content_type).body(body);
        }
        if let Some(accept) = invocation.accept {
            request = request.header(ACCEPT, accept);
        }
        let request = self.authorizer.process_request(&self.domain, request);

        run_cancellable(cancellable, async move {
            let response = request.send().await.map_err(ZanataError::HttpError)?;
            tracing::debug!(status = %response.status(), "received response");
            let response = Self::check_response(response).await?;
            Ok(ResponseBody::new(response))
        })
        .await
    }

    /// Perform a call and parse the whole response as JSON.
    pub(crate) async fn invoke_json(
        &self,
        invocation: Invocation,
        cancellable: Option<&CancellationToken>,
    ) -> Result<serde_json::Value> {
        let body = self.invoke(invocation, cancellable).await?;
        run_cancellable(cancellable, body.json()).await
    }

    /// Fetch translation memory suggestions for `query` terms.
    ///
    /// # Errors
    ///
    /// Returns [`ZanataError::InvalidResponse`] if the response is not a JSON
    /// array, or any error from [`Session::invoke`].
    pub async fn get_suggestions<S: AsRef<str>>(
        &self,
        query: &[S],
        from_locale: &str,
        to_locale: &str,
        cancellable: Option<&CancellationToken>,
    ) -> Result<Vec<Suggestion>> {
        let query = SuggestionQuery {
            terms: query.iter().map(|t| t.as_ref().to_string()).collect(),
            from_locale: from_locale.to_string(),
            to_locale: to_locale.to_string(),
        };
        Suggestion::list(self, &query, cancellable).await
    }

    /// List all projects visible to this session.
    ///
    /// The returned projects have not loaded their iterations yet.
    ///
    /// # Errors
    ///
    /// Returns [`ZanataError::InvalidResponse`] if the response is not a JSON
    /// array, or any error from [`Session::invoke`].
    pub async fn get_projects(&self, cancellable: Option<&CancellationToken>) -> Result<Vec<Project>> {
        Project::list(self, &(), cancellable).await
    }

    /// Fetch one project together with its iterations.
    ///
    /// # Errors
    ///
    /// Returns [`ZanataError::InvalidResponse`] naming the first missing
    /// required field, or any error from [`Session::invoke`].
    pub async fn get_project(
        &self,
        project_id: &str,
        cancellable: Option<&CancellationToken>,
    ) -> Result<Project> {
        Project::get(self, project_id.to_string(), cancellable).await
    }

    /// Ask the authorizer to refresh its tokens without blocking the caller.
    ///
    /// # Errors
    ///
    /// See [`refresh_authorization_async`].
    pub async fn refresh_authorization(&self, cancellable: Option<&CancellationToken>) -> Result<bool> {
        refresh_authorization_async(self.authorizer.clone(), cancellable).await
    }

    /// Check response status and convert errors.
    async fn check_response(response: Response) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let message = Self::extract_error_message(response, status).await;
        Err(ZanataError::ApiError {
            message,
            status_code: Some(status.as_u16()),
        })
    }

    /// Extract error message from a failed response.
    async fn extract_error_message(response: Response, status: reqwest::StatusCode) -> String {
        let body = match response.text().await {
            Ok(b) => b,
            Err(_) => return format!("HTTP {status}"),
        };

        // Try to parse as JSON and extract message field
        if let Ok(json) = serde_json::from_str::<serde_json::Value>(&body) {
            if let Some(msg) = json.get("message").and_then(|m| m.as_str()) {
                return msg.to_string();
            }
            if let Some(err) = json.get("error").and_then(|m| m.as_str()) {
                return err.to_string();
            }
        }

        if body.trim().is_empty() {
            format!("HTTP {status}")
        } else {
            body
        }
    }
}

/// Shorthand for a GET call that expects JSON back.
pub(crate) fn json_get(endpoint: Url) -> Invocation {
    Invocation::new(Method::GET, endpoint).accept(crate::request::JSON_CONTENT_TYPE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StaticAuthorizer;

    fn session(base: &str) -> Session {
        let authorizer = StaticAuthorizer::new(base).unwrap();
        Session::new(Arc::new(authorizer), "test").unwrap()
    }

    #[test]
    fn test_session_debug() {
        let authorizer = StaticAuthorizer::new("https://translate.example.org/")
            .unwrap()
            .with_credentials("alice", "test-token");
        let session = Session::new(Arc::new(authorizer), "example").unwrap();
        let debug = format!("{:?}", session);
        assert!(debug.contains("Session"));
        assert!(debug.contains("example"));
        // Token should not be in debug output
        assert!(!debug.contains("test-token"));
    }

    #[test]
    fn test_endpoint_with_root_path() {
        let url = session("https://translate.example.org").endpoint("/rest/projects").unwrap();
        assert_eq!(url.path(), "/rest/projects");
        assert_eq!(url.as_str(), "https://translate.example.org/rest/projects");
    }

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let url = session("https://translate.example.org/zanata/")
            .endpoint("/rest/projects")
            .unwrap();
        assert_eq!(url.path(), "/zanata/rest/projects");
        assert!(!url.as_str().contains("//rest"));
    }

    #[test]
    fn test_endpoint_without_trailing_slash() {
        let url = session("https://translate.example.org/zanata")
            .endpoint("/rest/suggestions")
            .unwrap();
        assert_eq!(url.path(), "/zanata/rest/suggestions");
    }

    #[test]
    fn test_endpoint_drops_base_query_and_fragment() {
        let url = session("https://translate.example.org/zanata/?x=1#top")
            .endpoint("/rest/projects")
            .unwrap();
        assert_eq!(url.as_str(), "https://translate.example.org/zanata/rest/projects");

        let call = json_get(url).parameters(vec![crate::Parameter::new("ext", "gettext")]);
        assert_eq!(call.url().query(), Some("ext=gettext"));
    }

    #[test]
    fn test_endpoint_keeps_escaped_segments() {
        let url = session("https://translate.example.org/")
            .endpoint("/rest/projects/p/my%20project")
            .unwrap();
        assert_eq!(url.path(), "/rest/projects/p/my%20project");
    }

    #[test]
    fn test_endpoint_without_configured_url() {
        let authorizer = crate::KeyFileAuthorizer::parse("[servers]\n").unwrap();
        let session = Session::new(Arc::new(authorizer), "missing").unwrap();
        let err = session.endpoint("/rest/projects").unwrap_err();
        assert!(matches!(err, ZanataError::ConfigMissing(_)));
        assert!(err.to_string().contains("missing"));
    }
}
