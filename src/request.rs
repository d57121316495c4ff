//! Request and response building blocks for [`Session::invoke`](crate::Session::invoke).

use bytes::Bytes;
use reqwest::{Method, Response, StatusCode};
use url::Url;

use crate::error::{Result, ZanataError};

/// Content type used for every JSON exchange.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// A name/value pair sent in the query string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Parameter value.
    pub value: String,
}

impl Parameter {
    /// Create a parameter.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Percent-encoded `name=value`.
    pub fn encode(&self) -> String {
        format!(
            "{}={}",
            urlencoding::encode(&self.name),
            urlencoding::encode(&self.value)
        )
    }
}

/// Join parameters into a query string, preserving their order.
pub fn encode_query(parameters: &[Parameter]) -> String {
    parameters
        .iter()
        .map(Parameter::encode)
        .collect::<Vec<_>>()
        .join("&")
}

/// A single REST call.
///
/// # Example
///
/// ```
/// use zanata::{Invocation, Parameter};
/// use reqwest::Method;
///
/// let endpoint = url::Url::parse("https://translate.example.org/rest/suggestions").unwrap();
/// let call = Invocation::new(Method::POST, endpoint)
///     .parameters(vec![Parameter::new("from", "en"), Parameter::new("to", "fr")])
///     .body("application/json", b"[\"hello\"]".to_vec())
///     .accept("application/json");
/// assert_eq!(call.url().query(), Some("from=en&to=fr"));
/// ```
#[derive(Debug, Clone)]
pub struct Invocation {
    pub(crate) method: Method,
    pub(crate) endpoint: Url,
    pub(crate) parameters: Option<Vec<Parameter>>,
    pub(crate) body: Option<(String, Vec<u8>)>,
    pub(crate) accept: Option<String>,
}

impl Invocation {
    /// Start building a call of `method` against `endpoint`.
    pub fn new(method: Method, endpoint: Url) -> Self {
        Self {
            method,
            endpoint,
            parameters: None,
            body: None,
            accept: None,
        }
    }

    /// Query parameters, sent in the given order.
    #[must_use]
    pub fn parameters(mut self, parameters: Vec<Parameter>) -> Self {
        self.parameters = Some(parameters);
        self
    }

    /// Request body and its content type.
    #[must_use]
    pub fn body(mut self, content_type: &str, body: Vec<u8>) -> Self {
        self.body = Some((content_type.to_string(), body));
        self
    }

    /// Expected response content type, sent as `Accept`.
    #[must_use]
    pub fn accept(mut self, content_type: &str) -> Self {
        self.accept = Some(content_type.to_string());
        self
    }

    /// HTTP method of the call.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The final URL, with the query string appended if parameters are set.
    ///
    /// An empty parameter list leaves the endpoint untouched.
    pub fn url(&self) -> Url {
        let mut url = self.endpoint.clone();
        if let Some(parameters) = self.parameters.as_deref().filter(|p| !p.is_empty()) {
            url.set_query(Some(&encode_query(parameters)));
        }
        url
    }
}

/// The body of a successful response, read incrementally or all at once.
#[derive(Debug)]
pub struct ResponseBody {
    response: Response,
}

impl ResponseBody {
    pub(crate) fn new(response: Response) -> Self {
        Self { response }
    }

    /// HTTP status of the response.
    pub fn status(&self) -> StatusCode {
        self.response.status()
    }

    /// The `Content-Type` header, if any.
    pub fn content_type(&self) -> Option<&str> {
        self.response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
    }

    /// Read the next chunk of the body, or `None` at the end.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection fails mid-body.
    pub async fn chunk(&mut self) -> Result<Option<Bytes>> {
        self.response.chunk().await.map_err(ZanataError::HttpError)
    }

    /// Read the remaining body.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection fails mid-body.
    pub async fn bytes(self) -> Result<Bytes> {
        self.response.bytes().await.map_err(ZanataError::HttpError)
    }

    /// Read the remaining body as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection fails mid-body.
    pub async fn text(self) -> Result<String> {
        self.response.text().await.map_err(ZanataError::HttpError)
    }

    /// Read the remaining body and parse it as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be read or is not valid JSON.
    pub async fn json(self) -> Result<serde_json::Value> {
        let bytes = self.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint() -> Url {
        Url::parse("https://translate.example.org/rest/suggestions").unwrap()
    }

    #[test]
    fn test_query_preserves_order() {
        let call = Invocation::new(Method::GET, endpoint()).parameters(vec![
            Parameter::new("to", "fr"),
            Parameter::new("from", "en"),
        ]);
        assert_eq!(call.url().query(), Some("to=fr&from=en"));
    }

    #[test]
    fn test_query_is_percent_encoded() {
        let call = Invocation::new(Method::GET, endpoint())
            .parameters(vec![Parameter::new("q", "a b&c=d"), Parameter::new("ext", "gettext")]);
        assert_eq!(call.url().query(), Some("q=a%20b%26c%3Dd&ext=gettext"));
    }

    #[test]
    fn test_no_parameters_keeps_endpoint() {
        let call = Invocation::new(Method::GET, endpoint());
        assert_eq!(call.url(), endpoint());

        let call = Invocation::new(Method::GET, endpoint()).parameters(vec![]);
        assert_eq!(call.url().query(), None);
    }
}
