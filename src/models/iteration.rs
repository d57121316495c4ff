//! Iteration model.

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use super::json::string_member;
use super::status::IterationStatus;
use crate::error::Result;
use crate::request::{Invocation, Parameter, ResponseBody, JSON_CONTENT_TYPE};
use crate::session::Session;

/// A release line of a project, such as `master` or `1.0`.
///
/// Iterations refer to their project by id only; the owning [`Project`]
/// holds the iterations.
///
/// [`Project`]: crate::Project
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Iteration {
    /// The iteration slug.
    pub id: String,

    /// Iteration status.
    pub status: IterationStatus,

    /// Slug of the project this iteration belongs to.
    pub project_id: String,

    #[serde(skip)]
    session: Session,
}

impl Iteration {
    /// Decode one element of a project's `iterations` array.
    ///
    /// Elements without a string `id` and `status` are skipped.
    pub(crate) fn from_json(session: &Session, project_id: &str, value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let id = string_member(object, "id")?;
        let status = string_member(object, "status")?;

        Some(Self {
            id: id.to_string(),
            status: IterationStatus::from_nick(status),
            project_id: project_id.to_string(),
            session: session.clone(),
        })
    }

    /// REST path of a translated document in this iteration.
    fn documentation_path(&self, domain: &str, locale: &str) -> String {
        format!(
            "/rest/projects/p/{}/iterations/i/{}/r/{}/translations/{}",
            urlencoding::encode(&self.project_id),
            urlencoding::encode(&self.id),
            urlencoding::encode(domain),
            urlencoding::encode(locale),
        )
    }

    /// Download the translations of document `domain` into `locale`.
    ///
    /// The document is requested in gettext form and returned unparsed.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # async fn example(session: &zanata::Session) -> zanata::Result<()> {
    /// let project = session.get_project("coala", None).await?;
    /// let iterations = project.get_iterations(None).await?;
    /// let iteration = &iterations[0];
    ///
    /// let body = iteration
    ///     .get_translated_documentation("coala", "de-DE", None)
    ///     .await?;
    /// println!("{}", body.text().await?);
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns any error from [`Session::invoke`].
    #[tracing::instrument(skip(self, cancellable), fields(project = %self.project_id, iteration = %self.id))]
    pub async fn get_translated_documentation(
        &self,
        domain: &str,
        locale: &str,
        cancellable: Option<&CancellationToken>,
    ) -> Result<ResponseBody> {
        let endpoint = self.session.endpoint(&self.documentation_path(domain, locale))?;
        let invocation = Invocation::new(Method::GET, endpoint)
            .parameters(vec![Parameter::new("ext", "gettext")])
            .accept(JSON_CONTENT_TYPE);

        self.session.invoke(invocation, cancellable).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StaticAuthorizer;
    use serde_json::json;
    use std::sync::Arc;

    fn session() -> Session {
        let authorizer = StaticAuthorizer::new("https://translate.example.org/").unwrap();
        Session::new(Arc::new(authorizer), "test").unwrap()
    }

    #[test]
    fn test_decode_requires_id_and_status() {
        let session = session();
        assert!(Iteration::from_json(&session, "p", &json!({"id": "1.0"})).is_none());
        assert!(Iteration::from_json(&session, "p", &json!({"status": "ACTIVE"})).is_none());
        assert!(Iteration::from_json(&session, "p", &json!("1.0")).is_none());

        let iteration =
            Iteration::from_json(&session, "p", &json!({"id": "1.0", "status": "Bogus"})).unwrap();
        assert_eq!(iteration.status, IterationStatus::Unknown);
    }

    #[test]
    fn test_documentation_path_escapes_segments() {
        let iteration =
            Iteration::from_json(&session(), "my project", &json!({"id": "v1/2", "status": "ACTIVE"}))
                .unwrap();

        assert_eq!(
            iteration.documentation_path("doc domain", "de-DE"),
            "/rest/projects/p/my%20project/iterations/i/v1%2F2/r/doc%20domain/translations/de-DE"
        );
    }

    #[test]
    fn test_serialize_omits_session() {
        let iteration =
            Iteration::from_json(&session(), "p", &json!({"id": "1.0", "status": "ACTIVE"})).unwrap();
        let value = serde_json::to_value(&iteration).unwrap();
        assert_eq!(value, json!({"id": "1.0", "status": "ACTIVE", "projectId": "p"}));
    }
}
