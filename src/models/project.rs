//! Project model and trait implementations.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use super::iteration::Iteration;
use super::json::{
    required_array, required_string, root_array, root_object, string_member, Object,
};
use super::status::ProjectStatus;
use crate::error::Result;
use crate::session::{json_get, Session};
use crate::traits::{Get, List};

/// A Zanata project.
///
/// Projects group the iterations (release lines) of one translatable
/// code base. Projects returned by [`Session::get_projects`] start without
/// their iterations; [`Project::get_iterations`] loads them once and keeps
/// them.
pub struct Project {
    /// The project slug.
    pub id: String,

    /// Human readable project name.
    pub name: String,

    /// Project description, when the server sends one.
    pub description: Option<String>,

    /// Project status.
    pub status: ProjectStatus,

    session: Session,

    /// `Some` once iterations have been loaded.
    iterations: Mutex<Option<Vec<Arc<Iteration>>>>,
}

impl std::fmt::Debug for Project {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Project")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("description", &self.description)
            .field("status", &self.status)
            .field("iterations", &*self.lock())
            .finish_non_exhaustive()
    }
}

impl Serialize for Project {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let iterations = self.cached_iterations();
        let mut state = serializer.serialize_struct("Project", 6)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("description", &self.description)?;
        state.serialize_field("status", &self.status)?;
        state.serialize_field("loaded", &iterations.is_some())?;
        state.serialize_field("iterations", &iterations)?;
        state.end()
    }
}

impl Project {
    pub(crate) fn new(
        session: Session,
        id: &str,
        name: &str,
        description: Option<&str>,
        status: ProjectStatus,
        iterations: Option<Vec<Arc<Iteration>>>,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.map(str::to_string),
            status,
            session,
            iterations: Mutex::new(iterations),
        }
    }

    /// Whether the iteration list has been loaded.
    pub fn loaded(&self) -> bool {
        self.lock().is_some()
    }

    /// The loaded iterations, or `None` if they have not been fetched yet.
    pub fn cached_iterations(&self) -> Option<Vec<Arc<Iteration>>> {
        self.lock().clone()
    }

    /// Get the iterations of this project, fetching them on first use.
    ///
    /// A loaded project answers from its cache without any network call.
    /// Concurrent first calls each issue their own fetch; the first result
    /// stored is kept.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # async fn example(session: &zanata::Session) -> zanata::Result<()> {
    /// let projects = session.get_projects(None).await?;
    /// for iteration in projects[0].get_iterations(None).await? {
    ///     println!("{} - {}", iteration.id, iteration.status);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns any error from [`Session::get_project`].
    pub async fn get_iterations(
        &self,
        cancellable: Option<&CancellationToken>,
    ) -> Result<Vec<Arc<Iteration>>> {
        if let Some(cached) = self.cached_iterations() {
            return Ok(cached);
        }

        let fetched = self.session.get_project(&self.id, cancellable).await?;
        let iterations = fetched.cached_iterations().unwrap_or_default();

        let mut slot = self.lock();
        Ok(slot.get_or_insert(iterations).clone())
    }

    fn lock(&self) -> MutexGuard<'_, Option<Vec<Arc<Iteration>>>> {
        self.iterations.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Decode an entry of the project list; entries missing a field are skipped.
    fn from_summary(session: &Session, value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let id = string_member(object, "id")?;
        let name = string_member(object, "name")?;
        let status = string_member(object, "status")?;

        Some(Self::new(
            session.clone(),
            id,
            name,
            string_member(object, "description"),
            ProjectStatus::from_nick(status),
            None,
        ))
    }

    /// Decode a full project document, iterations included.
    fn from_detail(session: &Session, object: &Object) -> Result<Self> {
        let id = required_string(object, "id")?;
        let name = required_string(object, "name")?;
        let status = required_string(object, "status")?;
        let entries = required_array(object, "iterations")?;

        let iterations = entries
            .iter()
            .filter_map(|entry| Iteration::from_json(session, id, entry))
            .map(Arc::new)
            .collect();

        Ok(Self::new(
            session.clone(),
            id,
            name,
            string_member(object, "description"),
            ProjectStatus::from_nick(status),
            Some(iterations),
        ))
    }

    /// Decode the `/rest/projects` response.
    pub(crate) fn list_from_json(session: &Session, root: &Value) -> Result<Vec<Self>> {
        Ok(root_array(root)?
            .iter()
            .filter_map(|entry| Self::from_summary(session, entry))
            .collect())
    }

    /// Decode the `/rest/projects/p/{id}` response.
    pub(crate) fn detail_from_json(session: &Session, root: &Value) -> Result<Self> {
        Self::from_detail(session, root_object(root)?)
    }
}

#[async_trait]
impl Get for Project {
    type Id = String; // Project slug

    #[tracing::instrument(skip(session, cancellable))]
    async fn get(
        session: &Session,
        id: String,
        cancellable: Option<&CancellationToken>,
    ) -> Result<Self> {
        let path = format!("/rest/projects/p/{}", urlencoding::encode(&id));
        let endpoint = session.endpoint(&path)?;

        let root = session.invoke_json(json_get(endpoint), cancellable).await?;
        Self::detail_from_json(session, &root)
    }
}

#[async_trait]
impl List for Project {
    type Query = ();

    #[tracing::instrument(skip_all)]
    async fn list(
        session: &Session,
        _query: &Self::Query,
        cancellable: Option<&CancellationToken>,
    ) -> Result<Vec<Self>> {
        let endpoint = session.endpoint("/rest/projects")?;

        let root = session.invoke_json(json_get(endpoint), cancellable).await?;
        let projects = Self::list_from_json(session, &root)?;
        tracing::debug!(count = projects.len(), "decoded projects");
        Ok(projects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ZanataError;
    use crate::models::IterationStatus;
    use crate::StaticAuthorizer;
    use serde_json::json;

    fn session() -> Session {
        let authorizer = StaticAuthorizer::new("https://translate.example.org/").unwrap();
        Session::new(Arc::new(authorizer), "test").unwrap()
    }

    #[test]
    fn test_decode_project_list() {
        let root = json!([{"id": "p1", "name": "Proj One", "status": "ACTIVE"}]);
        let projects = Project::list_from_json(&session(), &root).unwrap();

        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].id, "p1");
        assert_eq!(projects[0].name, "Proj One");
        assert_eq!(projects[0].status, ProjectStatus::Active);
        assert!(!projects[0].loaded());
    }

    #[test]
    fn test_decode_unknown_status() {
        let root = json!([{"id": "p1", "name": "Proj One", "status": "bogus"}]);
        let projects = Project::list_from_json(&session(), &root).unwrap();
        assert_eq!(projects[0].status, ProjectStatus::Unknown);
    }

    #[test]
    fn test_list_skips_incomplete_entries() {
        let root = json!([
            {"id": "p1", "name": "One", "status": "ACTIVE"},
            {"id": "p2", "status": "ACTIVE"},
            "not an object",
            {"id": "p3", "name": "Three", "status": "Obsolete", "description": "old"}
        ]);
        let projects = Project::list_from_json(&session(), &root).unwrap();

        let ids: Vec<_> = projects.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p3"]);
        assert_eq!(projects[1].description.as_deref(), Some("old"));
        assert_eq!(projects[1].status, ProjectStatus::Obsolete);
    }

    #[test]
    fn test_list_requires_array_root() {
        let err = Project::list_from_json(&session(), &json!({"id": "p1"})).unwrap_err();
        assert!(matches!(err, ZanataError::InvalidResponse(_)));
    }

    #[test]
    fn test_decode_project_detail() {
        let root = json!({
            "id": "coala",
            "name": "coala",
            "status": "ACTIVE",
            "iterations": [
                {"id": "0.9", "status": "READONLY"},
                {"id": "broken"},
                {"id": "master", "status": "active"}
            ]
        });
        let project = Project::detail_from_json(&session(), &root).unwrap();

        assert!(project.loaded());
        let iterations = project.cached_iterations().unwrap();
        assert_eq!(iterations.len(), 2);
        assert_eq!(iterations[0].id, "0.9");
        assert_eq!(iterations[0].status, IterationStatus::ReadOnly);
        assert_eq!(iterations[1].id, "master");
        assert_eq!(iterations[1].project_id, "coala");
    }

    #[test]
    fn test_detail_names_first_missing_field() {
        let cases = [
            (json!({"name": "n", "status": "ACTIVE", "iterations": []}), "\"id\""),
            (json!({"id": "p", "status": "ACTIVE", "iterations": []}), "\"name\""),
            (json!({"id": "p", "name": "n", "iterations": []}), "\"status\""),
            (json!({"id": "p", "name": "n", "status": "ACTIVE"}), "\"iterations\""),
            (json!({}), "\"id\""),
        ];

        for (root, field) in cases {
            let err = Project::detail_from_json(&session(), &root).unwrap_err();
            assert!(matches!(err, ZanataError::InvalidResponse(_)));
            assert!(err.to_string().contains(field), "{err} should mention {field}");
        }
    }

    #[test]
    fn test_detail_requires_object_root() {
        assert!(Project::detail_from_json(&session(), &json!([])).is_err());
    }

    #[tokio::test]
    async fn test_loaded_project_answers_from_cache() {
        let root = json!({
            "id": "p", "name": "n", "status": "ACTIVE",
            "iterations": [{"id": "1.0", "status": "ACTIVE"}]
        });
        // The session points nowhere reachable; any fetch would fail.
        let project = Project::detail_from_json(&session(), &root).unwrap();

        let first = project.get_iterations(None).await.unwrap();
        let second = project.get_iterations(None).await.unwrap();
        assert_eq!(first.len(), 1);
        assert!(Arc::ptr_eq(&first[0], &second[0]));
    }

    #[test]
    fn test_serialize_includes_loaded_flag() {
        let root = json!([{"id": "p1", "name": "Proj One", "status": "ACTIVE"}]);
        let projects = Project::list_from_json(&session(), &root).unwrap();
        let value = serde_json::to_value(&projects[0]).unwrap();

        assert_eq!(value["id"], "p1");
        assert_eq!(value["status"], "ACTIVE");
        assert_eq!(value["loaded"], false);
        assert!(value["iterations"].is_null());
    }
}
