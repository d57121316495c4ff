//! Mock server state management.
//!
//! Provides the in-memory data store for the mock Zanata API server.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::{IterationStatus, ProjectStatus, Suggestion};

/// A project as stored by the mock server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MockProject {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: ProjectStatus,
    #[serde(default)]
    pub iterations: Vec<MockIteration>,
}

/// An iteration as stored by the mock server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MockIteration {
    pub id: String,
    pub status: IterationStatus,
}

/// Identifies one translated document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentKey {
    pub project: String,
    pub iteration: String,
    pub document: String,
    pub locale: String,
}

impl DocumentKey {
    pub fn new(project: &str, iteration: &str, document: &str, locale: &str) -> Self {
        Self {
            project: project.to_string(),
            iteration: iteration.to_string(),
            document: document.to_string(),
            locale: locale.to_string(),
        }
    }
}

/// Shared state for the mock server.
///
/// This struct holds all the mock data that the server will serve.
/// It's wrapped in `Arc<RwLock<_>>` for concurrent access.
#[derive(Debug, Default)]
pub struct MockState {
    /// Projects indexed by slug, listed in slug order.
    pub projects: BTreeMap<String, MockProject>,

    /// Translation memory entries.
    pub suggestions: Vec<Suggestion>,

    /// Translated documents by location.
    pub documents: HashMap<DocumentKey, String>,

    /// Optional credentials. If set, requests must carry this user and token.
    pub required_credentials: Option<(String, String)>,

    /// Number of detail requests served per project slug.
    pub project_fetches: HashMap<String, usize>,
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Add a project to the state.
    pub fn with_project(mut self, project: MockProject) -> Self {
        self.projects.insert(project.id.clone(), project);
        self
    }

    /// Add a translation memory entry.
    pub fn with_suggestion(mut self, suggestion: Suggestion) -> Self {
        self.suggestions.push(suggestion);
        self
    }

    /// Add a translated document.
    pub fn with_document(mut self, key: DocumentKey, contents: &str) -> Self {
        self.documents.insert(key, contents.to_string());
        self
    }

    /// Require these credentials on every request.
    pub fn with_required_credentials(mut self, username: &str, key: &str) -> Self {
        self.required_credentials = Some((username.to_string(), key.to_string()));
        self
    }

    /// Get a project by slug.
    pub fn get_project(&self, id: &str) -> Option<&MockProject> {
        self.projects.get(id)
    }

    /// Get a document.
    pub fn get_document(&self, key: &DocumentKey) -> Option<&String> {
        self.documents.get(key)
    }

    /// List all projects in slug order.
    pub fn list_projects(&self) -> Vec<&MockProject> {
        self.projects.values().collect()
    }

    /// Memory entries whose source text contains any of the terms.
    pub fn find_suggestions(&self, terms: &[String]) -> Vec<&Suggestion> {
        let terms: Vec<String> = terms.iter().map(|t| t.to_lowercase()).collect();
        self.suggestions
            .iter()
            .filter(|s| {
                s.source_contents.iter().any(|source| {
                    let source = source.to_lowercase();
                    terms.iter().any(|t| source.contains(t.as_str()))
                })
            })
            .collect()
    }

    /// Record a detail request for `id`.
    pub fn record_project_fetch(&mut self, id: &str) {
        *self.project_fetches.entry(id.to_string()).or_default() += 1;
    }

    /// How many detail requests were served for `id`.
    pub fn project_fetch_count(&self, id: &str) -> usize {
        self.project_fetches.get(id).copied().unwrap_or(0)
    }
}
