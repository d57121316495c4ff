//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data.

use super::state::{DocumentKey, MockIteration, MockProject};
use crate::{IterationStatus, ProjectStatus, Suggestion};

/// Collection of fixture factories for test data.
pub struct Fixtures;

/// Data the mock server starts with by default.
pub struct DefaultScenario {
    pub projects: Vec<MockProject>,
    pub suggestions: Vec<Suggestion>,
    pub documents: Vec<(DocumentKey, String)>,
}

impl Fixtures {
    // =========================================================================
    // Project Fixtures
    // =========================================================================

    /// Create a project without iterations.
    pub fn minimal_project(id: &str, name: &str) -> MockProject {
        MockProject {
            id: id.to_string(),
            name: name.to_string(),
            description: None,
            status: ProjectStatus::Active,
            iterations: vec![],
        }
    }

    /// Create a project with the given iterations, all active.
    pub fn project_with_iterations(id: &str, name: &str, iterations: &[&str]) -> MockProject {
        let mut project = Self::minimal_project(id, name);
        project.iterations = iterations
            .iter()
            .map(|i| Self::iteration(i, IterationStatus::Active))
            .collect();
        project
    }

    /// Create an iteration.
    pub fn iteration(id: &str, status: IterationStatus) -> MockIteration {
        MockIteration {
            id: id.to_string(),
            status,
        }
    }

    // =========================================================================
    // Suggestion Fixtures
    // =========================================================================

    /// Create an exact translation memory match.
    pub fn exact_suggestion(source: &str, target: &str) -> Suggestion {
        let mut suggestion = Suggestion::new(vec![source.to_string()], vec![target.to_string()]);
        suggestion.similarity_percent = Some(100.0);
        suggestion.relevance_score = Some(1.0);
        suggestion
    }

    // =========================================================================
    // Document Fixtures
    // =========================================================================

    /// A translations resource with one approved target per entry.
    pub fn translations_document(entries: &[(&str, &str)]) -> String {
        let targets: Vec<_> = entries
            .iter()
            .map(|(res_id, content)| {
                serde_json::json!({
                    "resId": res_id,
                    "state": "Approved",
                    "content": content,
                })
            })
            .collect();

        serde_json::json!({
            "extensions": [{"object-type": "po-target-header", "comment": "", "entries": []}],
            "textFlowTargets": targets,
        })
        .to_string()
    }

    // =========================================================================
    // Scenarios
    // =========================================================================

    /// The default scenario served by [`MockServer::start`](super::MockServer::start).
    pub fn default_scenario() -> DefaultScenario {
        let mut coala = Self::project_with_iterations("coala", "coala", &["0.9", "master"]);
        coala.description = Some("Code analysis made easy".to_string());
        coala.iterations[0].status = IterationStatus::ReadOnly;

        let mut legacy = Self::project_with_iterations("legacy-docs", "Legacy Docs", &["1.0"]);
        legacy.status = ProjectStatus::Obsolete;
        legacy.iterations[0].status = IterationStatus::Obsolete;

        let empty = Self::minimal_project("new-project", "New Project");

        DefaultScenario {
            projects: vec![coala, legacy, empty],
            suggestions: vec![
                Self::exact_suggestion("Open file", "ファイルを開く"),
                Self::exact_suggestion("Save file", "ファイルを保存"),
                Suggestion::new(
                    vec!["%d file".to_string(), "%d files".to_string()],
                    vec!["%d 個のファイル".to_string()],
                ),
            ],
            documents: vec![(
                DocumentKey::new("coala", "master", "coala", "de-DE"),
                Self::translations_document(&[("open", "Datei öffnen"), ("save", "Speichern")]),
            )],
        }
    }
}
