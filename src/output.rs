//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use crate::{Iteration, Project, Suggestion};

/// Trait for human-readable key-value output.
///
/// Implemented by entity types to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

impl PrettyPrint for Project {
    fn pretty_print(&self) -> String {
        let divider = "─".repeat(self.id.len().max(30));

        let mut lines = vec![
            format!("Project: {}", self.id),
            divider,
            format!("Name:           {}", self.name),
            format!("Status:         {}", self.status),
        ];

        if let Some(ref description) = self.description {
            lines.push(format!("Description:    {}", description));
        }

        match self.cached_iterations() {
            Some(iterations) if iterations.is_empty() => {
                lines.push("Iterations:     none".to_string());
            }
            Some(iterations) => {
                lines.push(format!("Iterations:     {}", iterations.len()));
                for iteration in iterations {
                    lines.push(format!("  - {} ({})", iteration.id, iteration.status));
                }
            }
            None => lines.push("Iterations:     not loaded".to_string()),
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Iteration {
    fn pretty_print(&self) -> String {
        let header = format!("Iteration: {}/{}", self.project_id, self.id);
        let divider = "─".repeat(header.len().max(30));

        [header, divider, format!("Status:         {}", self.status)].join("\n")
    }
}

impl PrettyPrint for Suggestion {
    fn pretty_print(&self) -> String {
        let mut lines = vec![
            format!("Source:         {}", self.source_contents.join(" | ")),
            format!("Target:         {}", self.target_contents.join(" | ")),
        ];

        if let Some(similarity) = self.similarity_percent {
            lines.push(format!("Similarity:     {similarity:.1}%"));
        }

        lines.join("\n")
    }
}
