//! Translation memory suggestions.

use async_trait::async_trait;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use super::json::{array_member, root_array, strings};
use crate::error::Result;
use crate::request::{Invocation, Parameter, JSON_CONTENT_TYPE};
use crate::session::Session;
use crate::traits::List;

/// A translation memory match pairing source and target text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    /// Source text variants (singular and plural forms).
    pub source_contents: Vec<String>,

    /// Matching target text variants.
    pub target_contents: Vec<String>,

    /// How similar the match is to the query, in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity_percent: Option<f64>,

    /// Server-side relevance ranking of the match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevance_score: Option<f64>,
}

/// What to look up in the translation memory.
#[derive(Debug, Clone, Default)]
pub struct SuggestionQuery {
    /// Source strings to find matches for.
    pub terms: Vec<String>,
    /// Locale of the source strings (e.g. `en-US`).
    pub from_locale: String,
    /// Locale to get translations in (e.g. `ja`).
    pub to_locale: String,
}

impl Suggestion {
    /// Create a suggestion without scores.
    pub fn new(source_contents: Vec<String>, target_contents: Vec<String>) -> Self {
        Self {
            source_contents,
            target_contents,
            similarity_percent: None,
            relevance_score: None,
        }
    }

    /// Decode one element of the suggestions array.
    ///
    /// Elements lacking either contents array are skipped; non-string
    /// entries inside the arrays are dropped.
    fn from_json(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let source = array_member(object, "sourceContents")?;
        let target = array_member(object, "targetContents")?;

        Some(Self {
            source_contents: strings(source),
            target_contents: strings(target),
            similarity_percent: object.get("similarityPercent").and_then(Value::as_f64),
            relevance_score: object.get("relevanceScore").and_then(Value::as_f64),
        })
    }

    pub(crate) fn list_from_json(root: &Value) -> Result<Vec<Self>> {
        Ok(root_array(root)?.iter().filter_map(Self::from_json).collect())
    }
}

#[async_trait]
impl List for Suggestion {
    type Query = SuggestionQuery;

    #[tracing::instrument(skip(session, cancellable))]
    async fn list(
        session: &Session,
        query: &Self::Query,
        cancellable: Option<&CancellationToken>,
    ) -> Result<Vec<Self>> {
        let endpoint = session.endpoint("/rest/suggestions")?;
        let body = serde_json::to_vec(&query.terms)?;

        let invocation = Invocation::new(Method::POST, endpoint)
            .parameters(vec![
                Parameter::new("from", query.from_locale.as_str()),
                Parameter::new("to", query.to_locale.as_str()),
            ])
            .body(JSON_CONTENT_TYPE, body)
            .accept(JSON_CONTENT_TYPE);

        let root = session.invoke_json(invocation, cancellable).await?;
        Self::list_from_json(&root)
    }
}
