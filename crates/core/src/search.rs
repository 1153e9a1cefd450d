//! SearchBackend trait — the abstraction over the document-search collaborator.
//!
//! A backend knows how to turn a query string (plus the user profile for
//! filtering) into a ranked list of content records. The retrieval
//! strategies never see the transport; they consume [`SearchHit`]s and
//! normalize them into domain results.
//!
//! Implementations: HTTP search index, fixture corpus (for testing).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::profile::UserProfile;

/// A raw hit returned by a search backend. Optional fields are filled in
/// with strategy-specific defaults during normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    /// The content text.
    pub content: String,

    /// Relevance score in [0, 1], when the backend provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,

    /// Exercise-type category, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Target muscle groups.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub muscle_groups: Vec<String>,

    /// Difficulty tag, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
}

/// The document-search collaborator.
///
/// Callers treat any raised error as "no results for this query" — a
/// failing backend degrades retrieval, it never aborts a request.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// The backend name (e.g. "http", "fixture").
    fn name(&self) -> &str;

    /// Run one query and return ranked hits.
    async fn search(
        &self,
        query: &str,
        profile: &UserProfile,
    ) -> std::result::Result<Vec<SearchHit>, SearchError>;
}
