//! HTTP search backend — REST document-search index client.
//!
//! Speaks the common "POST a search body, get a `value` array of documents"
//! shape used by hosted search services. Documents map onto [`SearchHit`]s;
//! missing fields stay `None` so the retrieval strategies fill in their
//! defaults.

use async_trait::async_trait;
use fitrec_core::error::SearchError;
use fitrec_core::profile::UserProfile;
use fitrec_core::search::{SearchBackend, SearchHit};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// A document-search client for an HTTP search index.
pub struct HttpSearchBackend {
    endpoint: String,
    index: String,
    api_key: String,
    client: reqwest::Client,
}

impl HttpSearchBackend {
    /// Create a new backend against `endpoint`, querying `index`.
    pub fn new(
        endpoint: impl Into<String>,
        index: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SearchError::NotConfigured(format!("HTTP client build failed: {e}")))?;

        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            index: index.into(),
            api_key: api_key.into(),
            client,
        })
    }

    /// Build from loaded configuration.
    pub fn from_config(config: &fitrec_config::SearchConfig) -> Result<Self, SearchError> {
        let endpoint = config
            .endpoint
            .clone()
            .ok_or_else(|| SearchError::NotConfigured("search.endpoint is not set".into()))?;
        Self::new(
            endpoint,
            config.index.clone(),
            config.api_key.clone().unwrap_or_default(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// A difficulty filter derived from the user's inferred fitness level,
    /// so a beginner profile never surfaces advanced-only content.
    fn difficulty_filter(profile: &UserProfile) -> Option<&'static str> {
        use fitrec_core::profile::FitnessLevel;
        match profile.fitness_level {
            FitnessLevel::Beginner | FitnessLevel::BeginnerToIntermediate => {
                Some("difficulty ne 'advanced'")
            }
            FitnessLevel::ExperiencedButCautious => Some("difficulty ne 'advanced'"),
            FitnessLevel::Intermediate | FitnessLevel::Advanced => None,
        }
    }
}

#[async_trait]
impl SearchBackend for HttpSearchBackend {
    fn name(&self) -> &str {
        "http"
    }

    async fn search(
        &self,
        query: &str,
        profile: &UserProfile,
    ) -> Result<Vec<SearchHit>, SearchError> {
        let url = format!(
            "{}/indexes/{}/docs/search?api-version=2023-11-01",
            self.endpoint, self.index
        );

        let mut body = serde_json::json!({
            "search": query,
            "top": 10,
            "queryType": "simple",
        });
        if let Some(filter) = Self::difficulty_filter(profile) {
            body["filter"] = serde_json::json!(filter);
        }

        debug!(query = %query, index = %self.index, "Search request");

        let response = self
            .client
            .post(&url)
            .header("api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SearchError::Timeout(format!("search query '{query}' timed out"))
                } else {
                    SearchError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Search request failed");
            return Err(SearchError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        let parsed: ApiSearchResponse = response
            .json()
            .await
            .map_err(|e| SearchError::InvalidResponse(e.to_string()))?;

        Ok(parsed.value.into_iter().map(ApiSearchDoc::into_hit).collect())
    }
}

// --- Wire DTOs ---

#[derive(Debug, Deserialize)]
struct ApiSearchResponse {
    #[serde(default)]
    value: Vec<ApiSearchDoc>,
}

#[derive(Debug, Deserialize)]
struct ApiSearchDoc {
    #[serde(default)]
    content: String,

    /// Service-assigned score; magnitude varies by service so it is
    /// normalized into [0, 1] before use.
    #[serde(rename = "@search.score", default)]
    search_score: Option<f32>,

    #[serde(default)]
    category: Option<String>,

    #[serde(default)]
    muscle_groups: Vec<String>,

    #[serde(default)]
    difficulty: Option<String>,
}

impl ApiSearchDoc {
    fn into_hit(self) -> SearchHit {
        SearchHit {
            content: self.content,
            score: self.search_score.map(normalize_score),
            category: self.category,
            muscle_groups: self.muscle_groups,
            difficulty: self.difficulty,
        }
    }
}

/// Clamp a service score into [0, 1]. BM25-style scores exceed 1, so
/// anything above is compressed against a nominal ceiling of 4.0.
fn normalize_score(raw: f32) -> f32 {
    if raw <= 1.0 {
        raw.max(0.0)
    } else {
        (raw / 4.0).min(1.0)
    }
}
