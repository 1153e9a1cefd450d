//! Fixture search backend — built-in fitness corpus.
//!
//! Keyword-keyed canned hits so the full agentic loop can run end-to-end
//! without a live search index. Used by tests and the CLI demo path.

use async_trait::async_trait;
use fitrec_core::error::SearchError;
use fitrec_core::profile::UserProfile;
use fitrec_core::search::{SearchBackend, SearchHit};
use tracing::debug;

/// A search backend serving a small in-process fitness corpus.
pub struct FixtureSearchBackend;

impl FixtureSearchBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FixtureSearchBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SearchBackend for FixtureSearchBackend {
    fn name(&self) -> &str {
        "fixture"
    }

    async fn search(
        &self,
        query: &str,
        _profile: &UserProfile,
    ) -> Result<Vec<SearchHit>, SearchError> {
        let hits = corpus_hits(query);
        debug!(query = %query, hits = hits.len(), "Fixture search");
        Ok(hits)
    }
}

fn hit(
    content: &str,
    score: f32,
    category: &str,
    muscles: &[&str],
    difficulty: &str,
) -> SearchHit {
    SearchHit {
        content: content.into(),
        score: Some(score),
        category: Some(category.into()),
        muscle_groups: muscles.iter().map(|m| (*m).to_string()).collect(),
        difficulty: Some(difficulty.into()),
    }
}

/// Topic-keyed corpus with a generic fallback, first matching topic wins.
fn corpus_hits(query: &str) -> Vec<SearchHit> {
    let q = query.to_lowercase();

    let topics: Vec<(&[&str], Vec<SearchHit>)> = vec![
        (
            &["cardio", "hiit", "fat burning", "weight loss", "endurance", "aerobic"],
            vec![
                hit(
                    "HIIT circuit: 30s burpees, 30s mountain climbers, 30s rest, repeat 8 rounds. Burns 12-15 kcal/min.",
                    0.92,
                    "cardio",
                    &["full_body", "core"],
                    "intermediate",
                ),
                hit(
                    "Steady-state incline walking: 30-45 minutes at 60-70% max heart rate, 3-5x weekly.",
                    0.84,
                    "cardio",
                    &["legs", "glutes"],
                    "beginner",
                ),
                hit(
                    "Rowing intervals: 500m hard / 90s easy x6. Low-impact full-body conditioning.",
                    0.78,
                    "cardio",
                    &["back", "legs", "core"],
                    "advanced",
                ),
            ],
        ),
        (
            &["strength", "muscle", "hypertrophy", "resistance", "powerlifting", "strong"],
            vec![
                hit(
                    "Progressive overload protocol: compound lifts (squat, bench, row) 3x5-8, add 2.5% load weekly.",
                    0.9,
                    "strength",
                    &["quads", "chest", "back"],
                    "intermediate",
                ),
                hit(
                    "Hypertrophy block: 4x8-12 per muscle group, 10-20 weekly sets, 60-90s rest.",
                    0.86,
                    "strength",
                    &["chest", "shoulders", "arms"],
                    "intermediate",
                ),
                hit(
                    "Bodyweight strength ladder: push-ups, inverted rows, split squats; add reps each session.",
                    0.74,
                    "strength",
                    &["chest", "back", "legs"],
                    "beginner",
                ),
            ],
        ),
        (
            &["nutrition", "calorie", "diet", "growth"],
            vec![
                hit(
                    "Protein target 0.7-1.0 g per lb bodyweight daily; distribute across 3-4 meals.",
                    0.88,
                    "nutrition",
                    &[],
                    "beginner",
                ),
                hit(
                    "Moderate deficit of 300-500 kcal/day preserves lean mass during weight loss.",
                    0.82,
                    "nutrition",
                    &[],
                    "beginner",
                ),
            ],
        ),
        (
            &["progression", "progressive", "recovery", "heart rate"],
            vec![
                hit(
                    "Deload every 4th week: reduce volume 40-50%, keep intensity, resume progression after.",
                    0.8,
                    "recovery",
                    &[],
                    "intermediate",
                ),
                hit(
                    "Zone-2 base building: keep heart rate at 180 minus age for 45-60 minute sessions.",
                    0.76,
                    "cardio",
                    &["legs"],
                    "beginner",
                ),
            ],
        ),
        (
            &["form", "posture", "mobility", "safety", "foundational", "balanced"],
            vec![
                hit(
                    "Hip hinge drill with dowel: maintain three points of contact to groove neutral spine.",
                    0.79,
                    "mobility",
                    &["hamstrings", "lower_back"],
                    "beginner",
                ),
                hit(
                    "Balanced weekly template: 2 strength days, 2 cardio days, 1 mobility session.",
                    0.73,
                    "general",
                    &["full_body"],
                    "beginner",
                ),
            ],
        ),
    ];

    for (keywords, hits) in topics {
        if keywords.iter().any(|k| q.contains(k)) {
            return hits;
        }
    }

    // Generic fallback with decreasing scores and no category, so the
    // strategy defaults apply.
    (0..3)
        .map(|i| SearchHit {
            content: format!("General fitness guidance related to '{query}', item {}.", i + 1),
            score: None,
            category: None,
            muscle_groups: vec![],
            difficulty: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitrec_core::profile::{RawUserData, UserProfile};

    fn profile() -> UserProfile {
        UserProfile::from_raw(&RawUserData::default(), "").unwrap()
    }

    #[tokio::test]
    async fn cardio_query_returns_cardio_hits() {
        let backend = FixtureSearchBackend::new();
        let hits = backend.search("HIIT cardio", &profile()).await.unwrap();
        assert!(!hits.is_empty());
        assert_eq!(hits[0].category.as_deref(), Some("cardio"));
        assert!(hits[0].score.unwrap() > 0.7);
    }

    #[tokio::test]
    async fn strength_query_returns_strength_hits() {
        let backend = FixtureSearchBackend::new();
        let hits = backend
            .search("muscle building protocols", &profile())
            .await
            .unwrap();
        assert!(hits.iter().all(|h| h.category.as_deref() == Some("strength")));
    }

    #[tokio::test]
    async fn unknown_query_gets_generic_fallback() {
        let backend = FixtureSearchBackend::new();
        let hits = backend.search("underwater basket weaving", &profile()).await.unwrap();
        assert_eq!(hits.len(), 3);
        assert!(hits.iter().all(|h| h.score.is_none()));
        assert!(hits.iter().all(|h| h.category.is_none()));
    }

    #[tokio::test]
    async fn search_is_deterministic() {
        let backend = FixtureSearchBackend::new();
        let a = backend.search("endurance", &profile()).await.unwrap();
        let b = backend.search("endurance", &profile()).await.unwrap();
        assert_eq!(a.len(), b.len());
        assert_eq!(a[0].content, b[0].content);
    }
}
