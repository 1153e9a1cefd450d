//! Normalized search results accumulated across loop iterations.

use serde::{Deserialize, Serialize};

/// A single search result with quality metadata.
///
/// Immutable once produced by a retrieval strategy; the controller
/// accumulates results in an append-only sequence across iterations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// The content text of the hit.
    pub content: String,

    /// Relevance score in [0, 1]. Strategies assign a strategy-specific
    /// default when the backend omits one.
    pub relevance_score: f32,

    /// Source tag identifying which strategy/query produced this result.
    pub source: String,

    /// Exercise-type category (e.g. "cardio", "strength").
    pub exercise_type: String,

    /// Target muscle-group tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub target_muscles: Vec<String>,

    /// Difficulty tag (e.g. "beginner", "intermediate", "advanced").
    pub difficulty: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_serialization_round_trips() {
        let result = SearchResult {
            content: "Jump rope intervals, 10x30s".into(),
            relevance_score: 0.82,
            source: "search".into(),
            exercise_type: "cardio".into(),
            target_muscles: vec!["calves".into(), "shoulders".into()],
            difficulty: "intermediate".into(),
        };
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("Jump rope"));
        let back: SearchResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back.exercise_type, "cardio");
        assert_eq!(back.target_muscles.len(), 2);
    }

    #[test]
    fn empty_muscles_omitted_from_json() {
        let result = SearchResult {
            content: "x".into(),
            relevance_score: 0.5,
            source: "search".into(),
            exercise_type: "general".into(),
            target_muscles: vec![],
            difficulty: "beginner".into(),
        };
        let json = serde_json::to_string(&result).unwrap();
        assert!(!json.contains("target_muscles"));
    }
}
