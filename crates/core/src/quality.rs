//! Quality assessment of an iteration's search results.

use serde::{Deserialize, Serialize};

/// Metrics computed each iteration from the new batch plus the cumulative
/// result set. All scores are clamped to [0, 1].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct QualityAssessment {
    /// Weighted overall score: 0.4·relevance + 0.3·coverage + 0.3·diversity.
    pub overall_score: f32,

    /// Mean relevance of the new-result batch.
    pub relevance: f32,

    /// Fraction of sub-goals represented by distinct exercise types so far.
    pub coverage: f32,

    /// Normalized count of distinct muscle/difficulty tags so far.
    pub diversity: f32,

    /// Whether the overall score clears the plan's relevance threshold.
    pub meets_criteria: bool,
}

impl QualityAssessment {
    /// The all-zero assessment produced when an iteration yields no results.
    pub fn zero() -> Self {
        Self {
            overall_score: 0.0,
            relevance: 0.0,
            coverage: 0.0,
            diversity: 0.0,
            meets_criteria: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_assessment_never_meets_criteria() {
        let q = QualityAssessment::zero();
        assert_eq!(q.overall_score, 0.0);
        assert_eq!(q.relevance, 0.0);
        assert_eq!(q.coverage, 0.0);
        assert_eq!(q.diversity, 0.0);
        assert!(!q.meets_criteria);
    }
}
