//! Iteration quality scoring.
//!
//! Relevance looks only at the batch just retrieved; coverage and diversity
//! look at everything accumulated so far plus the new batch, so they are
//! monotone across the loop.

use fitrec_core::plan::AgentPlan;
use fitrec_core::quality::QualityAssessment;
use fitrec_core::result::SearchResult;
use std::collections::HashSet;

const RELEVANCE_WEIGHT: f32 = 0.4;
const COVERAGE_WEIGHT: f32 = 0.3;
const DIVERSITY_WEIGHT: f32 = 0.3;

/// Score the batch retrieved this iteration against the plan.
///
/// `prior` is the cumulative result set before this batch was appended.
/// An empty batch scores zero on every axis and never meets criteria.
pub fn assess_quality(
    new_results: &[SearchResult],
    plan: &AgentPlan,
    prior: &[SearchResult],
) -> QualityAssessment {
    if new_results.is_empty() {
        return QualityAssessment::zero();
    }

    let relevance = new_results
        .iter()
        .map(|r| r.relevance_score)
        .sum::<f32>()
        / new_results.len() as f32;

    let combined = prior.iter().chain(new_results);

    let mut exercise_types = HashSet::new();
    let mut muscles = HashSet::new();
    let mut difficulties = HashSet::new();
    for r in combined {
        exercise_types.insert(r.exercise_type.as_str());
        for m in &r.target_muscles {
            muscles.insert(m.as_str());
        }
        difficulties.insert(r.difficulty.as_str());
    }

    let coverage = if plan.sub_goals.is_empty() {
        1.0
    } else {
        (exercise_types.len() as f32 / plan.sub_goals.len() as f32).min(1.0)
    };
    let diversity = ((muscles.len() + difficulties.len()) as f32 / 10.0).min(1.0);

    let overall_score =
        relevance * RELEVANCE_WEIGHT + coverage * COVERAGE_WEIGHT + diversity * DIVERSITY_WEIGHT;

    QualityAssessment {
        overall_score,
        relevance,
        coverage,
        diversity,
        meets_criteria: overall_score >= plan.success_criteria.relevance_threshold,
    }
}
