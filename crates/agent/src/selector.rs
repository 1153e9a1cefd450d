//! Dynamic strategy selection.
//!
//! The decision tree is a priority cascade, not a set of independent
//! heuristics: conditions are evaluated in order and only the first match
//! fires. Swapping priorities changes observable strategy choice for
//! borderline inputs, so the order here is fixed.

use fitrec_core::goal::Strategy;
use fitrec_core::plan::AgentPlan;
use fitrec_core::result::SearchResult;
use tracing::debug;

/// Exercise-type tags considered too generic to count as specific results.
const GENERIC_TERMS: [&str; 4] = ["general", "basic", "beginner", "simple"];

/// Pick the retrieval strategy for this iteration (0-based).
pub fn select_strategy(
    plan: &AgentPlan,
    current_results: &[SearchResult],
    iteration: usize,
) -> Strategy {
    let chosen = if iteration == 0 {
        // Always explore broadly first.
        Strategy::BroadSearch
    } else if current_results.len() < 3 {
        // Too few results to judge; broaden sources.
        Strategy::MultiAngleApproach
    } else if results_lack_specificity(current_results) {
        Strategy::TargetedSearch
    } else if results_need_refinement(current_results) {
        Strategy::ProgressiveRefinement
    } else {
        // Cyclic fallback over the plan's candidate sequence.
        plan.search_strategies[iteration % plan.search_strategies.len()]
    };

    debug!(iteration, strategy = %chosen, results = current_results.len(), "Strategy selected");
    chosen
}

/// More than 70% of results carry a generic exercise-type tag.
fn results_lack_specificity(results: &[SearchResult]) -> bool {
    let generic_count = results
        .iter()
        .filter(|r| {
            let tag = r.exercise_type.to_lowercase();
            GENERIC_TERMS.iter().any(|t| tag.contains(t))
        })
        .count();
    generic_count as f32 > results.len() as f32 * 0.7
}

/// Average relevance is moderate (strictly between 0.4 and 0.7), so the
/// result set is worth refining rather than replacing.
fn results_need_refinement(results: &[SearchResult]) -> bool {
    if results.is_empty() {
        return false;
    }
    let avg = results.iter().map(|r| r.relevance_score).sum::<f32>() / results.len() as f32;
    avg > 0.4 && avg < 0.7
}
