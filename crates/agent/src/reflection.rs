//! Post-run self-assessment.

use fitrec_core::plan::AgentPlan;
use fitrec_core::result::SearchResult;
use serde::Serialize;
use std::collections::HashSet;

/// Self-assessment of how the loop performed, appended to the output when
/// reflection mode is enabled.
#[derive(Debug, Clone, Serialize)]
pub struct Reflection {
    /// The plan's iteration estimate held up against what was gathered.
    pub planning_effectiveness: bool,

    /// At least 70% of sub-goals were covered by distinct result types.
    pub goal_achievement: bool,

    /// Mean relevance across everything gathered (0 when nothing was).
    pub search_efficiency: f32,

    /// More than one source tag means the loop actually switched approach.
    pub strategy_adaptation: bool,
}

impl Reflection {
    pub fn from_run(plan: &AgentPlan, results: &[SearchResult]) -> Self {
        let distinct_types: HashSet<&str> =
            results.iter().map(|r| r.exercise_type.as_str()).collect();
        let distinct_sources: HashSet<&str> =
            results.iter().map(|r| r.source.as_str()).collect();

        let search_efficiency = if results.is_empty() {
            0.0
        } else {
            results.iter().map(|r| r.relevance_score).sum::<f32>() / results.len() as f32
        };

        Self {
            planning_effectiveness: results.len() <= plan.expected_iterations,
            goal_achievement: distinct_types.len() as f32
                >= plan.sub_goals.len() as f32 * 0.7,
            search_efficiency,
            strategy_adaptation: distinct_sources.len() > 1,
        }
    }
}
