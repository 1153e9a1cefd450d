//! The agent's strategic plan for a single recommendation request.

use serde::{Deserialize, Serialize};

use crate::goal::{FitnessGoal, Strategy};

/// The plan the agent builds once per request and never mutates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentPlan {
    /// The primary fitness goal.
    pub primary_goal: FitnessGoal,

    /// Ordered sub-goal identifiers the retrieval process must cover.
    /// The list length is the coverage denominator used throughout scoring.
    pub sub_goals: Vec<String>,

    /// Candidate strategy sequence; the selector's cyclic fallback indexes
    /// into this list.
    pub search_strategies: Vec<Strategy>,

    /// How many iterations the planner expects to need.
    pub expected_iterations: usize,

    /// Numeric thresholds the scorer evaluates against.
    pub success_criteria: SuccessCriteria,
}

/// Success-criteria thresholds. Fixed constants for every goal; only
/// `relevance_threshold` gates the stop decision, the rest are carried
/// for the output contract.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SuccessCriteria {
    pub relevance_threshold: f32,
    pub coverage_target: f32,
    pub diversity_minimum: f32,
    pub practical_applicability: f32,
}

impl Default for SuccessCriteria {
    fn default() -> Self {
        Self {
            relevance_threshold: 0.7,
            coverage_target: 0.8,
            diversity_minimum: 3.0,
            practical_applicability: 0.9,
        }
    }
}
