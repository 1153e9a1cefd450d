//! Goal and strategy sum types.
//!
//! Both are closed enums dispatched with exhaustive matches, so adding a
//! category is a compile-time-checked single-site change in the planner
//! and selector.

use serde::{Deserialize, Serialize};

/// The primary fitness goal a user is pursuing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitnessGoal {
    WeightLoss,
    MuscleGain,
    Cardio,
    /// Shares the General goal decomposition but keeps its own retrieval
    /// term tables.
    Strength,
    /// Covers "general" and any unrecognized goal string.
    General,
}

impl FitnessGoal {
    /// Parse a goal string. Unknown goals fall back to [`FitnessGoal::General`].
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "weight_loss" => Self::WeightLoss,
            "muscle_gain" => Self::MuscleGain,
            "cardio" => Self::Cardio,
            "strength" => Self::Strength,
            _ => Self::General,
        }
    }

    /// The canonical snake_case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WeightLoss => "weight_loss",
            Self::MuscleGain => "muscle_gain",
            Self::Cardio => "cardio",
            Self::Strength => "strength",
            Self::General => "general",
        }
    }
}

impl std::fmt::Display for FitnessGoal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A retrieval strategy the agent can employ for one iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    BroadSearch,
    TargetedSearch,
    ProgressiveRefinement,
    MultiAngleApproach,
}

impl Strategy {
    /// The canonical snake_case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BroadSearch => "broad_search",
            Self::TargetedSearch => "targeted_search",
            Self::ProgressiveRefinement => "progressive_refinement",
            Self::MultiAngleApproach => "multi_angle_approach",
        }
    }

    /// Human-readable name for narrative output ("broad search").
    pub fn display_name(&self) -> String {
        self.as_str().replace('_', " ")
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
