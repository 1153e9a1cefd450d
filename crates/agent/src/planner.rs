//! Strategic planning — goal decomposition and strategy-sequence selection.
//!
//! Decomposition is a fixed lookup by goal category: a 4-item base sub-goal
//! list, plus conditionally appended items when visual-insight flags are
//! set. There are no error conditions; unknown goal strings already fell
//! back to General at profile construction.

use fitrec_core::goal::{FitnessGoal, Strategy};
use fitrec_core::plan::{AgentPlan, SuccessCriteria};
use fitrec_core::profile::UserProfile;
use tracing::info;

/// Build the plan for one request.
///
/// `expected_iterations` is the sub-goal count capped by the configured
/// iteration maximum.
pub fn build_plan(profile: &UserProfile, max_iterations: usize) -> AgentPlan {
    let goal = profile.primary_goal;
    let visual = &profile.visual_assessment;

    let (mut sub_goals, search_strategies): (Vec<String>, Vec<Strategy>) = match goal {
        FitnessGoal::WeightLoss => {
            let mut goals = base_goals(&[
                "find_high_intensity_cardio",
                "identify_calorie_burning_exercises",
                "locate_nutrition_guidance",
                "discover_progression_strategies",
            ]);
            if visual.form_issues {
                goals.push("address_form_corrections".into());
            }
            if visual.equipment_available {
                goals.push("utilize_available_equipment".into());
            }
            (goals, vec![Strategy::BroadSearch, Strategy::TargetedSearch])
        }
        FitnessGoal::MuscleGain => {
            let mut goals = base_goals(&[
                "find_progressive_strength_exercises",
                "identify_muscle_building_protocols",
                "locate_nutrition_for_growth",
                "discover_recovery_strategies",
            ]);
            if visual.muscle_definition {
                goals.push("target_specific_muscle_groups".into());
            }
            if visual.posture_issues {
                goals.push("address_postural_corrections".into());
            }
            (
                goals,
                vec![Strategy::TargetedSearch, Strategy::ProgressiveRefinement],
            )
        }
        FitnessGoal::Cardio => {
            let mut goals = base_goals(&[
                "find_endurance_training_methods",
                "identify_cardio_progressions",
                "locate_heart_rate_guidance",
                "discover_training_variations",
            ]);
            if visual.fitness_level_visible {
                goals.push("adjust_intensity_for_level".into());
            }
            if visual.equipment_available {
                goals.push("optimize_available_equipment".into());
            }
            (
                goals,
                vec![Strategy::BroadSearch, Strategy::MultiAngleApproach],
            )
        }
        FitnessGoal::Strength | FitnessGoal::General => {
            let mut goals = base_goals(&[
                "find_foundational_exercises",
                "identify_balanced_routines",
                "locate_beginner_progressions",
                "discover_safety_guidelines",
            ]);
            if visual.form_issues {
                goals.push("improve_exercise_form".into());
            }
            if visual.mobility_issues {
                goals.push("address_mobility_limitations".into());
            }
            if visual.equipment_available {
                goals.push("adapt_for_equipment_constraints".into());
            }
            (
                goals,
                vec![Strategy::BroadSearch, Strategy::ProgressiveRefinement],
            )
        }
    };

    sub_goals.shrink_to_fit();
    let expected_iterations = sub_goals.len().min(max_iterations);

    info!(
        goal = %goal,
        sub_goals = sub_goals.len(),
        expected_iterations,
        "Plan created"
    );

    AgentPlan {
        primary_goal: goal,
        sub_goals,
        search_strategies,
        expected_iterations,
        success_criteria: SuccessCriteria::default(),
    }
}

fn base_goals(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| (*n).to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitrec_core::profile::{RawUserData, UserProfile};

    fn profile_for(goal: &str, analysis: &str) -> UserProfile {
        let raw = RawUserData {
            goal: goal.into(),
            ..RawUserData::default()
        };
        UserProfile::from_raw(&raw, analysis).unwrap()
    }

    #[test]
    fn weight_loss_plan_shape() {
        let plan = build_plan(&profile_for("weight_loss", ""), 3);
        assert_eq!(plan.primary_goal, FitnessGoal::WeightLoss);
        assert_eq!(plan.sub_goals.len(), 4);
        assert_eq!(plan.sub_goals[0], "find_high_intensity_cardio");
        assert_eq!(
            plan.search_strategies,
            vec![Strategy::BroadSearch, Strategy::TargetedSearch]
        );
        assert_eq!(plan.expected_iterations, 3);
    }

    #[test]
    fn muscle_gain_uses_targeted_then_progressive() {
        let plan = build_plan(&profile_for("muscle_gain", ""), 3);
        assert_eq!(
            plan.search_strategies,
            vec![Strategy::TargetedSearch, Strategy::ProgressiveRefinement]
        );
    }

    #[test]
    fn unknown_goal_gets_general_decomposition() {
        let plan = build_plan(&profile_for("crossfit", ""), 3);
        assert_eq!(plan.primary_goal, FitnessGoal::General);
        assert_eq!(plan.sub_goals[0], "find_foundational_exercises");
    }

    #[test]
    fn form_issues_append_correction_goal() {
        let plan = build_plan(
            &profile_for("weight_loss", "Posture and form need attention."),
            3,
        );
        assert!(plan.sub_goals.iter().any(|g| g == "address_form_corrections"));
        assert_eq!(plan.sub_goals.len(), 5);
    }

    #[test]
    fn equipment_flag_appends_equipment_goal() {
        let plan = build_plan(
            &profile_for("cardio", "A treadmill and dumbbells are visible in a gym."),
            3,
        );
        assert!(plan
            .sub_goals
            .iter()
            .any(|g| g == "optimize_available_equipment"));
    }

    #[test]
    fn expected_iterations_capped_by_max() {
        let plan = build_plan(&profile_for("general", ""), 2);
        assert_eq!(plan.expected_iterations, 2);

        let plan = build_plan(&profile_for("general", ""), 10);
        assert_eq!(plan.expected_iterations, 4);
    }

    #[test]
    fn criteria_are_fixed_constants() {
        let plan = build_plan(&profile_for("weight_loss", ""), 3);
        assert!((plan.success_criteria.relevance_threshold - 0.7).abs() < f32::EPSILON);
        assert!((plan.success_criteria.coverage_target - 0.8).abs() < f32::EPSILON);
    }
}
