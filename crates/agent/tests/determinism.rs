//! End-to-end determinism of the full loop against the fixture backend.

use fitrec_agent::AgentLoop;
use fitrec_clients::{FixtureSearchBackend, TemplateBaseline};
use fitrec_config::AgentConfig;
use fitrec_core::RawUserData;
use std::sync::Arc;

fn agent(max_iterations: usize, reflection_mode: bool) -> AgentLoop {
    AgentLoop::new(
        Arc::new(FixtureSearchBackend::new()),
        Arc::new(TemplateBaseline::new()),
        &AgentConfig {
            max_iterations,
            reflection_mode,
        },
    )
}

fn raw(goal: &str) -> RawUserData {
    RawUserData {
        age: "29".into(),
        gender: "male".into(),
        weight: "175".into(),
        goal: goal.into(),
        health_conditions: "occasional knee pain".into(),
    }
}

#[tokio::test]
async fn identical_inputs_produce_identical_runs() {
    for goal in ["weight_loss", "muscle_gain", "cardio", "strength", "general"] {
        let first = agent(3, true).run(&raw(goal), &[]).await.unwrap();
        let second = agent(3, true).run(&raw(goal), &[]).await.unwrap();

        assert_eq!(first.plan.sub_goals, second.plan.sub_goals, "goal {goal}");
        assert_eq!(
            first.strategies_employed, second.strategies_employed,
            "goal {goal}"
        );
        assert_eq!(first.iterations_used, second.iterations_used, "goal {goal}");
        assert_eq!(first.results_used, second.results_used, "goal {goal}");
        assert_eq!(first.text, second.text, "goal {goal}");
        assert!(
            (first.confidence - second.confidence).abs() < f32::EPSILON,
            "goal {goal}"
        );
    }
}

#[tokio::test]
async fn loop_respects_iteration_bounds_for_every_goal() {
    for goal in ["weight_loss", "muscle_gain", "cardio", "strength", "general", "yoga"] {
        for max in [1, 2, 3, 5] {
            let rec = agent(max, false).run(&raw(goal), &[]).await.unwrap();
            assert!(rec.iterations_used >= 1, "goal {goal} max {max}");
            assert!(rec.iterations_used <= max, "goal {goal} max {max}");
        }
    }
}

#[tokio::test]
async fn output_always_carries_baseline_floor() {
    let rec = agent(3, false).run(&raw("muscle_gain"), &[]).await.unwrap();
    assert!(!rec.text.trim().is_empty());
    assert!(rec.text.contains("Quality Assessment:"));
}
