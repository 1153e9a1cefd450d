//! End-to-end integration tests for the fitrec recommendation pipeline.
//!
//! These exercise the full wiring the CLI performs: fixture search backend,
//! template baseline, the agentic loop, and synthesis, from raw user data
//! to final recommendation text.

use fitrec_agent::AgentLoop;
use fitrec_clients::{FixtureSearchBackend, TemplateBaseline};
use fitrec_config::AppConfig;
use fitrec_core::goal::Strategy;
use fitrec_core::vision::ImageAttachment;
use fitrec_core::RawUserData;
use std::sync::Arc;

fn default_agent() -> AgentLoop {
    let config = AppConfig::default();
    AgentLoop::new(
        Arc::new(FixtureSearchBackend::new()),
        Arc::new(TemplateBaseline::new()),
        &config.agent,
    )
}

fn user(goal: &str) -> RawUserData {
    RawUserData {
        age: "42".into(),
        gender: "male".into(),
        weight: "190".into(),
        goal: goal.into(),
        health_conditions: "lower back stiffness".into(),
    }
}

#[tokio::test]
async fn weight_loss_request_produces_complete_recommendation() {
    let rec = default_agent().run(&user("weight_loss"), &[]).await.unwrap();

    assert!(rec.iterations_used >= 1);
    assert!(rec.iterations_used <= 3);
    assert_eq!(rec.strategies_employed[0], Strategy::BroadSearch);

    // Baseline text plus the four insight blocks.
    assert!(rec.text.contains("Weight Loss"));
    assert!(rec.text.contains("Visual Assessment Integration:"));
    assert!(rec.text.contains("Personalized Strategy Analysis:"));
    assert!(rec.text.contains("Progressive Plan:"));
    assert!(rec.text.contains("Quality Assessment:"));

    assert!(rec.results_used > 0);
    assert!(rec.confidence > 0.0);
    assert!(rec.confidence <= 1.0);
}

#[tokio::test]
async fn every_goal_yields_nonempty_output() {
    for goal in ["weight_loss", "muscle_gain", "cardio", "strength", "general", "unknown"] {
        let rec = default_agent().run(&user(goal), &[]).await.unwrap();
        assert!(!rec.text.trim().is_empty(), "goal {goal}");
        assert!(!rec.plan.sub_goals.is_empty(), "goal {goal}");
    }
}

#[tokio::test]
async fn images_without_vision_analyzer_do_not_fail() {
    let images = vec![ImageAttachment {
        filename: "progress.jpg".into(),
        data: vec![0xff, 0xd8, 0xff, 0xe0],
    }];

    let rec = default_agent().run(&user("muscle_gain"), &images).await.unwrap();

    assert!(rec
        .visual_integration
        .contains("No image analysis performed"));
}

#[tokio::test]
async fn default_config_drives_reflection() {
    // Reflection mode defaults to on.
    let rec = default_agent().run(&user("cardio"), &[]).await.unwrap();
    assert!(rec.reflection.is_some());
}

#[tokio::test]
async fn serialized_output_carries_the_contract_fields() {
    let rec = default_agent().run(&user("general"), &[]).await.unwrap();
    let json = serde_json::to_value(&rec).unwrap();

    for field in [
        "text",
        "plan",
        "iterations_used",
        "strategies_employed",
        "results_used",
        "confidence",
    ] {
        assert!(json.get(field).is_some(), "missing {field}");
    }
    assert_eq!(
        json["plan"]["primary_goal"],
        serde_json::Value::String("general".into())
    );
}
