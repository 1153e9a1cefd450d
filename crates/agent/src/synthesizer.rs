//! Final recommendation synthesis.
//!
//! The baseline recommender supplies the floor of the output; retrieval can
//! only enrich it. Everything the loop gathered is distilled into four
//! presentation blocks appended after the baseline text.

use crate::memory::StrategyMemory;
use fitrec_core::baseline::BaselineRecommender;
use fitrec_core::plan::AgentPlan;
use fitrec_core::profile::UserProfile;
use fitrec_core::result::SearchResult;
use fitrec_core::vision::ImageAttachment;
use fitrec_core::{Error, RawUserData};
use serde::Serialize;
use std::collections::BTreeMap;
use std::collections::HashSet;
use tracing::info;

const HIGH_QUALITY_THRESHOLD: f32 = 0.7;

/// Aggregate quality of the full result set, computed once at synthesis.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FinalQualityMetrics {
    pub overall_quality: f32,
    pub goal_coverage: f32,
    pub confidence: f32,
}

/// The synthesized recommendation with its presentation blocks.
#[derive(Debug, Clone, Serialize)]
pub struct Synthesis {
    pub text: String,
    pub strategy_analysis: String,
    pub personalized_insights: String,
    pub progressive_plan: String,
    pub visual_integration: String,
    pub quality: FinalQualityMetrics,
    pub results_used: usize,
}

/// Combine the baseline recommendation with everything the loop learned.
#[allow(clippy::too_many_arguments)]
pub async fn synthesize(
    results: &[SearchResult],
    plan: &AgentPlan,
    profile: &UserProfile,
    raw: &RawUserData,
    images: &[ImageAttachment],
    image_analysis: &str,
    memory: &StrategyMemory,
    baseline: &dyn BaselineRecommender,
) -> Result<Synthesis, Error> {
    let categories = bucket_high_quality(results);
    info!(
        high_quality_categories = categories.len(),
        results = results.len(),
        "Synthesizing recommendation"
    );

    let base = baseline.baseline(raw, images).await?;

    let strategy_analysis = analyze_strategies(memory);
    let personalized_insights = personalized_insights(profile, results, image_analysis);
    let progressive_plan = progressive_plan(results);
    let visual_integration = integrate_visual_insights(profile, image_analysis);
    let quality = final_quality_metrics(results, plan);

    let text = format!(
        "{base}\n\n\
         Agentic Intelligence Insights\n\n\
         Visual Assessment Integration:\n{visual_integration}\n\n\
         Personalized Strategy Analysis:\n{personalized_insights}\n\n\
         Progressive Plan:\n{progressive_plan}\n\n\
         Quality Assessment:\n\
         - Search Quality Score: {overall:.2}/1.0\n\
         - Coverage Achievement: {coverage:.1}%\n\
         - Recommendation Confidence: {confidence:.1}%\n",
        base = base.recommendation,
        overall = quality.overall_quality,
        coverage = quality.goal_coverage * 100.0,
        confidence = quality.confidence * 100.0,
    );

    Ok(Synthesis {
        text,
        strategy_analysis,
        personalized_insights,
        progressive_plan,
        visual_integration,
        quality,
        results_used: results.len(),
    })
}

/// High-relevance results grouped by exercise type, in stable order.
fn bucket_high_quality(results: &[SearchResult]) -> BTreeMap<&str, Vec<&SearchResult>> {
    let mut categories: BTreeMap<&str, Vec<&SearchResult>> = BTreeMap::new();
    for r in results {
        if r.relevance_score >= HIGH_QUALITY_THRESHOLD {
            categories.entry(r.exercise_type.as_str()).or_default().push(r);
        }
    }
    categories
}

fn analyze_strategies(memory: &StrategyMemory) -> String {
    match memory.best_strategy() {
        Some((strategy, _)) => format!(
            "Analysis suggests the {} approach is most effective for your profile.",
            strategy.display_name()
        ),
        None => "Initial recommendation - building strategy intelligence.".to_string(),
    }
}

fn personalized_insights(
    profile: &UserProfile,
    results: &[SearchResult],
    image_analysis: &str,
) -> String {
    use fitrec_core::goal::FitnessGoal;

    let mut insights = Vec::new();

    if !image_analysis.is_empty() {
        let preview: String = image_analysis.chars().take(100).collect();
        insights.push(format!("Visual assessment findings: {preview}..."));
    }

    match profile.primary_goal {
        FitnessGoal::WeightLoss => {
            let cardio = results
                .iter()
                .filter(|r| r.exercise_type.to_lowercase().contains("cardio"))
                .count();
            if cardio >= 3 {
                insights.push(
                    "Strong focus on cardiovascular exercises detected, excellent for weight loss."
                        .to_string(),
                );
            }
        }
        FitnessGoal::MuscleGain => {
            let strength = results
                .iter()
                .filter(|r| r.exercise_type.to_lowercase().contains("strength"))
                .count();
            if strength >= 2 {
                insights.push(
                    "Progressive strength training approach identified, optimal for muscle development."
                        .to_string(),
                );
            }
        }
        FitnessGoal::Cardio | FitnessGoal::Strength | FitnessGoal::General => {}
    }

    if profile.visual_assessment.form_issues {
        insights.push("Form improvements identified from visual analysis.".to_string());
    }
    if profile.visual_assessment.equipment_available {
        insights.push("Available equipment optimized in recommendations.".to_string());
    }

    if insights.is_empty() {
        insights.push("Balanced approach detected across multiple exercise modalities.".to_string());
    }

    insights.join(" ")
}

fn integrate_visual_insights(profile: &UserProfile, image_analysis: &str) -> String {
    let mut points = Vec::new();
    let trimmed = image_analysis.trim();

    if trimmed.len() > 50 {
        let lower = trimmed.to_lowercase();
        points.push(format!(
            "Visual analysis completed with {} characters of detailed assessment.",
            trimmed.len()
        ));
        if lower.contains("form") || lower.contains("posture") {
            points.push("Form and posture considerations identified from visual analysis.".into());
        }
        if lower.contains("equipment") {
            points.push("Available equipment optimized based on visual assessment.".into());
        }
        if lower.contains("flexibility") || lower.contains("mobility") {
            points.push("Mobility and flexibility needs addressed from visual cues.".into());
        }
        if lower.contains("fitness level") || lower.contains("condition") {
            points.push("Current fitness level factored in from visual evaluation.".into());
        }
        if lower.contains("muscle") {
            points.push("Muscle development and composition analyzed.".into());
        }
        let preview: String = trimmed.chars().take(150).collect();
        if trimmed.chars().count() > 150 {
            points.push(format!("Analysis preview: {preview}..."));
        } else {
            points.push(format!("Analysis preview: {preview}"));
        }
    } else if !trimmed.is_empty() {
        points.push("Image analysis attempted but returned limited results.".into());
    } else {
        points.push(
            "No image analysis performed, recommendations based on profile data only.".into(),
        );
    }

    if profile.visual_assessment.has_any() {
        points.push("Structured visual insights detected:".into());
        if profile.visual_assessment.form_issues {
            points.push("  - Specific form corrections integrated into exercise selection".into());
        }
        if profile.visual_assessment.equipment_available {
            points.push("  - Equipment availability optimized in workout design".into());
        }
        if profile.visual_assessment.fitness_level_visible {
            points.push("  - Fitness level assessment guides exercise intensity".into());
        }
    }

    points.join("\n")
}

fn progressive_plan(results: &[SearchResult]) -> String {
    let difficulties: HashSet<&str> = results.iter().map(|r| r.difficulty.as_str()).collect();

    if difficulties.contains("beginner") && difficulties.contains("advanced") {
        "Week 1-2: Focus on beginner exercises. Week 3-4: Progress to intermediate. \
         Month 2+: Advance to complex movements."
            .to_string()
    } else if difficulties.contains("beginner") {
        "Start with foundational movements and progress gradually over 4-6 weeks.".to_string()
    } else {
        "Continue with current intensity and focus on progressive overload.".to_string()
    }
}

fn final_quality_metrics(results: &[SearchResult], plan: &AgentPlan) -> FinalQualityMetrics {
    if results.is_empty() {
        return FinalQualityMetrics {
            overall_quality: 0.0,
            goal_coverage: 0.0,
            confidence: 0.0,
        };
    }

    let overall_quality =
        results.iter().map(|r| r.relevance_score).sum::<f32>() / results.len() as f32;
    let distinct_types: HashSet<&str> = results.iter().map(|r| r.exercise_type.as_str()).collect();
    let goal_coverage = if plan.sub_goals.is_empty() {
        1.0
    } else {
        (distinct_types.len() as f32 / plan.sub_goals.len() as f32).min(1.0)
    };
    let confidence = overall_quality * 0.6 + goal_coverage * 0.4;

    FinalQualityMetrics {
        overall_quality,
        goal_coverage,
        confidence,
    }
}
