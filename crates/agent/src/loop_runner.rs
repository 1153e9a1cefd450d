//! The agent loop controller.
//!
//! Owns one request end to end: vision analysis, planning, the bounded
//! iterate-and-score loop, and final synthesis. Each run gets a fresh
//! [`StrategyMemory`]; nothing leaks across requests.

use crate::memory::StrategyMemory;
use crate::planner::build_plan;
use crate::reflection::Reflection;
use crate::scorer::assess_quality;
use crate::selector::select_strategy;
use crate::strategies::execute_strategy;
use crate::synthesizer::{FinalQualityMetrics, synthesize};
use fitrec_config::AgentConfig;
use fitrec_core::baseline::BaselineRecommender;
use fitrec_core::goal::Strategy;
use fitrec_core::plan::AgentPlan;
use fitrec_core::profile::{RawUserData, UserProfile};
use fitrec_core::quality::QualityAssessment;
use fitrec_core::result::SearchResult;
use fitrec_core::search::SearchBackend;
use fitrec_core::vision::{ImageAttachment, VisionAnalyzer};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

const EXCELLENCE_THRESHOLD: f32 = 0.9;

/// Final structured output of one recommendation request.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    /// Combined baseline plus insight text.
    pub text: String,
    pub plan: AgentPlan,
    /// Iterations actually executed, always in `1..=max_iterations`.
    pub iterations_used: usize,
    /// Strategy chosen per iteration, in order.
    pub strategies_employed: Vec<Strategy>,
    pub results_used: usize,
    pub confidence: f32,
    pub quality: FinalQualityMetrics,
    pub strategy_analysis: String,
    pub personalized_insights: String,
    pub progressive_plan: String,
    pub visual_integration: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reflection: Option<Reflection>,
}

/// The retrieval-refinement loop, wired to its collaborators.
pub struct AgentLoop {
    search: Arc<dyn SearchBackend>,
    baseline: Arc<dyn BaselineRecommender>,
    vision: Option<Arc<dyn VisionAnalyzer>>,
    max_iterations: usize,
    reflection_mode: bool,
}

impl AgentLoop {
    pub fn new(
        search: Arc<dyn SearchBackend>,
        baseline: Arc<dyn BaselineRecommender>,
        config: &AgentConfig,
    ) -> Self {
        Self {
            search,
            baseline,
            vision: None,
            // The loop always runs at least once.
            max_iterations: config.max_iterations.max(1),
            reflection_mode: config.reflection_mode,
        }
    }

    /// Attach a vision analyzer. Without one, image input degrades to
    /// "no visual insight".
    pub fn with_vision(mut self, vision: Arc<dyn VisionAnalyzer>) -> Self {
        self.vision = Some(vision);
        self
    }

    /// Run one full recommendation request.
    pub async fn run(
        &self,
        raw: &RawUserData,
        images: &[ImageAttachment],
    ) -> fitrec_core::Result<Recommendation> {
        let image_analysis = self.analyze_images(images, raw).await;

        let profile = UserProfile::from_raw(raw, &image_analysis)?;
        let plan = build_plan(&profile, self.max_iterations);

        let mut results: Vec<SearchResult> = Vec::new();
        let mut memory = StrategyMemory::new();
        let mut strategies_employed = Vec::new();
        let mut iterations_used = 0;

        for iteration in 0..self.max_iterations {
            iterations_used = iteration + 1;

            let strategy = select_strategy(&plan, &results, iteration);
            strategies_employed.push(strategy);
            info!(iteration, strategy = %strategy, "Running iteration");

            let batch =
                execute_strategy(strategy, &plan, &profile, iteration, self.search.as_ref())
                    .await;
            let quality = assess_quality(&batch, &plan, &results);
            let batch_len = batch.len();
            results.extend(batch);
            memory.record(strategy, quality.overall_score, batch_len);

            info!(
                iteration,
                overall = quality.overall_score,
                new_results = batch_len,
                total_results = results.len(),
                "Iteration scored"
            );

            if self.should_stop(&quality, iteration) {
                break;
            }
        }

        let synthesis = synthesize(
            &results,
            &plan,
            &profile,
            raw,
            images,
            &image_analysis,
            &memory,
            self.baseline.as_ref(),
        )
        .await?;

        let reflection = self
            .reflection_mode
            .then(|| Reflection::from_run(&plan, &results));

        info!(
            iterations_used,
            results = results.len(),
            confidence = synthesis.quality.confidence,
            "Recommendation complete"
        );

        Ok(Recommendation {
            text: synthesis.text,
            plan,
            iterations_used,
            strategies_employed,
            results_used: synthesis.results_used,
            confidence: synthesis.quality.confidence,
            quality: synthesis.quality,
            strategy_analysis: synthesis.strategy_analysis,
            personalized_insights: synthesis.personalized_insights,
            progressive_plan: synthesis.progressive_plan,
            visual_integration: synthesis.visual_integration,
            reflection,
        })
    }

    /// The loop stops on met criteria, the hard iteration cap, or an
    /// excellent score. Nothing else exits.
    fn should_stop(&self, quality: &QualityAssessment, iteration: usize) -> bool {
        if quality.meets_criteria {
            info!(iteration, "Quality criteria met");
            return true;
        }
        if iteration >= self.max_iterations - 1 {
            return true;
        }
        if quality.overall_score >= EXCELLENCE_THRESHOLD {
            info!(iteration, "Excellent quality score");
            return true;
        }
        false
    }

    /// Analyze images when an analyzer is wired; any failure or absence
    /// degrades to empty analysis text.
    async fn analyze_images(&self, images: &[ImageAttachment], raw: &RawUserData) -> String {
        if images.is_empty() {
            return String::new();
        }
        let Some(vision) = &self.vision else {
            info!("No vision analyzer configured, skipping image analysis");
            return String::new();
        };
        match vision.analyze(images, raw).await {
            Ok(analysis) => {
                info!(chars = analysis.len(), "Image analysis complete");
                analysis
            }
            Err(e) => {
                warn!(error = %e, "Image analysis failed, continuing without visual insight");
                String::new()
            }
        }
    }
}
