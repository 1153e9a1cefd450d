//! `fitrec recommend` — Run the agentic loop for one user profile.

use clap::Args;
use fitrec_agent::AgentLoop;
use fitrec_clients::{FixtureSearchBackend, HttpSearchBackend, HttpVisionAnalyzer, TemplateBaseline};
use fitrec_config::AppConfig;
use fitrec_core::baseline::BaselineRecommender;
use fitrec_core::search::SearchBackend;
use fitrec_core::vision::ImageAttachment;
use fitrec_core::RawUserData;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Args)]
pub struct RecommendArgs {
    /// Age in years
    #[arg(long, default_value = "")]
    age: String,

    /// Self-reported gender
    #[arg(long, default_value = "")]
    gender: String,

    /// Weight in pounds
    #[arg(long, default_value = "")]
    weight: String,

    /// Fitness goal: weight_loss, muscle_gain, cardio, strength, or general
    #[arg(long, default_value = "general")]
    goal: String,

    /// Free-text health notes (e.g. "knee pain")
    #[arg(long, default_value = "")]
    health: String,

    /// Image file(s) for visual assessment; repeatable
    #[arg(long = "image")]
    images: Vec<PathBuf>,

    /// Print the full structured result as JSON instead of text
    #[arg(long)]
    json: bool,
}

pub async fn run(args: RecommendArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    let search: Arc<dyn SearchBackend> = match config.search.backend.as_str() {
        "http" => Arc::new(
            HttpSearchBackend::from_config(&config.search)
                .map_err(|e| format!("Search backend setup failed: {e}"))?,
        ),
        _ => Arc::new(FixtureSearchBackend::new()),
    };
    info!(backend = search.name(), "Search backend ready");

    let baseline: Arc<dyn BaselineRecommender> = Arc::new(TemplateBaseline::new());

    let mut agent = AgentLoop::new(search, baseline, &config.agent);
    if let Some(vision) = HttpVisionAnalyzer::from_config(&config.vision) {
        agent = agent.with_vision(Arc::new(vision));
    } else if !args.images.is_empty() {
        eprintln!("  Note: vision is not configured; images will be ignored.");
    }

    let raw = RawUserData {
        age: args.age,
        gender: args.gender,
        weight: args.weight,
        goal: args.goal,
        health_conditions: args.health,
    };

    let images = load_images(&args.images)?;

    let recommendation = agent.run(&raw, &images).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&recommendation)?);
    } else {
        println!("{}", recommendation.text);
        println!(
            "  [{} iteration(s), strategies: {}, confidence {:.0}%]",
            recommendation.iterations_used,
            recommendation
                .strategies_employed
                .iter()
                .map(|s| s.display_name())
                .collect::<Vec<_>>()
                .join(", "),
            recommendation.confidence * 100.0
        );
    }

    Ok(())
}

fn load_images(paths: &[PathBuf]) -> Result<Vec<ImageAttachment>, Box<dyn std::error::Error>> {
    let mut images = Vec::with_capacity(paths.len());
    for path in paths {
        let data = std::fs::read(path)
            .map_err(|e| format!("Failed to read image {}: {e}", path.display()))?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        images.push(ImageAttachment { filename, data });
    }
    Ok(images)
}
