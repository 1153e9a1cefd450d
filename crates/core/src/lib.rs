//! # fitrec Core
//!
//! Domain types, collaborator traits, and error definitions for the fitrec
//! agentic recommendation engine. This crate has **zero framework
//! dependencies** — it defines the domain model that all other crates
//! implement against.
//!
//! ## Design Philosophy
//!
//! Every external collaborator (document search, vision analysis, baseline
//! recommendation) is defined as a trait here. Implementations live in
//! `fitrec-clients`. This enables:
//! - Swapping implementations via configuration
//! - Easy testing with mock/stub collaborators
//! - Clean dependency graph (all crates depend inward on core)

pub mod baseline;
pub mod error;
pub mod goal;
pub mod plan;
pub mod profile;
pub mod quality;
pub mod result;
pub mod search;
pub mod vision;

// Re-export key types at crate root for ergonomics
pub use baseline::{BaselineRecommendation, BaselineRecommender};
pub use error::{Error, Result};
pub use goal::{FitnessGoal, Strategy};
pub use plan::{AgentPlan, SuccessCriteria};
pub use profile::{
    Demographics, FitnessLevel, HealthConstraint, RawUserData, UserProfile, VisualInsights,
};
pub use quality::QualityAssessment;
pub use result::SearchResult;
pub use search::{SearchBackend, SearchHit};
pub use vision::{ImageAttachment, VisionAnalyzer};
