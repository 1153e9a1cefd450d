//! BaselineRecommender trait — the fallback-recommendation collaborator.
//!
//! The synthesizer always obtains a base recommendation keyed on the raw
//! user data, independent of the loop's own search results. This is the
//! non-negotiable floor of final output quality: even in total retrieval
//! failure, the user receives a complete plan.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::BaselineError;
use crate::profile::RawUserData;
use crate::vision::ImageAttachment;

/// The base natural-language recommendation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaselineRecommendation {
    /// Complete recommendation text, never empty.
    pub recommendation: String,
}

/// The baseline-recommendation collaborator. Expected to always succeed.
#[async_trait]
pub trait BaselineRecommender: Send + Sync {
    /// The recommender name (e.g. "template").
    fn name(&self) -> &str;

    /// Produce the base recommendation for this user.
    async fn baseline(
        &self,
        user_data: &RawUserData,
        images: &[ImageAttachment],
    ) -> std::result::Result<BaselineRecommendation, BaselineError>;
}
