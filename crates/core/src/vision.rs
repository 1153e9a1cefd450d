//! VisionAnalyzer trait — the abstraction over the vision-language collaborator.
//!
//! Takes uploaded images plus the raw user data and returns free-text
//! analysis. The analyzer may be absent entirely; callers map both
//! "no analyzer" and any error to empty analysis text, which the rest of
//! the pipeline treats as "no visual insight".

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::VisionError;
use crate::profile::RawUserData;

/// An uploaded image, already read into memory by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageAttachment {
    /// Original filename, used only for logging.
    pub filename: String,

    /// Raw image bytes, serialized as base64.
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
}

/// Serialize image bytes as base64 strings rather than JSON byte arrays.
mod base64_bytes {
    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(data))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let text = String::deserialize(deserializer)?;
        STANDARD.decode(&text).map_err(serde::de::Error::custom)
    }
}

/// The vision-analysis collaborator.
#[async_trait]
pub trait VisionAnalyzer: Send + Sync {
    /// The analyzer name (e.g. "openai_vision").
    fn name(&self) -> &str;

    /// Analyze the images in the context of the user's data and return
    /// free-text observations.
    async fn analyze(
        &self,
        images: &[ImageAttachment],
        user_data: &RawUserData,
    ) -> std::result::Result<String, VisionError>;
}
