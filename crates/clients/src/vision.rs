//! HTTP vision analyzer — OpenAI-compatible chat-completions vision call.
//!
//! Encodes images as base64 data URLs, sends them with a fitness-assessment
//! prompt, and returns the model's free-text observations with markdown
//! artifacts stripped. Every failure mode maps to a [`VisionError`] that
//! callers degrade to "no visual insight".

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use fitrec_core::error::VisionError;
use fitrec_core::profile::RawUserData;
use fitrec_core::vision::{ImageAttachment, VisionAnalyzer};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

/// A vision-capable chat-completions client.
pub struct HttpVisionAnalyzer {
    endpoint: String,
    model: String,
    api_key: String,
    client: reqwest::Client,
}

impl HttpVisionAnalyzer {
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, VisionError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| VisionError::Network(format!("HTTP client build failed: {e}")))?;

        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: api_key.into(),
            client,
        })
    }

    /// Build from loaded configuration. Returns `None` when vision is
    /// disabled or not configured — the loop treats that as "no analyzer".
    pub fn from_config(config: &fitrec_config::VisionConfig) -> Option<Self> {
        if !config.enabled {
            return None;
        }
        let endpoint = config.endpoint.clone()?;
        let api_key = config.api_key.clone()?;
        Self::new(
            endpoint,
            config.model.clone(),
            api_key,
            Duration::from_secs(config.timeout_secs),
        )
        .ok()
    }

    fn system_prompt(user_data: &RawUserData) -> String {
        let mut prompt = format!(
            "You are a professional fitness expert analyzing images for personalized \
             recommendations.\n\nUSER PROFILE:\nUser: {}, {} years old, {} lbs\nGoal: {}\n",
            or_unknown(&user_data.gender),
            or_unknown(&user_data.age),
            or_unknown(&user_data.weight),
            or_unknown(&user_data.goal),
        );
        if !user_data.health_conditions.trim().is_empty() {
            prompt.push_str(&format!(
                "Health/Exercise Notes: {}\n",
                user_data.health_conditions
            ));
        }
        prompt.push_str(
            "\nANALYSIS TASK:\nAnalyze the uploaded images and provide detailed observations \
             about:\n\n1. Physical Assessment: body composition, posture, visible muscle \
             development\n2. Form Analysis: technique, if exercise or movement is shown\n3. \
             Environment: available equipment, space, setting\n4. Specific Recommendations: \
             exercises or modifications that would be most beneficial\n5. Visual Cues: areas \
             needing attention based on the visual assessment\n\nFocus on actionable insights \
             based on what you can observe in the images.",
        );
        prompt
    }
}

fn or_unknown(value: &str) -> &str {
    if value.trim().is_empty() { "Unknown" } else { value }
}

#[async_trait]
impl VisionAnalyzer for HttpVisionAnalyzer {
    fn name(&self) -> &str {
        "openai_vision"
    }

    async fn analyze(
        &self,
        images: &[ImageAttachment],
        user_data: &RawUserData,
    ) -> Result<String, VisionError> {
        if images.is_empty() {
            return Ok(String::new());
        }

        let url = format!("{}/chat/completions", self.endpoint);

        let mut content = vec![serde_json::json!({
            "type": "text",
            "text": format!(
                "Please analyze these images for {} fitness recommendations.",
                or_unknown(&user_data.goal)
            ),
        })];
        for image in images {
            content.push(serde_json::json!({
                "type": "image_url",
                "image_url": {
                    "url": format!("data:image/jpeg;base64,{}", STANDARD.encode(&image.data))
                },
            }));
        }

        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": Self::system_prompt(user_data) },
                { "role": "user", "content": content },
            ],
            "max_tokens": 800,
            "temperature": 0.7,
        });

        debug!(images = images.len(), model = %self.model, "Vision request");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    VisionError::Timeout("vision request timed out".into())
                } else {
                    VisionError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(VisionError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        let parsed: ApiChatResponse = response
            .json()
            .await
            .map_err(|e| VisionError::InvalidResponse(e.to_string()))?;

        let analysis = parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .unwrap_or_default();

        let cleaned = clean_markdown(&analysis);
        info!(chars = cleaned.len(), "Vision analysis completed");
        Ok(cleaned)
    }
}

// --- Wire DTOs ---

#[derive(Debug, Deserialize)]
struct ApiChatResponse {
    #[serde(default)]
    choices: Vec<ApiChoice>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiMessage,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    #[serde(default)]
    content: String,
}

/// Strip markdown artifacts so the analysis reads as plain text downstream.
fn clean_markdown(text: &str) -> String {
    let mut out = Vec::new();
    let mut blank_run = 0usize;

    for line in text.lines() {
        let trimmed = line.trim_start();

        // Headers: drop the leading hash run.
        let without_header = trimmed.trim_start_matches('#').trim_start();

        // Bullets: normalize "-   item" to "- item".
        let line = if let Some(rest) = without_header.strip_prefix('-') {
            format!("- {}", rest.trim_start())
        } else {
            without_header.to_string()
        };

        // Inline emphasis and code ticks.
        let line = line.replace("**", "").replace('*', "").replace('`', "");

        if line.trim().is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        out.push(line);
    }

    out.join("\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markdown_headers_and_emphasis_stripped() {
        let cleaned = clean_markdown("### Physical Assessment\n**Good** posture with *minor* issues.");
        assert_eq!(cleaned, "Physical Assessment\nGood posture with minor issues.");
    }

    #[test]
    fn bullets_normalized() {
        let cleaned = clean_markdown("-    squats\n-\tlunges");
        assert_eq!(cleaned, "- squats\n- lunges");
    }

    #[test]
    fn excess_blank_lines_collapsed() {
        let cleaned = clean_markdown("a\n\n\n\nb");
        assert_eq!(cleaned, "a\n\nb");
    }

    #[test]
    fn code_ticks_removed() {
        let cleaned = clean_markdown("Use `dumbbells` for rows.");
        assert_eq!(cleaned, "Use dumbbells for rows.");
    }

    #[tokio::test]
    async fn empty_image_list_short_circuits() {
        let analyzer = HttpVisionAnalyzer::new(
            "https://api.example.com/v1",
            "gpt-4o",
            "key",
            Duration::from_secs(5),
        )
        .unwrap();
        // No network call happens for an empty image list.
        let analysis = analyzer
            .analyze(&[], &RawUserData::default())
            .await
            .unwrap();
        assert!(analysis.is_empty());
    }

    #[test]
    fn disabled_config_yields_no_analyzer() {
        let config = fitrec_config::VisionConfig {
            enabled: false,
            endpoint: Some("https://api.example.com/v1".into()),
            api_key: Some("key".into()),
            ..fitrec_config::VisionConfig::default()
        };
        assert!(HttpVisionAnalyzer::from_config(&config).is_none());
    }

    #[test]
    fn unconfigured_endpoint_yields_no_analyzer() {
        let config = fitrec_config::VisionConfig::default();
        assert!(HttpVisionAnalyzer::from_config(&config).is_none());
    }
}
