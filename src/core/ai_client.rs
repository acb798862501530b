// src/core/ai_client.rs
//! Generative content client - one request/response per call, no retries

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info, trace, warn};

use crate::core::prompts;
use crate::refine::{clean_generated_text, strip_json_fences, FieldProposal, ProjectProposal, RefinementProposal};
use crate::types::response::{ApiErrorEnvelope, GenerateContentRequest, GenerateContentResponse};
use crate::types::{GeneratedPortfolio, UserData};

pub const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-pro";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub base_url: String,
    pub model: String,
    pub timeout_seconds: u64,
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            api_key: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum AiError {
    #[error("Generative API key is not configured (set GEMINI_API_KEY)")]
    MissingApiKey,

    #[error("Rate limited by the generative API: {message}")]
    RateLimited { message: String },

    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse AI response: {0}")]
    Parse(String),
}

impl AiError {
    /// One of `rate_limit`, `api`, `parse`
    pub fn category(&self) -> &'static str {
        match self {
            Self::RateLimited { .. } => "rate_limit",
            Self::MissingApiKey | Self::Transport(_) | Self::Api { .. } => "api",
            Self::Parse(_) => "parse",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingApiKey => "AI_NOT_CONFIGURED",
            Self::RateLimited { .. } => "AI_RATE_LIMITED",
            Self::Transport(_) | Self::Api { .. } => "AI_REQUEST_FAILED",
            Self::Parse(_) => "AI_INVALID_RESPONSE",
        }
    }

    /// Message suitable for showing to the person editing the portfolio
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::MissingApiKey => "AI content features are not configured.",
            Self::RateLimited { .. } => {
                "The AI service is receiving too many requests. Please wait a moment and try again."
            }
            Self::Transport(_) | Self::Api { .. } => {
                "Failed to reach the AI service. Please try again."
            }
            Self::Parse(_) => "The AI service returned an unexpected response. Please try again.",
        }
    }
}

#[derive(Clone)]
pub struct ContentClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl ContentClient {
    pub fn new(config: &AiConfig) -> Result<Self, AiError> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(AiError::MissingApiKey)?
            .to_string();

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.max(1)))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    /// Single generateContent call returning the first candidate's text
    pub async fn generate_text(&self, prompt: &str) -> Result<String, AiError> {
        let url = self.endpoint();
        trace!("Calling generative API: {}", url);

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&GenerateContentRequest::from_prompt(prompt))
            .send()
            .await?;

        let status = response.status();
        trace!("Response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let envelope = serde_json::from_str::<ApiErrorEnvelope>(&body).ok();
            let is_quota = envelope
                .as_ref()
                .and_then(|e| e.error.status.as_deref())
                .map(|s| s == "RESOURCE_EXHAUSTED")
                .unwrap_or(false);
            let message = envelope
                .map(|e| e.error.message)
                .filter(|m| !m.is_empty())
                .unwrap_or(body);

            if status.as_u16() == 429 || is_quota {
                warn!("Generative API rate limited: {}", message);
                return Err(AiError::RateLimited { message });
            }

            error!("Generative API error response ({}): {}", status, message);
            return Err(AiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let parsed: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|e| AiError::Parse(format!("unexpected response shape: {}", e)))?;

        let text = parsed
            .text()
            .ok_or_else(|| AiError::Parse("response contained no text".to_string()))?;
        debug!("Generative API returned {} characters", text.len());
        Ok(text)
    }

    /// Calls the API and deserializes the text reply as JSON
    pub async fn generate_json<T: DeserializeOwned>(&self, prompt: &str) -> Result<T, AiError> {
        let text = self.generate_text(prompt).await?;
        let json = strip_json_fences(&text);
        serde_json::from_str(json).map_err(|e| {
            debug!("Raw AI response: {}", text);
            AiError::Parse(e.to_string())
        })
    }

    /// Full-profile generation from the form contents
    pub async fn generate_portfolio(&self, data: &UserData) -> Result<GeneratedPortfolio, AiError> {
        info!("Starting AI content generation for {}", data.display_name());
        self.generate_json(&prompts::generate_portfolio_prompt(data))
            .await
    }

    /// Proposes a new bio and new project descriptions; blank fields are skipped
    pub async fn propose_refinement(&self, data: &UserData) -> Result<RefinementProposal, AiError> {
        info!(
            "Refining content for {} ({} projects)",
            data.display_name(),
            data.projects.len()
        );

        let bio = if data.bio.trim().is_empty() {
            None
        } else {
            let raw = self.generate_text(&prompts::refine_bio_prompt(&data.bio)).await?;
            let proposed = clean_generated_text(&raw);
            if proposed.is_empty() {
                return Err(AiError::Parse("refined bio was empty".to_string()));
            }
            Some(FieldProposal {
                original: data.bio.clone(),
                proposed,
            })
        };

        let mut projects = Vec::new();
        for (index, project) in data.projects.iter().enumerate() {
            if project.description.trim().is_empty() {
                continue;
            }
            let raw = self
                .generate_text(&prompts::refine_project_prompt(
                    &project.title,
                    &project.description,
                ))
                .await?;
            let proposed = clean_generated_text(&raw);
            if proposed.is_empty() {
                return Err(AiError::Parse(format!(
                    "refined description for '{}' was empty",
                    project.title
                )));
            }
            projects.push(ProjectProposal {
                index,
                title: project.title.clone(),
                original: project.description.clone(),
                proposed,
            });
        }

        Ok(RefinementProposal { bio, projects })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_api_key() {
        let config = AiConfig {
            api_key: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            ContentClient::new(&config).err(),
            Some(AiError::MissingApiKey)
        ));
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let config = AiConfig {
            base_url: "http://localhost:9000/".to_string(),
            api_key: Some("k".to_string()),
            ..Default::default()
        };
        let client = ContentClient::new(&config).unwrap();
        assert_eq!(
            client.endpoint(),
            "http://localhost:9000/v1beta/models/gemini-pro:generateContent"
        );
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(
            AiError::RateLimited {
                message: String::new()
            }
            .category(),
            "rate_limit"
        );
        assert_eq!(
            AiError::Api {
                status: 500,
                message: String::new()
            }
            .category(),
            "api"
        );
        assert_eq!(AiError::Parse(String::new()).category(), "parse");
        assert_eq!(AiError::MissingApiKey.code(), "AI_NOT_CONFIGURED");
    }
}
