use crate::core::prompt::{build_prompt, response_schema};
use crate::domain::model::RecommendationResponse;
use crate::domain::ports::{ConfigProvider, RecommendationProvider};
use crate::utils::error::{RecoError, Result};
use crate::utils::validation::{validate_recommendations, validate_theme};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate.
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// Gemini `generateContent` client. One request per call, no retries.
pub struct GeminiClient<C: ConfigProvider> {
    config: C,
    client: Client,
}

impl<C: ConfigProvider> GeminiClient<C> {
    pub fn new(config: C) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.api_endpoint().trim_end_matches('/'),
            self.config.model()
        )
    }

    /// Sends the prompt and returns the raw model text.
    async fn generate(&self, prompt: String) -> Result<String> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part { text: Some(prompt) }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: response_schema(),
            },
        };

        let url = self.generate_url();
        tracing::debug!("Calling model {} at {}", self.config.model(), url);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", self.config.api_key())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Provider response status: {}", status);

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(RecoError::ProviderError {
                status: status.as_u16(),
                body,
            });
        }

        let payload: GenerateContentResponse = response.json().await?;
        if let Some(reason) = payload
            .candidates
            .first()
            .and_then(|c| c.finish_reason.as_deref())
        {
            tracing::debug!("Finish reason: {}", reason);
        }

        payload.text().ok_or(RecoError::EmptyResponse)
    }

    /// Parses model text into songs and applies the post-parse checks.
    pub fn parse_response(&self, text: &str) -> Result<RecommendationResponse> {
        let parsed: RecommendationResponse = serde_json::from_str(text).map_err(|e| {
            tracing::error!("Failed to parse provider response: {}", e);
            RecoError::SerializationError(e)
        })?;
        validate_recommendations(&parsed, self.config.strict_validation())?;
        Ok(parsed)
    }
}

#[async_trait]
impl<C: ConfigProvider> RecommendationProvider for GeminiClient<C> {
    async fn recommend(&self, theme: &str) -> Result<RecommendationResponse> {
        validate_theme(theme)?;

        let prompt = build_prompt(theme);
        tracing::debug!("Prompt built ({} bytes) for theme {:?}", prompt.len(), theme);

        let text = self.generate(prompt).await?;
        tracing::debug!("Received {} bytes of model text", text.len());

        let response = self.parse_response(&text)?;
        tracing::info!("🎵 {} recommendations for {:?}", response.len(), theme);
        Ok(response)
    }
}
