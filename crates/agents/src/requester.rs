use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument, warn};
use voyage_core::{build_prompt, PreferenceRecord, ReplyKind};

use crate::config::{ConfigurationError, GenerationConfig, GenerationParameters};

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("generation service returned status {status}: {body}")]
    Upstream { status: u16, body: String },
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("malformed generation response: {0}")]
    MalformedResponse(String),
}

impl GenerationError {
    pub fn reply_kind(&self) -> ReplyKind {
        match self {
            Self::Upstream { .. } => ReplyKind::UpstreamError,
            Self::Transport(_) | Self::MalformedResponse(_) => ReplyKind::TransportError,
        }
    }

    /// The text shown in place of an itinerary.
    pub fn itinerary_text(&self) -> String {
        match self {
            Self::Upstream { status, body } => format!(
                "Error generating itinerary. Status code: {status}. Response: {body}"
            ),
            other => format!("Error generating itinerary: {other}"),
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    inputs: &'a str,
    parameters: &'a GenerationParameters,
}

#[derive(Debug, Deserialize)]
struct GeneratedText {
    generated_text: String,
}

/// Sends rendered preference prompts to the text-generation service.
#[derive(Debug, Clone)]
pub struct ItineraryRequester {
    http: Client,
    config: GenerationConfig,
}

impl ItineraryRequester {
    pub fn new(config: GenerationConfig) -> Result<Self, ConfigurationError> {
        let http = Client::builder()
            .build()
            .map_err(ConfigurationError::HttpClient)?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Requests an itinerary, folding every failure into the returned text.
    pub async fn request_itinerary(&self, record: &PreferenceRecord) -> String {
        match self.try_request_itinerary(record).await {
            Ok(itinerary) => itinerary,
            Err(error) => error.itinerary_text(),
        }
    }

    #[instrument(skip(self, record), fields(destination = %record.destination))]
    pub async fn try_request_itinerary(
        &self,
        record: &PreferenceRecord,
    ) -> Result<String, GenerationError> {
        let prompt = build_prompt(record);
        let payload = GenerationRequest {
            inputs: &prompt,
            parameters: &self.config.parameters,
        };

        let response = self
            .http
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_token)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if status != StatusCode::OK {
            warn!(status = status.as_u16(), "generation service rejected request");
            return Err(GenerationError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let generated = extract_generated_text(&body)?;
        debug!(chars = generated.len(), "generation service responded");
        Ok(strip_echoed_prompt(&generated, &prompt))
    }
}

fn extract_generated_text(body: &str) -> Result<String, GenerationError> {
    let mut items: Vec<GeneratedText> = serde_json::from_str(body)
        .map_err(|error| GenerationError::MalformedResponse(error.to_string()))?;
    if items.is_empty() {
        return Err(GenerationError::MalformedResponse(
            "empty result list".to_string(),
        ));
    }
    Ok(items.swap_remove(0).generated_text)
}

/// Some hosted models echo the prompt ahead of the completion.
fn strip_echoed_prompt(generated: &str, prompt: &str) -> String {
    generated
        .strip_prefix(prompt)
        .unwrap_or(generated)
        .trim()
        .to_string()
}
