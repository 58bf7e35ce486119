use std::env;

use serde::Serialize;
use thiserror::Error;

pub const CREDENTIAL_ENV: &str = "HUGGINGFACE_API_TOKEN";
pub const ENDPOINT_ENV: &str = "VOYAGE_GENERATION_URL";
pub const DEFAULT_GENERATION_URL: &str =
    "https://api-inference.huggingface.co/models/tiiuae/falcon-7b-instruct";

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("HUGGINGFACE_API_TOKEN is not set; the text-generation service requires a token")]
    MissingCredential,
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

/// Sampling settings sent with every generation request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GenerationParameters {
    pub max_new_tokens: u32,
    pub temperature: f64,
    pub top_p: f64,
    pub top_k: u32,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            max_new_tokens: 1500,
            temperature: 0.7,
            top_p: 0.9,
            top_k: 50,
        }
    }
}

#[derive(Clone)]
pub struct GenerationConfig {
    pub endpoint: String,
    pub api_token: String,
    pub parameters: GenerationParameters,
}

impl std::fmt::Debug for GenerationConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationConfig")
            .field("endpoint", &self.endpoint)
            .field("api_token", &"<redacted>")
            .field("parameters", &self.parameters)
            .finish()
    }
}

impl GenerationConfig {
    pub fn new(endpoint: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_token: api_token.into(),
            parameters: GenerationParameters::default(),
        }
    }

    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_token = lookup(CREDENTIAL_ENV)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .ok_or(ConfigurationError::MissingCredential)?;
        let endpoint = lookup(ENDPOINT_ENV)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_GENERATION_URL.to_string());

        Ok(Self::new(endpoint, api_token))
    }
}
