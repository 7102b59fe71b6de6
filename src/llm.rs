//! Model gateway for SQL generation over a local Ollama instance.
//!
//! Sends a prompt to the `/api/generate` endpoint in non-streaming mode with
//! a low sampling temperature and returns the model's textual response in
//! full. The gateway knows nothing about SQL; sanitization and validation
//! happen downstream.
//!
//! # Example
//!
//! ```no_run
//! use nl2sql::{config::LlmConfig, llm::ModelGateway};
//!
//! let gateway = ModelGateway::new(&LlmConfig {
//!     model:       Some("llama3.2".into()),
//!     ollama_url:  Some("http://localhost:11434".into()),
//!     temperature: Some(0.3)
//! });
//! ```

use serde::{Deserialize, Serialize};

use crate::{
    config::LlmConfig,
    error::{AppResult, generation_error, http_error}
};

const DEFAULT_MODEL: &str = "llama3.2";
const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
const DEFAULT_TEMPERATURE: f64 = 0.3;

/// HTTP client for the Ollama text-generation API.
pub struct ModelGateway {
    client:      reqwest::Client,
    base_url:    String,
    model:       String,
    temperature: f64
}

#[derive(Serialize)]
struct OllamaRequest {
    model:   String,
    prompt:  String,
    stream:  bool,
    options: OllamaOptions
}

#[derive(Serialize)]
struct OllamaOptions {
    temperature: f64
}

#[derive(Deserialize)]
struct OllamaResponse {
    response: String
}

impl ModelGateway {
    /// Create a gateway from LLM configuration, applying defaults for any
    /// unset field
    pub fn new(config: &LlmConfig) -> Self {
        Self {
            client:      reqwest::Client::new(),
            base_url:    config
                .ollama_url
                .clone()
                .unwrap_or_else(|| DEFAULT_OLLAMA_URL.to_string()),
            model:       config
                .model
                .clone()
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature: config.temperature.unwrap_or(DEFAULT_TEMPERATURE)
        }
    }

    /// Name of the model this gateway sends prompts to
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generate text for a prompt.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or a non-success response
    pub async fn generate(&self, prompt: &str) -> AppResult<String> {
        let request = OllamaRequest {
            model:   self.model.clone(),
            prompt:  prompt.to_string(),
            stream:  false,
            options: OllamaOptions {
                temperature: self.temperature
            }
        };
        let url = format!("{}/api/generate", self.base_url.trim_end_matches('/'));
        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(http_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(generation_error(format!(
                "Ollama API error {}: {}",
                status, text
            )));
        }

        let result: OllamaResponse = response.json().await.map_err(http_error)?;
        Ok(result.response)
    }
}
