use std::time::Duration;

use async_trait::async_trait;
use log::error;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::analysis::WordAnalysis;
use crate::errors::ProviderError;

use super::{parse_meaning_context, AnalysisDepth, AnalysisProvider};

/// Ollama client for word analysis against a local LLM server.
///
/// One instance serves either the quick-definition flow or the deep
/// etymology/usage flow, selected at construction; the two differ only in
/// the prompt sent to the model.
#[derive(Debug)]
pub struct Ollama {
    /// Base URL of the Ollama API
    base_url: String,
    /// HTTP client for making requests
    client: Client,
    /// Model name to generate with
    model: String,
    /// Analysis depth this instance is configured for
    depth: AnalysisDepth,
}

/// Generate request for the Ollama API
#[derive(Debug, Serialize)]
struct GenerationRequest {
    /// Model name to use for generation
    model: String,
    /// Prompt to generate from
    prompt: String,
    /// Whether to stream the response
    stream: bool,
}

/// Generation response from the Ollama API
#[derive(Debug, Deserialize)]
struct GenerationResponse {
    /// Generated text
    response: String,
}

impl Ollama {
    /// Create a new Ollama client
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        depth: AnalysisDepth,
        timeout_secs: u64,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            model: model.into(),
            depth,
        }
    }

    fn generate_url(&self) -> String {
        format!("{}/api/generate", self.base_url.trim_end_matches('/'))
    }

    fn build_prompt(&self, word: &str, context: &str) -> String {
        match self.depth {
            AnalysisDepth::Quick => format!(
                "You are an expert dictionary and context analyzer.\n\
                 Word: {word}\n\
                 Text: {context}\n\n\
                 Return strictly in following format:\n\
                 meaning: meaning of the word\n\
                 context: how the word is used (keep it short, one liner)"
            ),
            AnalysisDepth::Deep => format!(
                "You are an expert lexicographer.\n\
                 Word: {word}\n\
                 Text: {context}\n\n\
                 Give a deeper analysis of the word: its etymology, register \
                 and typical usage in this kind of text.\n\
                 Return strictly in following format:\n\
                 meaning: concise meaning of the word\n\
                 context: etymology and usage notes"
            ),
        }
    }
}

#[async_trait]
impl AnalysisProvider for Ollama {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn analyze(&self, word: &str, context: &str) -> Result<WordAnalysis, ProviderError> {
        let request = GenerationRequest {
            model: self.model.clone(),
            prompt: self.build_prompt(word, context),
            stream: false,
        };

        let response = self
            .client
            .post(self.generate_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::ConnectionError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Ollama API error ({}): {}", status, message);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        let generation = response
            .json::<GenerationResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        if generation.response.trim().is_empty() {
            return Err(ProviderError::EmptyResponse);
        }

        Ok(parse_meaning_context(&generation.response))
    }
}
