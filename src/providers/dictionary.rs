use std::time::Duration;

use async_trait::async_trait;
use log::error;
use reqwest::Client;
use serde::Deserialize;

use crate::analysis::WordAnalysis;
use crate::errors::ProviderError;

use super::AnalysisProvider;

/// Client for a dictionaryapi.dev-compatible dictionary service.
///
/// The quickest of the analysis backends: no model, no API key, just a GET
/// per word. It ignores the surrounding text and answers from the entry's
/// first definition, using the dictionary's own example sentence as the
/// context note when one exists.
#[derive(Debug)]
pub struct DictionaryApi {
    /// HTTP client for API requests
    client: Client,
    /// Base URL of the entries endpoint
    endpoint: String,
}

/// One dictionary entry from the API response
#[derive(Debug, Deserialize)]
struct DictionaryEntry {
    meanings: Vec<DictionaryMeaning>,
}

#[derive(Debug, Deserialize)]
struct DictionaryMeaning {
    #[serde(rename = "partOfSpeech", default)]
    part_of_speech: String,
    definitions: Vec<DictionaryDefinition>,
}

#[derive(Debug, Deserialize)]
struct DictionaryDefinition {
    definition: String,
    #[serde(default)]
    example: Option<String>,
}

impl DictionaryApi {
    /// Create a new dictionary client
    pub fn new(endpoint: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            endpoint: endpoint.into(),
        }
    }

    fn entry_url(&self, word: &str) -> String {
        format!("{}/{}", self.endpoint.trim_end_matches('/'), word)
    }
}

#[async_trait]
impl AnalysisProvider for DictionaryApi {
    fn name(&self) -> &str {
        "dictionary"
    }

    async fn analyze(&self, word: &str, _context: &str) -> Result<WordAnalysis, ProviderError> {
        let url = self.entry_url(word);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ProviderError::ConnectionError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Dictionary API error ({}): {}", status, message);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        let entries = response
            .json::<Vec<DictionaryEntry>>()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        let meaning = entries
            .iter()
            .flat_map(|e| e.meanings.iter())
            .find(|m| !m.definitions.is_empty())
            .ok_or(ProviderError::EmptyResponse)?;

        let definition = &meaning.definitions[0];
        if definition.definition.trim().is_empty() {
            return Err(ProviderError::EmptyResponse);
        }

        let gloss = if meaning.part_of_speech.is_empty() {
            definition.definition.clone()
        } else {
            format!("({}) {}", meaning.part_of_speech, definition.definition)
        };

        let context_note = definition
            .example
            .clone()
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| "No usage example available for this entry.".to_string());

        Ok(WordAnalysis::new(gloss, context_note))
    }
}
