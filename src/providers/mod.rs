/*!
 * Provider implementations for different analysis services.
 *
 * This module contains client implementations for the pluggable analysis
 * backends:
 * - Dictionary: free dictionary HTTP API (quick meanings)
 * - Ollama: local LLM server
 * - Anthropic: Anthropic API integration
 */

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;

use crate::analysis::WordAnalysis;
use crate::app_config::{AnalysisProviderKind, ProviderConfig};
use crate::errors::{AppError, ProviderError};

/// Common trait for all analysis providers.
///
/// A provider turns a word plus its surrounding text into a meaning/context
/// payload. All implementations are interchangeable behind this contract;
/// which one a session talks to is decided by configuration, never by
/// runtime type inspection.
#[async_trait]
pub trait AnalysisProvider: Send + Sync + Debug {
    /// Short identifier for logs and error messages
    fn name(&self) -> &str;

    /// Analyze a word in context
    async fn analyze(&self, word: &str, context: &str) -> Result<WordAnalysis, ProviderError>;
}

/// How thorough an analysis the provider should produce.
///
/// `Quick` is the inline meaning+usage lookup; `Deep` is the slower
/// etymology/usage analysis triggered explicitly from a saved or displayed
/// word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisDepth {
    Quick,
    Deep,
}

/// Build a provider from its configuration section
pub fn build_provider(
    config: &ProviderConfig,
    depth: AnalysisDepth,
) -> Result<Arc<dyn AnalysisProvider>, AppError> {
    match config.provider_type {
        AnalysisProviderKind::Dictionary => Ok(Arc::new(dictionary::DictionaryApi::new(
            &config.endpoint,
            config.timeout_secs,
        ))),
        AnalysisProviderKind::Ollama => Ok(Arc::new(ollama::Ollama::new(
            &config.endpoint,
            &config.model,
            depth,
            config.timeout_secs,
        ))),
        AnalysisProviderKind::Anthropic => {
            if config.api_key.is_empty() {
                return Err(AppError::Config(
                    "Anthropic provider requires an API key".to_string(),
                ));
            }
            Ok(Arc::new(anthropic::Anthropic::new(
                &config.api_key,
                &config.endpoint,
                &config.model,
                depth,
                config.timeout_secs,
            )))
        }
    }
}

/// Parse an LLM reply in the `meaning: ... context: ...` reply format.
///
/// The prompt instructs the model to answer with a `meaning:` line followed
/// by a `context:` line. When the context marker is missing the whole text
/// is treated as the meaning, with a fallback note in place of the context.
pub fn parse_meaning_context(text: &str) -> WordAnalysis {
    match text.split_once("context:") {
        Some((meaning_part, context_part)) => {
            let meaning = meaning_part
                .trim()
                .strip_prefix("meaning:")
                .unwrap_or(meaning_part.trim())
                .trim()
                .to_string();
            WordAnalysis::new(meaning, context_part.trim())
        }
        None => WordAnalysis::new(
            text.trim(),
            "Context could not be extracted due to unexpected format.",
        ),
    }
}

pub mod anthropic;
pub mod dictionary;
pub mod mock;
pub mod ollama;
