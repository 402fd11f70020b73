/*!
 * Mock provider implementations for testing.
 *
 * This module provides mock providers that simulate different behaviors:
 * - `MockProvider::working()` - Always succeeds with a canned analysis
 * - `MockProvider::rejecting()` - Always fails with an API error
 * - `MockProvider::unreachable()` - Always fails with a connection error
 * - `MockProvider::empty()` - Succeeds at the transport level but has nothing to say
 * - `MockProvider::slow(ms)` - Succeeds after a delay (for supersede/stale testing)
 */

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::analysis::WordAnalysis;
use crate::errors::ProviderError;

use super::AnalysisProvider;

/// Behavior mode for the mock provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with a canned analysis
    Working,
    /// Always fails with a provider-supplied rejection
    Rejecting,
    /// Always fails at the transport level
    Unreachable,
    /// Returns an empty-content failure
    Empty,
    /// Succeeds after a delay
    Slow { delay_ms: u64 },
}

/// Mock provider for testing lookup behavior
#[derive(Debug)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Number of analyze calls made so far
    call_count: Arc<AtomicUsize>,
    /// Custom analysis generator (optional)
    custom_analysis: Option<fn(&str, &str) -> WordAnalysis>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            call_count: Arc::new(AtomicUsize::new(0)),
            custom_analysis: None,
        }
    }

    /// Create a working mock provider that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a mock that always rejects with an API error
    pub fn rejecting() -> Self {
        Self::new(MockBehavior::Rejecting)
    }

    /// Create a mock that always fails at the transport level
    pub fn unreachable() -> Self {
        Self::new(MockBehavior::Unreachable)
    }

    /// Create a mock that answers but has no usable content
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Create a mock that succeeds after the given delay
    pub fn slow(delay_ms: u64) -> Self {
        Self::new(MockBehavior::Slow { delay_ms })
    }

    /// Set a custom analysis generator
    pub fn with_custom_analysis(mut self, generator: fn(&str, &str) -> WordAnalysis) -> Self {
        self.custom_analysis = Some(generator);
        self
    }

    /// Number of analyze calls made against this provider (shared across clones)
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    fn canned_analysis(&self, word: &str, context: &str) -> WordAnalysis {
        if let Some(generator) = self.custom_analysis {
            generator(word, context)
        } else {
            WordAnalysis::new(
                format!("mock meaning of {word}"),
                format!("mock usage of {word}"),
            )
        }
    }
}

impl Clone for MockProvider {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior,
            call_count: Arc::clone(&self.call_count),
            custom_analysis: self.custom_analysis,
        }
    }
}

#[async_trait]
impl AnalysisProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn analyze(&self, word: &str, context: &str) -> Result<WordAnalysis, ProviderError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        match self.behavior {
            MockBehavior::Working => Ok(self.canned_analysis(word, context)),

            MockBehavior::Rejecting => Err(ProviderError::ApiError {
                status_code: 500,
                message: "Simulated provider rejection".to_string(),
            }),

            MockBehavior::Unreachable => Err(ProviderError::ConnectionError(
                "Simulated connection failure".to_string(),
            )),

            MockBehavior::Empty => Err(ProviderError::EmptyResponse),

            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(tokio::time::Duration::from_millis(delay_ms)).await;
                Ok(self.canned_analysis(word, context))
            }
        }
    }
}
