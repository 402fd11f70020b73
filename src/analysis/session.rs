/*!
 * Per-selection lookup session.
 *
 * An [`AnalysisSession`] manages the lifecycle of "the reader just asked
 * about word X" against a pluggable analysis provider. It hands out
 * monotonically increasing request ids, and only ever surfaces the outcome
 * matching the most recently issued id — a slow response to a superseded
 * request is discarded silently when it finally arrives.
 *
 * The session itself is a synchronous state machine; the caller performs
 * the actual provider call between [`AnalysisSession::begin`] and
 * [`AnalysisSession::complete`], typically on a spawned task.
 */

use anyhow::{bail, Result};
use log::debug;

use crate::errors::ProviderError;
use crate::vocabulary::VocabularyStore;
use crate::word_key::WordKey;

use super::WordAnalysis;

/// A lookup handed out by [`AnalysisSession::begin`], to be resolved
/// against a provider and passed back to [`AnalysisSession::complete`].
#[derive(Debug, Clone)]
pub struct LookupRequest {
    /// Monotonic id used by the stale-response guard
    pub id: u64,

    /// Normalized key for the selected word
    pub key: WordKey,

    /// The raw selection as the reader made it
    pub raw_word: String,

    /// Surrounding text supplied with the selection
    pub context: String,
}

/// Broad classification of a failed lookup, for presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Transport-level failure reaching the provider
    Network,

    /// The provider answered with an error and a reason
    Rejected,

    /// The provider answered but produced no usable content
    NoResult,
}

/// User-surfaceable description of a failed lookup
#[derive(Debug, Clone, PartialEq)]
pub struct LookupError {
    pub kind: FailureKind,
    pub message: String,
}

impl From<ProviderError> for LookupError {
    fn from(error: ProviderError) -> Self {
        let kind = match &error {
            ProviderError::RequestFailed(_) | ProviderError::ConnectionError(_) => {
                FailureKind::Network
            }
            ProviderError::ApiError { .. } | ProviderError::AuthenticationError(_) => {
                FailureKind::Rejected
            }
            ProviderError::ParseError(_) | ProviderError::EmptyResponse => FailureKind::NoResult,
        };

        Self {
            kind,
            message: error.to_string(),
        }
    }
}

impl std::fmt::Display for LookupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Presentation-visible state of a lookup session
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// No lookup open
    Idle,

    /// A lookup is in flight for the given word
    Loading { word: WordKey },

    /// The latest lookup finished with an analysis
    Success {
        word: WordKey,
        raw_word: String,
        analysis: WordAnalysis,
    },

    /// The latest lookup failed
    Failed { word: WordKey, error: LookupError },
}

impl SessionState {
    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Loading { .. })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SessionState::Success { .. })
    }
}

/// State machine for one selection-to-analysis lookup slot.
///
/// Two independent instances of this type exist per reading session: one
/// for quick definitions, one for deep context. They share nothing and
/// never cancel each other.
#[derive(Debug)]
pub struct AnalysisSession {
    state: SessionState,
    /// Id of the request whose outcome may still be surfaced
    current_request: Option<u64>,
    /// Last id handed out; strictly increasing across the session
    last_issued_id: u64,
}

impl Default for AnalysisSession {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisSession {
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            current_request: None,
            last_issued_id: 0,
        }
    }

    /// Open a lookup for a raw selection.
    ///
    /// Returns `None` without touching any state when the selection does
    /// not normalize to a lookable word. Otherwise transitions to
    /// `Loading`, supersedes any outstanding request, and returns the
    /// request the caller must resolve against a provider.
    pub fn begin(&mut self, raw_word: &str, context: &str) -> Option<LookupRequest> {
        let key = WordKey::normalize(raw_word)?;

        self.last_issued_id += 1;
        let id = self.last_issued_id;
        self.current_request = Some(id);
        self.state = SessionState::Loading { word: key.clone() };

        debug!("lookup #{} started for \"{}\"", id, key);

        Some(LookupRequest {
            id,
            key,
            raw_word: raw_word.trim().to_string(),
            context: context.to_string(),
        })
    }

    /// Apply a provider outcome for a previously issued request.
    ///
    /// Returns `false` when the outcome belongs to a superseded or
    /// cancelled request and was discarded — the stale-response guard that
    /// keeps a slow earlier lookup from overwriting a faster later one.
    pub fn complete(
        &mut self,
        request: &LookupRequest,
        outcome: Result<WordAnalysis, ProviderError>,
    ) -> bool {
        if self.current_request != Some(request.id) {
            debug!(
                "discarding stale response #{} for \"{}\"",
                request.id, request.key
            );
            return false;
        }

        self.state = match outcome {
            Ok(analysis) => SessionState::Success {
                word: request.key.clone(),
                raw_word: request.raw_word.clone(),
                analysis,
            },
            Err(error) => {
                let error = LookupError::from(error);
                debug!("lookup #{} failed: {}", request.id, error);
                SessionState::Failed {
                    word: request.key.clone(),
                    error,
                }
            }
        };

        true
    }

    /// Close the session and invalidate any in-flight request.
    ///
    /// The underlying network call is not aborted; its eventual response
    /// simply no longer matches and is dropped on arrival.
    pub fn cancel(&mut self) {
        self.current_request = None;
        self.state = SessionState::Idle;
    }

    /// Read-only snapshot of the current state
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Save the current successful analysis into the vocabulary store.
    ///
    /// Valid only in the `Success` state. Returns `Ok(true)` when a new
    /// entry was created and `Ok(false)` when the word was already saved —
    /// callers surface those two outcomes differently.
    pub fn save(&self, store: &mut VocabularyStore) -> Result<bool> {
        match &self.state {
            SessionState::Success {
                raw_word, analysis, ..
            } => Ok(store.add(raw_word, &analysis.meaning)?),
            _ => bail!("no completed analysis to save"),
        }
    }
}
