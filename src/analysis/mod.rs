/*!
 * Word analysis types and the per-selection lookup session.
 *
 * This module contains the data exchanged with analysis providers and the
 * [`session::AnalysisSession`] state machine that tracks one selection's
 * lookup lifecycle:
 * - `analysis::WordAnalysis`: the meaning/context payload a provider returns
 * - `analysis::session`: request sequencing, stale-response rejection and
 *   the small set of presentation-visible states
 */

use serde::{Deserialize, Serialize};

pub mod session;

pub use session::{AnalysisSession, FailureKind, LookupError, LookupRequest, SessionState};

/// Analysis payload for a single word, as returned by a provider.
///
/// Both the quick-definition and the deep-context providers produce this
/// shape; the deep variant simply carries a longer `context` text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordAnalysis {
    /// Meaning of the word
    pub meaning: String,

    /// How the word is used in the surrounding text
    pub context: String,
}

impl WordAnalysis {
    pub fn new(meaning: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            meaning: meaning.into(),
            context: context.into(),
        }
    }
}
