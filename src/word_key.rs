/*!
 * Normalized lookup keys for selected words.
 *
 * Raw text selections arrive with arbitrary casing, stray punctuation and
 * whitespace. A [`WordKey`] is the canonical form used for equality across
 * the vocabulary store and in-flight lookup tracking: lower-cased, trimmed
 * of leading/trailing non-alphanumeric characters, with internal whitespace
 * collapsed to single spaces.
 */

use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical lookup/storage key derived from a raw text selection.
///
/// Construction goes through [`WordKey::normalize`], which returns `None`
/// for selections that are not lookable words (empty after cleanup, or
/// shorter than two characters). Callers must treat `None` as "ignore this
/// selection" rather than performing a lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordKey(String);

impl WordKey {
    /// Minimum character count for a lookable word
    const MIN_CHARS: usize = 2;

    /// Normalize a raw selection into a canonical key.
    ///
    /// The transformation is idempotent: normalizing an already-normalized
    /// string yields the same key.
    pub fn normalize(raw: &str) -> Option<WordKey> {
        // Lower-case before trimming so case folding cannot introduce new
        // edge characters that a second pass would strip.
        let lowered = raw.to_lowercase();
        let trimmed = lowered.trim_matches(|c: char| !c.is_alphanumeric());
        let collapsed = trimmed.split_whitespace().collect::<Vec<_>>().join(" ");

        if collapsed.chars().count() < Self::MIN_CHARS {
            return None;
        }

        Some(WordKey(collapsed))
    }

    /// The canonical text of this key
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for WordKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
