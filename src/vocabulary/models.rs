/*!
 * Data models for saved vocabulary entries.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::word_key::WordKey;

/// One saved word.
///
/// Entries are created only by [`crate::vocabulary::VocabularyStore::add`]
/// and are never mutated in place; removal deletes the whole entry. At most
/// one entry exists per key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    /// Canonical key; sole equality handle for dedup and removal
    pub key: WordKey,

    /// The word as shown in listings and exports
    pub display_word: String,

    /// Saved definition text
    pub definition: String,

    /// Moment the entry was saved; drives most-recent-first ordering
    pub date_added: DateTime<Utc>,
}

/// Persisted representation of the full entry set.
///
/// This is the only shape ever written to durable storage; the store is its
/// single writer.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct VocabularySnapshot {
    pub entries: Vec<VocabularyEntry>,
}
