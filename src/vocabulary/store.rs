/*!
 * The vocabulary store: a deduplicated, persisted collection of saved words.
 *
 * The store is restored from its storage port once at startup and performs
 * a full-state write-through synchronously with every mutation, so the
 * in-memory set and the persisted snapshot are never observably out of
 * sync. It is the single writer of the persisted form.
 */

use chrono::Utc;
use log::{debug, info, warn};

use crate::errors::StoreError;
use crate::word_key::WordKey;

use super::models::{VocabularyEntry, VocabularySnapshot};
use super::storage::StoragePort;

/// Deduplicated mapping of normalized key to saved entry.
pub struct VocabularyStore {
    /// Entries in insertion order; recency ordering is derived from
    /// `date_added` at presentation time
    entries: Vec<VocabularyEntry>,
    storage: Box<dyn StoragePort>,
}

impl VocabularyStore {
    /// Restore the store from durable storage.
    ///
    /// Fails soft: corrupt or unreadable data logs a warning and yields an
    /// empty store rather than taking down the session.
    pub fn load(storage: Box<dyn StoragePort>) -> Self {
        let entries = match storage.read() {
            Ok(Some(bytes)) => match serde_json::from_slice::<VocabularySnapshot>(&bytes) {
                Ok(snapshot) => {
                    info!("restored {} vocabulary entries", snapshot.entries.len());
                    snapshot.entries
                }
                Err(e) => {
                    warn!("discarding unreadable vocabulary snapshot: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("could not read vocabulary storage: {}", e);
                Vec::new()
            }
        };

        Self { entries, storage }
    }

    /// Save a word with its definition.
    ///
    /// Returns `Ok(false)` without mutating anything when an entry with the
    /// same normalized key already exists, or when the word does not
    /// normalize to a lookable key. Returns `Ok(true)` after the entry has
    /// been appended and the full set persisted.
    pub fn add(&mut self, raw_word: &str, definition: &str) -> Result<bool, StoreError> {
        let Some(key) = WordKey::normalize(raw_word) else {
            debug!("ignoring save of non-lookable selection {:?}", raw_word);
            return Ok(false);
        };

        if self.entries.iter().any(|e| e.key == key) {
            debug!("\"{}\" already saved", key);
            return Ok(false);
        }

        let entry = VocabularyEntry {
            display_word: key.as_str().to_string(),
            key,
            definition: definition.to_string(),
            date_added: Utc::now(),
        };

        info!("saving \"{}\" to vocabulary", entry.display_word);
        self.entries.push(entry);
        self.persist()?;

        Ok(true)
    }

    /// Remove a saved word. Removing an absent word is a no-op, not an
    /// error, and performs no write.
    pub fn remove(&mut self, raw_word: &str) -> Result<(), StoreError> {
        let Some(key) = WordKey::normalize(raw_word) else {
            return Ok(());
        };

        let before = self.entries.len();
        self.entries.retain(|e| e.key != key);

        if self.entries.len() != before {
            info!("removed \"{}\" from vocabulary", key);
            self.persist()?;
        }

        Ok(())
    }

    /// Whether a word (by normalized key) is saved
    pub fn contains(&self, raw_word: &str) -> bool {
        WordKey::normalize(raw_word)
            .map(|key| self.entries.iter().any(|e| e.key == key))
            .unwrap_or(false)
    }

    /// Saved entries, most-recently-added first.
    ///
    /// This ordering is a presentation contract, independent of the
    /// internal storage order.
    pub fn list(&self) -> Vec<&VocabularyEntry> {
        // Reverse insertion order first so equal timestamps still come out
        // newest-first under the stable sort.
        let mut entries: Vec<&VocabularyEntry> = self.entries.iter().rev().collect();
        entries.sort_by(|a, b| b.date_added.cmp(&a.date_added));
        entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write the full entry set through to durable storage
    fn persist(&self) -> Result<(), StoreError> {
        let snapshot = VocabularySnapshot {
            entries: self.entries.clone(),
        };

        let bytes = serde_json::to_vec_pretty(&snapshot)
            .map_err(|e| StoreError::Serialize(e.to_string()))?;

        self.storage.write(&bytes)
    }
}
