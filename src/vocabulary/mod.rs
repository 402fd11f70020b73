/*!
 * Persistent personal vocabulary.
 *
 * This module owns the deduplicated collection of saved words:
 * - `vocabulary::models`: the saved entry and its persisted snapshot form
 * - `vocabulary::storage`: the injected durable-storage port (file-backed
 *   and in-memory implementations)
 * - `vocabulary::store`: add/remove/list semantics with write-through
 *   persistence on every mutation
 * - `vocabulary::export`: tabular export of the saved words
 */

pub mod export;
pub mod models;
pub mod storage;
pub mod store;

pub use export::ExportBundle;
pub use models::VocabularyEntry;
pub use storage::{FileStorage, MemoryStorage, StoragePort};
pub use store::VocabularyStore;
