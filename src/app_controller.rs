/*!
 * Reading session controller.
 *
 * Orchestration only: wires selection events from the external document
 * renderer to the quick-definition lookup session, "save" actions to the
 * vocabulary store, "deep context" requests to the independent deep
 * session, and remove/export actions straight to the store. The provider
 * call for an open lookup runs on a spawned task; session state transitions
 * happen under the session lock, so only the latest request's outcome is
 * ever surfaced.
 */

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use log::{debug, info};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::analysis::session::{AnalysisSession, LookupRequest, SessionState};
use crate::app_config::Config;
use crate::errors::StoreError;
use crate::file_utils::FileManager;
use crate::providers::{build_provider, AnalysisDepth, AnalysisProvider};
use crate::vocabulary::{export, FileStorage, VocabularyEntry, VocabularyStore};

/// Opaque handle to the document the reader has open.
///
/// The document's bytes belong to the external renderer; the core only
/// keeps a name for display and logging.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentHandle {
    pub name: String,
}

impl DocumentHandle {
    pub fn from_path(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        Self { name }
    }
}

/// On-screen position of a selection, forwarded for presentation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPosition {
    pub x: f64,
    pub y: f64,
}

/// Selection event emitted by the external document renderer
#[derive(Debug, Clone)]
pub struct SelectionEvent {
    /// The selected text, exactly as selected
    pub raw_text: String,
    /// Text surrounding the selection
    pub context: String,
    /// Where on screen the selection happened
    pub position: ScreenPosition,
}

/// Result of saving the currently displayed analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// A new vocabulary entry was created
    Saved,
    /// The word was already in the vocabulary; nothing changed
    AlreadyExists,
}

/// Top-level orchestrator for one reading session
pub struct ReadingController {
    /// Document currently open in the external renderer
    document: Option<DocumentHandle>,

    /// Quick-definition lookup session
    quick: Arc<Mutex<AnalysisSession>>,

    /// Deep-context lookup session, independent of the quick one
    deep: Arc<Mutex<AnalysisSession>>,

    quick_provider: Arc<dyn AnalysisProvider>,
    deep_provider: Arc<dyn AnalysisProvider>,

    store: Arc<Mutex<VocabularyStore>>,
}

impl ReadingController {
    /// Build a controller from configuration: providers from the config's
    /// provider slots, vocabulary restored from the configured file.
    pub fn new(config: &Config) -> Result<Self> {
        let quick_provider = build_provider(&config.quick_provider, AnalysisDepth::Quick)?;
        let deep_provider = build_provider(&config.deep_provider, AnalysisDepth::Deep)?;

        let vocabulary_path = config.vocabulary_path()?;
        let store = VocabularyStore::load(Box::new(FileStorage::new(vocabulary_path)));

        Ok(Self::with_parts(quick_provider, deep_provider, store))
    }

    /// Assemble a controller from explicit collaborators (tests inject
    /// mock providers and in-memory storage here)
    pub fn with_parts(
        quick_provider: Arc<dyn AnalysisProvider>,
        deep_provider: Arc<dyn AnalysisProvider>,
        store: VocabularyStore,
    ) -> Self {
        Self {
            document: None,
            quick: Arc::new(Mutex::new(AnalysisSession::new())),
            deep: Arc::new(Mutex::new(AnalysisSession::new())),
            quick_provider,
            deep_provider,
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Record the document the renderer just opened
    pub fn open_document(&mut self, handle: DocumentHandle) {
        info!("document loaded: {}", handle.name);
        self.document = Some(handle);
    }

    pub fn document(&self) -> Option<&DocumentHandle> {
        self.document.as_ref()
    }

    /// Handle a selection event from the renderer.
    ///
    /// A non-lookable selection is silently ignored and `None` is
    /// returned. Otherwise the quick session opens a lookup (superseding
    /// any previous one) and the provider call is dispatched on a spawned
    /// task whose handle is returned so callers can await completion.
    pub async fn handle_selection(&self, event: &SelectionEvent) -> Option<JoinHandle<()>> {
        let request = self.quick.lock().await.begin(&event.raw_text, &event.context);

        match request {
            Some(request) => {
                info!("looking up \"{}\"", request.key);
                Some(Self::dispatch(
                    Arc::clone(&self.quick),
                    Arc::clone(&self.quick_provider),
                    request,
                ))
            }
            None => {
                debug!("ignoring selection {:?}", event.raw_text);
                None
            }
        }
    }

    /// Request a deep analysis for a word, typically from the vocabulary
    /// list or the displayed definition. Runs on the deep session and does
    /// not disturb the quick one.
    pub async fn request_deep_context(&self, word: &str, context: &str) -> Option<JoinHandle<()>> {
        let request = self.deep.lock().await.begin(word, context);

        request.map(|request| {
            info!("deep context requested for \"{}\"", request.key);
            Self::dispatch(
                Arc::clone(&self.deep),
                Arc::clone(&self.deep_provider),
                request,
            )
        })
    }

    /// Resolve a lookup against its provider on a background task.
    ///
    /// The session lock is held only for the completion call, never across
    /// the network await; stale outcomes are dropped inside `complete`.
    fn dispatch(
        session: Arc<Mutex<AnalysisSession>>,
        provider: Arc<dyn AnalysisProvider>,
        request: LookupRequest,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            let outcome = provider.analyze(&request.raw_word, &request.context).await;
            session.lock().await.complete(&request, outcome);
        })
    }

    /// Save the quick session's current analysis into the vocabulary
    pub async fn save_current(&self) -> Result<SaveOutcome> {
        let session = self.quick.lock().await;
        let mut store = self.store.lock().await;

        let created = session
            .save(&mut store)
            .context("Could not save the current word")?;

        Ok(if created {
            SaveOutcome::Saved
        } else {
            SaveOutcome::AlreadyExists
        })
    }

    /// Remove a word from the vocabulary
    pub async fn remove_word(&self, raw_word: &str) -> Result<(), StoreError> {
        self.store.lock().await.remove(raw_word)
    }

    /// Export the vocabulary as CSV into the given directory.
    ///
    /// Returns `Ok(None)` when there is nothing to export.
    pub async fn export_vocabulary(&self, output_dir: &Path) -> Result<Option<PathBuf>> {
        let store = self.store.lock().await;

        let Some(bundle) = export::export_csv(&store) else {
            info!("vocabulary is empty, nothing to export");
            return Ok(None);
        };

        let path = output_dir.join(&bundle.filename);
        FileManager::write_bytes(&path, &bundle.bytes)?;
        info!("exported {} entries to {:?}", store.len(), path);

        Ok(Some(path))
    }

    /// Snapshot of the saved words, most recently added first
    pub async fn vocabulary(&self) -> Vec<VocabularyEntry> {
        self.store
            .lock()
            .await
            .list()
            .into_iter()
            .cloned()
            .collect()
    }

    /// Current state of the quick-definition session
    pub async fn quick_state(&self) -> SessionState {
        self.quick.lock().await.state().clone()
    }

    /// Current state of the deep-context session
    pub async fn deep_state(&self) -> SessionState {
        self.deep.lock().await.state().clone()
    }

    /// Close the quick-definition popup; any in-flight response is dropped
    pub async fn cancel_quick(&self) {
        self.quick.lock().await.cancel();
    }

    /// Close the deep-context view; any in-flight response is dropped
    pub async fn cancel_deep(&self) {
        self.deep.lock().await.cancel();
    }
}
