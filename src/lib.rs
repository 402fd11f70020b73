/*!
 * # lexiread - Lexical companion for reading documents
 *
 * A Rust library for on-demand word analysis while reading, with a
 * persistent personal vocabulary.
 *
 * ## Features
 *
 * - Turn raw text selections into normalized lookup keys
 * - Analyze words in context using pluggable providers:
 *   - Dictionary API (quick meanings)
 *   - Ollama (local LLM)
 *   - Anthropic API
 * - Single-flight lookup sessions with stale-response rejection
 * - Independent deep-context analysis alongside quick definitions
 * - Deduplicated vocabulary with write-through persistence
 * - CSV export of saved words
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `word_key`: Normalized lookup keys
 * - `analysis`: Lookup session state machine and analysis payloads
 * - `vocabulary`: Persistent vocabulary store, storage port and export
 * - `providers`: Client implementations for the analysis backends:
 *   - `providers::dictionary`: Dictionary API client
 *   - `providers::ollama`: Ollama API client
 *   - `providers::anthropic`: Anthropic API client
 * - `app_config`: Configuration management
 * - `app_controller`: Main reading-session controller
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod analysis;
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod providers;
pub mod vocabulary;
pub mod word_key;

// Re-export main types for easier usage
pub use analysis::{AnalysisSession, SessionState, WordAnalysis};
pub use app_config::Config;
pub use app_controller::{ReadingController, SaveOutcome, SelectionEvent};
pub use errors::{AppError, ProviderError, StoreError};
pub use vocabulary::{VocabularyEntry, VocabularyStore};
pub use word_key::WordKey;
