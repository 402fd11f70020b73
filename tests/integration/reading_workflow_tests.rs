/*!
 * End-to-end reading session tests: selection to analysis to vocabulary
 */

use std::sync::Arc;

use lexiread::analysis::{FailureKind, SessionState, WordAnalysis};
use lexiread::app_controller::{ReadingController, SaveOutcome, ScreenPosition, SelectionEvent};
use lexiread::providers::mock::MockProvider;
use lexiread::vocabulary::{export, VocabularyStore};

use crate::common::{init_test_logging, memory_store, shared_store, SharedStorage};

fn selection(raw: &str) -> SelectionEvent {
    SelectionEvent {
        raw_text: raw.to_string(),
        context: "It was the whale, breaching at last.".to_string(),
        position: ScreenPosition { x: 120.0, y: 48.0 },
    }
}

fn controller_with(provider: MockProvider) -> ReadingController {
    ReadingController::with_parts(
        Arc::new(provider.clone()),
        Arc::new(provider),
        memory_store(),
    )
}

#[tokio::test]
async fn test_whaleScenario_selectSaveDuplicateRemoveExport() {
    init_test_logging();

    let provider = MockProvider::working()
        .with_custom_analysis(|_, _| WordAnalysis::new("a large marine mammal", "literal usage"));

    let (store, storage) = shared_store();
    let controller = ReadingController::with_parts(
        Arc::new(provider.clone()),
        Arc::new(provider),
        store,
    );

    // The reader selects "  Whale!! " and the analysis arrives
    let handle = controller
        .handle_selection(&selection("  Whale!! "))
        .await
        .expect("selection should start a lookup");
    handle.await.unwrap();

    match controller.quick_state().await {
        SessionState::Success { word, analysis, .. } => {
            assert_eq!(word.as_str(), "whale");
            assert_eq!(analysis.meaning, "a large marine mammal");
        }
        other => panic!("unexpected state: {:?}", other),
    }

    // Saving yields exactly one entry with the normalized display word
    assert_eq!(controller.save_current().await.unwrap(), SaveOutcome::Saved);

    let entries = controller.vocabulary().await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].key.as_str(), "whale");
    assert_eq!(entries[0].display_word, "whale");
    assert_eq!(entries[0].definition, "a large marine mammal");

    // Looking up "WHALE" again and saving reports a duplicate
    let handle = controller
        .handle_selection(&selection("WHALE"))
        .await
        .unwrap();
    handle.await.unwrap();
    assert_eq!(
        controller.save_current().await.unwrap(),
        SaveOutcome::AlreadyExists
    );
    assert_eq!(controller.vocabulary().await.len(), 1);

    // Removing the word empties the store, so there is nothing to export
    controller.remove_word("whale").await.unwrap();
    assert!(controller.vocabulary().await.is_empty());

    let restored = VocabularyStore::load(Box::new(SharedStorage(storage)));
    assert!(restored.is_empty());
    assert!(export::export_csv(&restored).is_none());
}

#[tokio::test]
async fn test_supersededLookup_shouldOnlySurfaceLatestWord() {
    // Both lookups take a while; the first one resolves first and must
    // still lose to the later selection.
    let controller = controller_with(MockProvider::slow(50));

    let first = controller
        .handle_selection(&selection("tortoise"))
        .await
        .unwrap();
    let second = controller.handle_selection(&selection("hare")).await.unwrap();

    first.await.unwrap();
    second.await.unwrap();

    match controller.quick_state().await {
        SessionState::Success { word, .. } => assert_eq!(word.as_str(), "hare"),
        other => panic!("unexpected state: {:?}", other),
    }
}

#[tokio::test]
async fn test_cancelWhileLoading_shouldDropLateResponse() {
    let controller = controller_with(MockProvider::slow(50));

    let handle = controller.handle_selection(&selection("whale")).await.unwrap();
    assert!(controller.quick_state().await.is_loading());

    controller.cancel_quick().await;
    assert_eq!(controller.quick_state().await, SessionState::Idle);

    // The provider response arrives after cancellation and is dropped
    handle.await.unwrap();
    assert_eq!(controller.quick_state().await, SessionState::Idle);
}

#[tokio::test]
async fn test_providerFailure_shouldSurfaceDismissibleErrorAndAllowRetry() {
    let failing = MockProvider::unreachable();
    let working = MockProvider::working();

    // A controller whose quick provider is down
    let controller = ReadingController::with_parts(
        Arc::new(failing),
        Arc::new(working.clone()),
        memory_store(),
    );

    let handle = controller.handle_selection(&selection("whale")).await.unwrap();
    handle.await.unwrap();

    match controller.quick_state().await {
        SessionState::Failed { error, .. } => {
            assert_eq!(error.kind, FailureKind::Network);
        }
        other => panic!("unexpected state: {:?}", other),
    }

    // The failure is not fatal: the deep session still works
    let handle = controller
        .request_deep_context("whale", "the whale breached")
        .await
        .unwrap();
    handle.await.unwrap();
    assert!(controller.deep_state().await.is_success());
}

#[tokio::test]
async fn test_quickAndDeepSessions_shouldTrackIndependentWords() {
    let quick = MockProvider::working()
        .with_custom_analysis(|word, _| WordAnalysis::new(format!("quick {word}"), "short"));
    let deep = MockProvider::working()
        .with_custom_analysis(|word, _| WordAnalysis::new(format!("deep {word}"), "long"));

    let controller =
        ReadingController::with_parts(Arc::new(quick), Arc::new(deep), memory_store());

    let quick_handle = controller.handle_selection(&selection("whale")).await.unwrap();
    let deep_handle = controller
        .request_deep_context("harpoon", "he raised the harpoon")
        .await
        .unwrap();

    quick_handle.await.unwrap();
    deep_handle.await.unwrap();

    match controller.quick_state().await {
        SessionState::Success { word, analysis, .. } => {
            assert_eq!(word.as_str(), "whale");
            assert_eq!(analysis.meaning, "quick whale");
        }
        other => panic!("unexpected quick state: {:?}", other),
    }

    match controller.deep_state().await {
        SessionState::Success { word, analysis, .. } => {
            assert_eq!(word.as_str(), "harpoon");
            assert_eq!(analysis.meaning, "deep harpoon");
        }
        other => panic!("unexpected deep state: {:?}", other),
    }
}

#[tokio::test]
async fn test_emptySelection_shouldNeverReachTheProvider() {
    let provider = MockProvider::working();
    let controller = controller_with(provider.clone());

    assert!(controller.handle_selection(&selection("  !? ")).await.is_none());
    assert!(controller.handle_selection(&selection("")).await.is_none());

    assert_eq!(provider.call_count(), 0);
    assert_eq!(controller.quick_state().await, SessionState::Idle);
}
