/*!
 * Vocabulary export tests: CSV shape, ordering and file output
 */

use std::sync::Arc;

use lexiread::app_controller::ReadingController;
use lexiread::providers::mock::MockProvider;
use lexiread::vocabulary::export;
use tempfile::TempDir;

use crate::common::memory_store;

#[tokio::test]
async fn test_exportVocabulary_withEmptyStore_shouldWriteNothing() {
    let controller = ReadingController::with_parts(
        Arc::new(MockProvider::working()),
        Arc::new(MockProvider::working()),
        memory_store(),
    );

    let dir = TempDir::new().unwrap();
    let result = controller.export_vocabulary(dir.path()).await.unwrap();

    assert!(result.is_none());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_exportVocabulary_shouldWriteCsvFileWithDatedName() {
    let mut store = memory_store();
    store.add("whale", "a large marine mammal").unwrap();
    store.add("harpoon", "a barbed spear").unwrap();
    store.add("breach", "to leap out of the water").unwrap();

    let controller = ReadingController::with_parts(
        Arc::new(MockProvider::working()),
        Arc::new(MockProvider::working()),
        store,
    );

    let dir = TempDir::new().unwrap();
    let path = controller
        .export_vocabulary(dir.path())
        .await
        .unwrap()
        .expect("a non-empty store must export");

    let filename = path.file_name().unwrap().to_string_lossy().to_string();
    assert!(filename.starts_with("vocabulary-"));
    assert!(filename.ends_with(".csv"));

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();

    // Header plus one row per saved word, most recently added first
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "Word,Definition,Date Added");
    assert!(lines[1].starts_with("breach,"));
    assert!(lines[2].starts_with("harpoon,"));
    assert!(lines[3].starts_with("whale,"));
}

#[test]
fn test_exportCsv_rowCount_shouldMatchListLength() {
    let mut store = memory_store();
    for (word, definition) in [
        ("one", "1"),
        ("two", "2"),
        ("three", "3"),
        ("four", "4"),
        ("five", "5"),
    ] {
        store.add(word, definition).unwrap();
    }

    let bundle = export::export_csv(&store).unwrap();
    let text = String::from_utf8(bundle.bytes).unwrap();

    assert_eq!(text.lines().count() - 1, store.list().len());
}
