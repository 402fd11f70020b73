/*!
 * Tabular export of the saved vocabulary.
 *
 * Produces a CSV byte stream with one row per saved word, most recently
 * added first, plus a suggested `vocabulary-<date>.csv` filename. Where the
 * bytes end up (file, share sheet, clipboard) is the caller's concern.
 */

use chrono::Local;

use super::store::VocabularyStore;

/// Export payload: the bytes and a suggested filename
#[derive(Debug, Clone, PartialEq)]
pub struct ExportBundle {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Column headers, matching the listing the reader sees
const HEADER: &str = "Word,Definition,Date Added";

/// Build the CSV export for the given store.
///
/// Returns `None` when the store is empty — "nothing to export" is a
/// user-visible notice, not an error.
pub fn export_csv(store: &VocabularyStore) -> Option<ExportBundle> {
    let entries = store.list();
    if entries.is_empty() {
        return None;
    }

    let mut out = String::with_capacity(entries.len() * 64);
    out.push_str(HEADER);
    out.push('\n');

    for entry in entries {
        out.push_str(&escape_field(&entry.display_word));
        out.push(',');
        out.push_str(&escape_field(&entry.definition));
        out.push(',');
        out.push_str(&entry.date_added.format("%Y-%m-%d").to_string());
        out.push('\n');
    }

    Some(ExportBundle {
        filename: suggested_filename(),
        bytes: out.into_bytes(),
    })
}

/// `vocabulary-<ISO date>.csv`, dated in the reader's local calendar
pub fn suggested_filename() -> String {
    format!("vocabulary-{}.csv", Local::now().format("%Y-%m-%d"))
}

/// Quote a CSV field when it contains a delimiter, quote or line break
fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
