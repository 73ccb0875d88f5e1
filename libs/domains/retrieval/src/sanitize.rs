use crate::models::{SanitizedRecord, SearchRecord};

/// Projects raw search records to `{title, content}`.
///
/// Total: missing fields become empty strings. Order and count are preserved.
pub fn sanitize(records: Vec<SearchRecord>) -> Vec<SanitizedRecord> {
    records
        .into_iter()
        .map(|record| SanitizedRecord {
            title: record.title.unwrap_or_default(),
            content: record.content.unwrap_or_default(),
        })
        .collect()
}
