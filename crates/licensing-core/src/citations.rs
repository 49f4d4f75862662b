use crate::catalog::CatalogIndex;
use crate::model::{CitationRow, MISSING_SOURCE_REF, UNKNOWN_TITLE};

/// One row per match, in match order. Never drops or merges rows.
pub fn project_citations(matches: &[String], index: &CatalogIndex) -> Vec<CitationRow> {
    matches
        .iter()
        .map(|id| {
            let rule = index.get(id);
            CitationRow {
                rule_id: id.clone(),
                title: rule
                    .and_then(|r| r.title())
                    .unwrap_or(UNKNOWN_TITLE)
                    .to_string(),
                authority: rule
                    .and_then(|r| r.authority())
                    .unwrap_or_default()
                    .to_string(),
                source_ref: rule
                    .and_then(|r| r.source_ref())
                    .unwrap_or(MISSING_SOURCE_REF)
                    .to_string(),
            }
        })
        .collect()
}
