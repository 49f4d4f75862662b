/// Local report synthesis, used when the matching service returns no usable report.
///
/// Pure and deterministic: the output depends only on the match list and the index.
use crate::catalog::CatalogIndex;
use crate::model::{Priority, Report, ReportSection, MISSING_DETAILS, UNKNOWN_TITLE};

pub const DEFAULT_RECOMMENDATIONS: [&str; 4] = [
    "Contact relevant authorities to confirm specific requirements",
    "Gather required documentation and certificates",
    "Schedule necessary inspections with regulatory bodies",
    "Begin implementation of high-priority compliance measures",
];

pub fn summary_text(total_rules: usize) -> String {
    format!(
        "Your restaurant matches {total_rules} licensing requirements. Review the detailed \
         obligations below and prioritize high-priority items for faster compliance."
    )
}

pub fn synthesize_report(matches: &[String], index: &CatalogIndex) -> Report {
    let sections: Vec<ReportSection> = matches
        .iter()
        .map(|id| {
            let rule = index.get(id);
            ReportSection {
                title: rule
                    .and_then(|r| r.title())
                    .unwrap_or(UNKNOWN_TITLE)
                    .to_string(),
                content: rule
                    .and_then(|r| r.description())
                    .unwrap_or(MISSING_DETAILS)
                    .to_string(),
                rule_ids: vec![id.clone()],
                priority: rule.map(|r| r.priority).unwrap_or_default(),
            }
        })
        .collect();

    let high_priority_count = sections
        .iter()
        .filter(|s| s.priority == Priority::High)
        .count();

    Report {
        summary: summary_text(matches.len()),
        sections,
        total_rules: matches.len(),
        high_priority_count,
        recommendations: DEFAULT_RECOMMENDATIONS.iter().map(|s| s.to_string()).collect(),
        authorities: distinct_authorities(matches, index),
    }
}

/// Authorities of the resolvable matches, deduplicated in first-seen order.
pub fn distinct_authorities(matches: &[String], index: &CatalogIndex) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for authority in matches
        .iter()
        .filter_map(|id| index.get(id))
        .filter_map(|r| r.authority())
    {
        if !out.iter().any(|a| a == authority) {
            out.push(authority.to_string());
        }
    }
    out
}
