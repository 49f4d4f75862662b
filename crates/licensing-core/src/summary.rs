use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::model::Report;
use crate::synthesis::summary_text;

const DAYS_PER_HIGH_PRIORITY: usize = 2;
const DAYS_PER_OTHER: usize = 1;

/// General compliance warnings shown alongside every assessment. Not rule-specific.
pub const COMPLIANCE_RISKS: [&str; 3] = [
    "Operating without proper licenses may result in fines and forced closure",
    "Non-compliance with safety regulations poses risks to customers and staff",
    "Delayed licensing applications may extend your time to market",
];

pub fn compliance_risks() -> Vec<String> {
    COMPLIANCE_RISKS.iter().map(|s| s.to_string()).collect()
}

/// Headline numbers for the top of the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AssessmentSummary {
    pub total_requirements: usize,
    pub high_priority_count: usize,
    /// Rough processing estimate: two days per high-priority rule, one per other rule.
    pub estimated_processing_days: usize,
    pub summary: String,
}

pub fn summarize(report: &Report) -> AssessmentSummary {
    let total = report.total_rules;
    let high = report.high_priority_count;
    let other = total.saturating_sub(high);

    let summary = if report.summary.trim().is_empty() {
        summary_text(total)
    } else {
        report.summary.clone()
    };

    AssessmentSummary {
        total_requirements: total,
        high_priority_count: high,
        estimated_processing_days: high
            .saturating_mul(DAYS_PER_HIGH_PRIORITY)
            .saturating_add(other.saturating_mul(DAYS_PER_OTHER)),
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogIndex;
    use crate::fixtures::{ids, sample_catalog};
    use crate::synthesis::synthesize_report;

    #[test]
    fn estimate_weights_high_priority() {
        let index = CatalogIndex::build(sample_catalog());
        let matches = ids(&[
            "R-Police-CCTV-Resolution",
            "R-Police-CCTV-Placement",
            "R-MoH-Water-Quality",
        ]);
        let summary = summarize(&synthesize_report(&matches, &index));

        assert_eq!(summary.total_requirements, 3);
        assert_eq!(summary.high_priority_count, 2);
        assert_eq!(summary.estimated_processing_days, 5);
    }

    #[test]
    fn blank_summary_falls_back_to_template() {
        let mut report = synthesize_report(&ids(&["R-Ghost"]), &CatalogIndex::empty());
        report.summary = "   ".to_string();

        let summary = summarize(&report);

        assert_eq!(summary.summary, summary_text(1));
        assert_eq!(summary.estimated_processing_days, 1);
    }

    #[test]
    fn inconsistent_upstream_counts_do_not_underflow() {
        let mut report = synthesize_report(&[], &CatalogIndex::empty());
        report.high_priority_count = 3;

        assert_eq!(summarize(&report).estimated_processing_days, 6);
    }

    #[test]
    fn huge_upstream_counts_saturate() {
        let mut report = synthesize_report(&[], &CatalogIndex::empty());
        report.total_rules = usize::MAX;
        report.high_priority_count = usize::MAX / 2 + 1;

        assert_eq!(summarize(&report).estimated_processing_days, usize::MAX);
    }
}
