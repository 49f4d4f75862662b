use std::collections::{BTreeSet, HashMap};

use crate::model::Rule;

/// Read-only identifier→rule lookup over one catalog snapshot.
///
/// A reload builds a fresh index and swaps it in; an index is never mutated
/// after construction.
#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
    rules: HashMap<String, Rule>,
}

impl CatalogIndex {
    pub fn build(rules: Vec<Rule>) -> Self {
        let rules = rules.into_iter().map(|r| (r.id.clone(), r)).collect();
        Self { rules }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// `None` when the id is not in the catalog.
    pub fn get(&self, id: &str) -> Option<&Rule> {
        self.rules.get(id)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Catalog rules regulated by `authority` (case-insensitive), sorted by id.
    pub fn rules_for_authority(&self, authority: &str) -> Vec<&Rule> {
        let mut rules: Vec<&Rule> = self
            .rules
            .values()
            .filter(|r| r.authority.trim().eq_ignore_ascii_case(authority.trim()))
            .collect();
        rules.sort_by(|a, b| a.id.cmp(&b.id));
        rules
    }

    /// Distinct non-empty authorities in the catalog, sorted.
    pub fn authorities(&self) -> Vec<String> {
        self.rules
            .values()
            .filter_map(|r| r.authority())
            .map(|a| a.trim().to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
