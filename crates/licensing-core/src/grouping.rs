/// Obligations grouped by regulating authority.
///
/// Groups follow `CANONICAL_AUTHORITIES`, not match order. Matches whose authority is
/// unknown or not listed do not appear in any group; the citation table still lists them.
use crate::catalog::CatalogIndex;
use crate::model::{
    AuthorityGroup, ObligationEntry, FIRE_AND_RESCUE, ISRAEL_POLICE, MINISTRY_OF_HEALTH,
    MISSING_DETAILS, MISSING_SOURCE_REF, UNKNOWN_TITLE,
};

pub const CANONICAL_AUTHORITIES: &[&str] = &[ISRAEL_POLICE, MINISTRY_OF_HEALTH, FIRE_AND_RESCUE];

pub fn group_by_authority(matches: &[String], index: &CatalogIndex) -> Vec<AuthorityGroup> {
    CANONICAL_AUTHORITIES
        .iter()
        .filter_map(|&authority| {
            let rules: Vec<ObligationEntry> = matches
                .iter()
                .filter_map(|id| index.get(id).map(|rule| (id, rule)))
                .filter(|(_, rule)| rule.authority() == Some(authority))
                .map(|(id, rule)| ObligationEntry {
                    rule_id: id.clone(),
                    title: rule.title().unwrap_or(UNKNOWN_TITLE).to_string(),
                    description: rule.description().unwrap_or(MISSING_DETAILS).to_string(),
                    priority: rule.priority,
                    source_ref: rule.source_ref().unwrap_or(MISSING_SOURCE_REF).to_string(),
                })
                .collect();

            (!rules.is_empty()).then(|| AuthorityGroup {
                authority: authority.to_string(),
                rules,
            })
        })
        .collect()
}
