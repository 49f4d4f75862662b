/// Next-step action plan.
///
/// Two paths, chosen only by whether the report carries recommendations:
/// - non-empty `recommendations`: one action per recommendation, the first two `high`,
///   each bundling the whole match set;
/// - otherwise: `ACTION_TABLE`, evaluated top to bottom.
///
/// Either way the plan is cut to `MAX_ACTIONS` by dropping the tail.
use std::sync::OnceLock;

use regex::Regex;

use crate::catalog::CatalogIndex;
use crate::model::{ActionItem, Priority, Report, Rule, FIRE_AND_RESCUE, MINISTRY_OF_HEALTH};
use crate::synthesis::distinct_authorities;

pub const MAX_ACTIONS: usize = 7;
const HIGH_PRIORITY_RECOMMENDATIONS: usize = 2;

/// A match paired with its catalog entry, if any.
struct ResolvedMatch<'a> {
    id: &'a str,
    rule: Option<&'a Rule>,
}

impl ResolvedMatch<'_> {
    fn authority(&self) -> Option<&str> {
        self.rule.and_then(|r| r.authority())
    }
}

/// What one table row bundles into its action.
enum Bundle {
    /// Matches accepted by the predicate; no action when none are.
    Matching(fn(&ResolvedMatch<'_>) -> bool),
    /// One action per distinct authority, in first-seen order.
    PerAuthority,
    /// The whole match set.
    All,
}

struct ActionTemplate {
    bundle: Bundle,
    priority: Priority,
    text: fn(Option<&str>, usize) -> String,
}

const ACTION_TABLE: &[ActionTemplate] = &[
    ActionTemplate {
        bundle: Bundle::Matching(is_video_surveillance),
        priority: Priority::High,
        text: surveillance_text,
    },
    ActionTemplate {
        bundle: Bundle::Matching(is_fire_safety),
        priority: Priority::High,
        text: fire_inspection_text,
    },
    ActionTemplate {
        bundle: Bundle::Matching(is_health),
        priority: Priority::High,
        text: health_inspection_text,
    },
    ActionTemplate {
        bundle: Bundle::PerAuthority,
        priority: Priority::Medium,
        text: contact_authority_text,
    },
    ActionTemplate {
        bundle: Bundle::All,
        priority: Priority::Medium,
        text: documentation_text,
    },
];

fn surveillance_text(_: Option<&str>, _: usize) -> String {
    "Book a licensed installer to bring video surveillance up to police requirements".to_string()
}

fn fire_inspection_text(_: Option<&str>, _: usize) -> String {
    format!("Schedule a fire safety inspection with {FIRE_AND_RESCUE}")
}

fn health_inspection_text(_: Option<&str>, _: usize) -> String {
    format!("Schedule a {MINISTRY_OF_HEALTH} pre-inspection of the kitchen and food areas")
}

fn contact_authority_text(authority: Option<&str>, _: usize) -> String {
    format!(
        "Contact {} to confirm your licensing requirements",
        authority.unwrap_or("the authority")
    )
}

fn documentation_text(_: Option<&str>, count: usize) -> String {
    format!("Gather documentation and certificates for all {count} requirements")
}

fn surveillance_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)\b(cctv|surveillance)\b").expect("valid regex"))
}

fn is_video_surveillance(m: &ResolvedMatch<'_>) -> bool {
    let pattern = surveillance_pattern();
    pattern.is_match(m.id) || m.rule.is_some_and(|r| pattern.is_match(&r.title))
}

fn is_fire_safety(m: &ResolvedMatch<'_>) -> bool {
    m.authority() == Some(FIRE_AND_RESCUE)
}

fn is_health(m: &ResolvedMatch<'_>) -> bool {
    m.authority() == Some(MINISTRY_OF_HEALTH)
}

pub fn plan_actions(
    matches: &[String],
    index: &CatalogIndex,
    report: Option<&Report>,
) -> Vec<ActionItem> {
    if matches.is_empty() {
        return Vec::new();
    }

    match report {
        Some(r) if !r.recommendations.is_empty() => {
            from_recommendations(&r.recommendations, matches)
        }
        _ => from_table(matches, index),
    }
}

fn from_recommendations(recommendations: &[String], matches: &[String]) -> Vec<ActionItem> {
    recommendations
        .iter()
        .take(MAX_ACTIONS)
        .enumerate()
        .map(|(i, text)| ActionItem {
            text: text.clone(),
            rule_ids: matches.to_vec(),
            priority: if i < HIGH_PRIORITY_RECOMMENDATIONS {
                Priority::High
            } else {
                Priority::Medium
            },
        })
        .collect()
}

fn from_table(matches: &[String], index: &CatalogIndex) -> Vec<ActionItem> {
    let resolved: Vec<ResolvedMatch<'_>> = matches
        .iter()
        .map(|id| ResolvedMatch {
            id,
            rule: index.get(id),
        })
        .collect();

    let mut actions = Vec::new();
    for template in ACTION_TABLE {
        match template.bundle {
            Bundle::Matching(accepts) => {
                let rule_ids: Vec<String> = resolved
                    .iter()
                    .filter(|m| accepts(m))
                    .map(|m| m.id.to_string())
                    .collect();
                if !rule_ids.is_empty() {
                    actions.push(ActionItem {
                        text: (template.text)(None, rule_ids.len()),
                        rule_ids,
                        priority: template.priority,
                    });
                }
            }
            Bundle::PerAuthority => {
                for authority in distinct_authorities(matches, index) {
                    let rule_ids: Vec<String> = resolved
                        .iter()
                        .filter(|m| m.authority() == Some(authority.as_str()))
                        .map(|m| m.id.to_string())
                        .collect();
                    actions.push(ActionItem {
                        text: (template.text)(Some(&authority), rule_ids.len()),
                        rule_ids,
                        priority: template.priority,
                    });
                }
            }
            Bundle::All => {
                actions.push(ActionItem {
                    text: (template.text)(None, matches.len()),
                    rule_ids: matches.to_vec(),
                    priority: template.priority,
                });
            }
        }
    }

    actions.truncate(MAX_ACTIONS);
    actions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{ids, rule, sample_catalog};
    use crate::model::ISRAEL_POLICE;
    use crate::synthesis::synthesize_report;

    fn five_authority_catalog() -> CatalogIndex {
        CatalogIndex::build(vec![
            rule("R-Municipality-Signage", "Signage permit", "Municipality", Priority::Low),
            rule("R-Fire-Extinguishers", "Fire extinguishers", FIRE_AND_RESCUE, Priority::High),
            rule("R-Police-CCTV-Resolution", "CCTV backup", ISRAEL_POLICE, Priority::High),
            rule(
                "R-Env-Grease-Trap",
                "Grease trap",
                "Ministry of Environmental Protection",
                Priority::Medium,
            ),
            rule("R-Labor-First-Aid", "First aid kit", "Ministry of Labor", Priority::Medium),
        ])
    }

    fn texts(actions: &[ActionItem]) -> Vec<&str> {
        actions.iter().map(|a| a.text.as_str()).collect()
    }

    #[test]
    fn empty_matches_empty_plan() {
        let index = CatalogIndex::build(sample_catalog());
        assert!(plan_actions(&[], &index, None).is_empty());

        let report = synthesize_report(&[], &index);
        assert!(plan_actions(&[], &index, Some(&report)).is_empty());
    }

    #[test]
    fn table_order_and_cap() {
        let index = five_authority_catalog();
        let matches = ids(&[
            "R-Municipality-Signage",
            "R-Fire-Extinguishers",
            "R-Police-CCTV-Resolution",
            "R-Env-Grease-Trap",
            "R-Labor-First-Aid",
        ]);

        let actions = plan_actions(&matches, &index, None);

        assert_eq!(actions.len(), MAX_ACTIONS);
        assert_eq!(actions[0].rule_ids, vec!["R-Police-CCTV-Resolution"]);
        assert_eq!(actions[0].priority, Priority::High);
        assert!(actions[0].text.contains("video surveillance"));
        assert_eq!(actions[1].rule_ids, vec!["R-Fire-Extinguishers"]);
        assert_eq!(actions[1].priority, Priority::High);

        let contacts: Vec<&str> = texts(&actions[2..]);
        assert_eq!(
            contacts,
            vec![
                "Contact Municipality to confirm your licensing requirements",
                "Contact Fire and Rescue Services to confirm your licensing requirements",
                "Contact Israel Police to confirm your licensing requirements",
                "Contact Ministry of Environmental Protection to confirm your licensing requirements",
                "Contact Ministry of Labor to confirm your licensing requirements",
            ]
        );
        assert!(actions[2..].iter().all(|a| a.priority == Priority::Medium));
        // The documentation action is the eighth and falls off the end.
        assert!(!actions.iter().any(|a| a.text.starts_with("Gather")));
    }

    #[test]
    fn short_plan_keeps_documentation_step() {
        let index = CatalogIndex::build(sample_catalog());
        let matches = ids(&[
            "R-MoH-Water-Quality",
            "R-Police-CCTV-Placement",
            "R-Ghost",
        ]);

        let actions = plan_actions(&matches, &index, None);

        assert_eq!(actions.len(), 5);
        assert_eq!(actions[0].rule_ids, vec!["R-Police-CCTV-Placement"]);
        assert_eq!(actions[1].rule_ids, vec!["R-MoH-Water-Quality"]);
        assert_eq!(actions[1].priority, Priority::High);
        assert_eq!(actions[2].rule_ids, vec!["R-MoH-Water-Quality"]);
        assert_eq!(actions[3].rule_ids, vec!["R-Police-CCTV-Placement"]);
        let docs = &actions[4];
        assert_eq!(docs.rule_ids, matches);
        assert_eq!(docs.text, "Gather documentation and certificates for all 3 requirements");
    }

    #[test]
    fn surveillance_matches_on_title() {
        let index = CatalogIndex::build(vec![rule(
            "R-Police-Cam-7",
            "Surveillance retention period",
            ISRAEL_POLICE,
            Priority::Medium,
        )]);
        let actions = plan_actions(&ids(&["R-Police-Cam-7"]), &index, None);
        assert_eq!(actions[0].priority, Priority::High);
        assert_eq!(actions[0].rule_ids, vec!["R-Police-Cam-7"]);
    }

    #[test]
    fn unresolved_matches_only_reach_documentation() {
        let actions = plan_actions(&ids(&["R-Ghost"]), &CatalogIndex::empty(), None);
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].rule_ids, vec!["R-Ghost"]);
    }

    #[test]
    fn recommendations_take_precedence() {
        let index = CatalogIndex::build(sample_catalog());
        let matches = ids(&["R-Police-CCTV-Resolution", "R-MoH-Water-Quality"]);
        let mut report = synthesize_report(&matches, &index);
        report.recommendations = vec![
            "Call the installer".to_string(),
            "Book the inspection".to_string(),
            "Order signage".to_string(),
            "Train staff".to_string(),
        ];

        let actions = plan_actions(&matches, &index, Some(&report));

        assert_eq!(actions.len(), 4);
        assert_eq!(
            texts(&actions),
            vec!["Call the installer", "Book the inspection", "Order signage", "Train staff"]
        );
        let priorities: Vec<Priority> = actions.iter().map(|a| a.priority).collect();
        assert_eq!(
            priorities,
            vec![Priority::High, Priority::High, Priority::Medium, Priority::Medium]
        );
        assert!(actions.iter().all(|a| a.rule_ids == matches));
    }

    #[test]
    fn empty_recommendations_use_table() {
        let index = CatalogIndex::build(sample_catalog());
        let matches = ids(&["R-Police-CCTV-Resolution"]);
        let mut report = synthesize_report(&matches, &index);
        report.recommendations.clear();

        let actions = plan_actions(&matches, &index, Some(&report));

        assert!(actions[0].text.contains("video surveillance"));
    }

    #[test]
    fn long_recommendation_list_is_capped() {
        let index = CatalogIndex::build(sample_catalog());
        let matches = ids(&["R-MoH-Water-Quality"]);
        let mut report = synthesize_report(&matches, &index);
        report.recommendations = (1..=10).map(|i| format!("step {i}")).collect();

        let actions = plan_actions(&matches, &index, Some(&report));

        assert_eq!(actions.len(), MAX_ACTIONS);
        assert_eq!(actions.last().unwrap().text, "step 7");
    }
}
