use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use sha2::{Digest, Sha256};

use crate::error::CoreError;

pub const ISRAEL_POLICE: &str = "Israel Police";
pub const MINISTRY_OF_HEALTH: &str = "Ministry of Health";
pub const FIRE_AND_RESCUE: &str = "Fire and Rescue Services";

pub const UNKNOWN_TITLE: &str = "Unknown Requirement";
pub const MISSING_DETAILS: &str = "Details not available";
pub const MISSING_SOURCE_REF: &str = "N/A";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Lenient parse: anything other than high/medium/low is `Medium`.
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "high" => Priority::High,
            "low" => Priority::Low,
            _ => Priority::Medium,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(Priority::parse_lenient).unwrap_or_default())
    }
}

/// A regulatory rule from the catalog.
///
/// String fields left empty by the catalog are treated as absent by every
/// projection, which substitutes placeholder text instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Rule {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub desc_he: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub desc_en: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub authority: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub source_ref: String,
    /// Eligibility triggers, evaluated upstream. Carried through untouched.
    #[serde(default)]
    pub triggers: serde_json::Value,
}

impl Rule {
    pub fn title(&self) -> Option<&str> {
        non_empty(&self.title)
    }

    pub fn description(&self) -> Option<&str> {
        non_empty(&self.desc_en)
    }

    pub fn authority(&self) -> Option<&str> {
        non_empty(&self.authority)
    }

    pub fn source_ref(&self) -> Option<&str> {
        non_empty(&self.source_ref)
    }
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn non_empty(s: &str) -> Option<&str> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Profile {
    /// Floor area in square meters.
    pub size_m2: u32,
    /// Seating capacity.
    pub seats: u32,
    #[serde(default)]
    pub serves_alcohol: bool,
    #[serde(default)]
    pub uses_gas: bool,
    #[serde(default)]
    pub offers_delivery: bool,
    #[serde(default)]
    pub has_misting: bool,
}

impl Profile {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.size_m2 == 0 {
            return Err(CoreError::InvalidProfile(
                "size_m2 must be greater than zero".to_string(),
            ));
        }
        if self.seats == 0 {
            return Err(CoreError::InvalidProfile(
                "seats must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReportSection {
    pub title: String,
    pub content: String,
    pub rule_ids: Vec<String>,
    pub priority: Priority,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Report {
    pub summary: String,
    pub sections: Vec<ReportSection>,
    pub total_rules: usize,
    pub high_priority_count: usize,
    pub recommendations: Vec<String>,
    pub authorities: Vec<String>,
}

impl Report {
    /// Hex SHA-256 of the JSON encoding. Equal reports share a fingerprint.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        // Serializing plain structs and strings cannot fail.
        if let Ok(bytes) = serde_json::to_vec(self) {
            hasher.update(&bytes);
        }
        format!("{:x}", hasher.finalize())
    }

    /// Checks that every section only references rules from the match set.
    pub fn validate_references(&self, matches: &[String]) -> Result<(), CoreError> {
        let unknown: Vec<&str> = self
            .sections
            .iter()
            .flat_map(|s| s.rule_ids.iter())
            .filter(|id| !matches.contains(id))
            .map(|id| id.as_str())
            .collect();

        if unknown.is_empty() {
            Ok(())
        } else {
            Err(CoreError::MalformedReport(format!(
                "sections reference rules outside the match set: {}",
                unknown.join(", ")
            )))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReportOrigin {
    Upstream,
    Synthesized,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ActionItem {
    pub text: String,
    pub rule_ids: Vec<String>,
    pub priority: Priority,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ObligationEntry {
    pub rule_id: String,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub source_ref: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AuthorityGroup {
    pub authority: String,
    pub rules: Vec<ObligationEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CitationRow {
    pub rule_id: String,
    pub title: String,
    pub authority: String,
    pub source_ref: String,
}
