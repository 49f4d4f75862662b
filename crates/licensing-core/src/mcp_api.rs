use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::model::{Priority, Rule};
use crate::orchestrator::{Assessment, AssessmentState};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetRuleParams {
    /// Rule identifier such as "R-Police-CCTV-Resolution".
    pub rule_id: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListAuthorityParams {
    /// Regulating authority such as "Israel Police" or "Ministry of Health".
    pub authority: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RuleDetailResponse {
    pub id: String,
    pub title: String,
    pub description_en: String,
    pub description_he: String,
    pub authority: String,
    pub priority: Priority,
    pub source_ref: String,
}

impl From<&Rule> for RuleDetailResponse {
    fn from(rule: &Rule) -> Self {
        Self {
            id: rule.id.clone(),
            title: rule.title.clone(),
            description_en: rule.desc_en.clone(),
            description_he: rule.desc_he.clone(),
            authority: rule.authority.clone(),
            priority: rule.priority,
            source_ref: rule.source_ref.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RuleSummary {
    pub id: String,
    pub title: String,
    pub priority: Priority,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AuthorityListResponse {
    pub authority: String,
    pub rules: Vec<RuleSummary>,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct AssessmentStatusResponse {
    /// One of "idle", "ready" or "failed".
    pub status: String,
    pub assessment: Option<Assessment>,
    pub error: Option<String>,
}

impl From<AssessmentState> for AssessmentStatusResponse {
    fn from(state: AssessmentState) -> Self {
        match state {
            AssessmentState::Idle => Self {
                status: "idle".to_string(),
                assessment: None,
                error: None,
            },
            AssessmentState::Ready(assessment) => Self {
                status: "ready".to_string(),
                assessment: Some(Assessment::clone(&assessment)),
                error: None,
            },
            AssessmentState::Failed { message } => Self {
                status: "failed".to_string(),
                assessment: None,
                error: Some(message),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ReloadCatalogResponse {
    pub loaded: bool,
    pub rule_count: usize,
    /// Set when the fetch failed and the previous index was kept.
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct OkResponse {
    pub ok: bool,
}
