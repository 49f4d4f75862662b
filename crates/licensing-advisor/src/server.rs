use std::sync::Arc;

use rmcp::{
    Json, ServerHandler,
    handler::server::router::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::*,
    tool, tool_handler, tool_router,
};
use tracing::info;

use licensing_core::client::LicensingClient;
use licensing_core::mcp_api::{
    AssessmentStatusResponse, AuthorityListResponse, GetRuleParams, ListAuthorityParams,
    OkResponse, ReloadCatalogResponse, RuleDetailResponse, RuleSummary,
};
use licensing_core::model::Profile;
use licensing_core::orchestrator::{AssessmentOrchestrator, AssessmentState};

#[derive(Clone)]
pub struct LicensingAdvisorServer {
    orchestrator: Arc<AssessmentOrchestrator<LicensingClient>>,
    tool_router: ToolRouter<LicensingAdvisorServer>,
}

impl LicensingAdvisorServer {
    pub fn new(orchestrator: Arc<AssessmentOrchestrator<LicensingClient>>) -> Self {
        Self {
            orchestrator,
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_router]
impl LicensingAdvisorServer {
    #[tool(
        description = "Assess a restaurant profile (size in m2, seats, alcohol, gas, delivery, \
                       misting) and return the report, obligations by authority, next actions \
                       and citations."
    )]
    async fn assess_profile(
        &self,
        Parameters(profile): Parameters<Profile>,
    ) -> Result<Json<AssessmentStatusResponse>, String> {
        profile.validate().map_err(|e| e.to_string())?;
        info!(size_m2 = profile.size_m2, seats = profile.seats, "assess_profile tool invoked");

        let assessment = self
            .orchestrator
            .submit(&profile)
            .await
            .map_err(|e| e.to_string())?;

        Ok(Json(AssessmentStatusResponse::from(AssessmentState::Ready(assessment))))
    }

    #[tool(description = "Get the most recently published assessment, if any.")]
    async fn get_assessment(&self) -> Result<Json<AssessmentStatusResponse>, String> {
        Ok(Json(self.orchestrator.current().await.into()))
    }

    #[tool(description = "Clear the published assessment so a new one can start.")]
    async fn reset_assessment(&self) -> Result<Json<OkResponse>, String> {
        self.orchestrator.reset().await;
        Ok(Json(OkResponse { ok: true }))
    }

    #[tool(description = "Get a licensing rule by ID (e.g. 'R-Police-CCTV-Resolution').")]
    async fn get_rule(
        &self,
        Parameters(params): Parameters<GetRuleParams>,
    ) -> Result<Json<RuleDetailResponse>, String> {
        let rule_id = params.rule_id.trim().to_string();
        if rule_id.is_empty() {
            return Err("rule_id must not be empty".to_string());
        }

        let index = self.orchestrator.index().await;
        let rule = index
            .get(&rule_id)
            .ok_or_else(|| format!("rule not found: {rule_id}"))?;

        Ok(Json(RuleDetailResponse::from(rule)))
    }

    #[tool(description = "List the catalog rules enforced by one authority (e.g. 'Israel Police').")]
    async fn list_authority(
        &self,
        Parameters(params): Parameters<ListAuthorityParams>,
    ) -> Result<Json<AuthorityListResponse>, String> {
        let authority = params.authority.trim().to_string();
        if authority.is_empty() {
            return Err("authority must not be empty".to_string());
        }

        let index = self.orchestrator.index().await;
        let rules = index.rules_for_authority(&authority);
        let Some(first) = rules.first() else {
            return Err(format!(
                "unknown authority: '{authority}'. Available authorities: {}",
                index.authorities().join(", ")
            ));
        };

        Ok(Json(AuthorityListResponse {
            authority: first.authority.clone(),
            rules: rules
                .iter()
                .map(|r| RuleSummary {
                    id: r.id.clone(),
                    title: r.title.clone(),
                    priority: r.priority,
                })
                .collect(),
        }))
    }

    #[tool(description = "Refetch the rule catalog from the licensing backend.")]
    async fn reload_catalog(&self) -> Result<Json<ReloadCatalogResponse>, String> {
        info!("reload_catalog tool invoked");

        let response = match self.orchestrator.load_catalog().await {
            Ok(rule_count) => ReloadCatalogResponse {
                loaded: true,
                rule_count,
                error: None,
            },
            Err(e) => ReloadCatalogResponse {
                loaded: false,
                rule_count: self.orchestrator.index().await.len(),
                error: Some(e.to_string()),
            },
        };

        Ok(Json(response))
    }
}

#[tool_handler]
impl ServerHandler for LicensingAdvisorServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_06_18,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "licensing-advisor".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Restaurant licensing advisor. Use assess_profile with a business profile to get \
                 the matched requirements, a report, obligations grouped by authority and next \
                 actions. get_assessment returns the last result, reset_assessment clears it, \
                 get_rule and list_authority browse the catalog, reload_catalog refetches it."
                    .to_string(),
            ),
        }
    }
}
