/// Drives catalog loads and assessment submissions, and publishes the result.
///
/// Session state is the current catalog index plus the last published assessment. Both
/// are replaced whole when their call completes. Submissions are not serialized: if two
/// overlap, whichever finishes last is what `current()` returns.
use std::future::Future;
use std::sync::Arc;

use schemars::JsonSchema;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::actions::plan_actions;
use crate::catalog::CatalogIndex;
use crate::citations::project_citations;
use crate::client::{AssessmentResponse, ClientError};
use crate::error::CoreError;
use crate::grouping::group_by_authority;
use crate::model::{ActionItem, AuthorityGroup, CitationRow, Profile, Report, ReportOrigin, Rule};
use crate::summary::{compliance_risks, summarize, AssessmentSummary};
use crate::synthesis::synthesize_report;

/// The upstream licensing service: catalog source and rule matcher.
pub trait LicensingBackend: Send + Sync {
    fn fetch_catalog(&self) -> impl Future<Output = Result<Vec<Rule>, ClientError>> + Send;

    fn submit_assessment(
        &self,
        profile: &Profile,
    ) -> impl Future<Output = Result<AssessmentResponse, ClientError>> + Send;
}

/// A completed assessment with every view projected from the same inputs.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct Assessment {
    pub matches: Vec<String>,
    pub report: Report,
    pub report_origin: ReportOrigin,
    /// SHA-256 of `report`, for telling published reports apart.
    pub fingerprint: String,
    pub summary: AssessmentSummary,
    pub obligations: Vec<AuthorityGroup>,
    pub actions: Vec<ActionItem>,
    pub citations: Vec<CitationRow>,
    pub risks: Vec<String>,
}

impl Assessment {
    pub fn project(
        matches: Vec<String>,
        report: Report,
        report_origin: ReportOrigin,
        index: &CatalogIndex,
    ) -> Self {
        let summary = summarize(&report);
        let obligations = group_by_authority(&matches, index);
        let actions = plan_actions(&matches, index, Some(&report));
        let citations = project_citations(&matches, index);
        let fingerprint = report.fingerprint();

        Self {
            matches,
            report,
            report_origin,
            fingerprint,
            summary,
            obligations,
            actions,
            citations,
            risks: compliance_risks(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub enum AssessmentState {
    #[default]
    Idle,
    Ready(Arc<Assessment>),
    Failed {
        message: String,
    },
}

/// Picks the upstream report when it is complete and consistent, otherwise synthesizes one.
pub fn resolve_report(
    raw: Option<serde_json::Value>,
    matches: &[String],
    index: &CatalogIndex,
) -> (Report, ReportOrigin) {
    match raw.map(|value| parse_upstream_report(value, matches)) {
        Some(Ok(report)) => (report, ReportOrigin::Upstream),
        Some(Err(e)) => {
            warn!(error = %e, "upstream report rejected, synthesizing locally");
            (synthesize_report(matches, index), ReportOrigin::Synthesized)
        }
        None => {
            debug!("no upstream report, synthesizing locally");
            (synthesize_report(matches, index), ReportOrigin::Synthesized)
        }
    }
}

fn parse_upstream_report(value: serde_json::Value, matches: &[String]) -> Result<Report, CoreError> {
    let report: Report =
        serde_json::from_value(value).map_err(|e| CoreError::MalformedReport(e.to_string()))?;
    report.validate_references(matches)?;
    Ok(report)
}

struct Session {
    index: Arc<CatalogIndex>,
    published: AssessmentState,
}

pub struct AssessmentOrchestrator<B> {
    backend: B,
    session: RwLock<Session>,
}

impl<B: LicensingBackend> AssessmentOrchestrator<B> {
    /// Starts with an empty index; call `load_catalog` to populate it.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            session: RwLock::new(Session {
                index: Arc::new(CatalogIndex::empty()),
                published: AssessmentState::Idle,
            }),
        }
    }

    /// Fetches the catalog and swaps in a fresh index.
    ///
    /// On failure the current index is kept (empty on a first load) and lookups keep
    /// degrading to placeholders. The error is returned for reporting only.
    pub async fn load_catalog(&self) -> Result<usize, CoreError> {
        let rules = match self.backend.fetch_catalog().await {
            Ok(rules) => rules,
            Err(e) => {
                let err = CoreError::CatalogLoad(e);
                warn!(error = %err, "continuing with the current catalog index");
                return Err(err);
            }
        };

        let index = Arc::new(CatalogIndex::build(rules));
        let count = index.len();
        self.session.write().await.index = index;
        info!(rules = count, "catalog index replaced");
        Ok(count)
    }

    pub async fn index(&self) -> Arc<CatalogIndex> {
        Arc::clone(&self.session.read().await.index)
    }

    /// Submits one profile and publishes the outcome.
    ///
    /// A transport or status failure publishes `Failed` and returns the error without
    /// running synthesis. On success the published report is never absent.
    pub async fn submit(&self, profile: &Profile) -> Result<Arc<Assessment>, CoreError> {
        let response = match self.backend.submit_assessment(profile).await {
            Ok(response) => response,
            Err(e) => {
                let err = CoreError::Submission(e);
                warn!(error = %err, "assessment failed");
                self.publish(AssessmentState::Failed {
                    message: err.to_string(),
                })
                .await;
                return Err(err);
            }
        };

        let index = self.index().await;
        let (report, origin) = resolve_report(response.report, &response.matches, &index);
        let assessment = Arc::new(Assessment::project(response.matches, report, origin, &index));

        info!(
            matches = assessment.matches.len(),
            high_priority = assessment.report.high_priority_count,
            origin = ?assessment.report_origin,
            fingerprint = %assessment.fingerprint,
            "assessment published"
        );
        self.publish(AssessmentState::Ready(Arc::clone(&assessment))).await;
        Ok(assessment)
    }

    pub async fn current(&self) -> AssessmentState {
        self.session.read().await.published.clone()
    }

    /// Clears the published assessment so a new one can start.
    pub async fn reset(&self) {
        self.publish(AssessmentState::Idle).await;
    }

    async fn publish(&self, state: AssessmentState) {
        self.session.write().await.published = state;
    }
}
