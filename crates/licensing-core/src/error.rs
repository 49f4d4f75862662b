/// Error types for the licensing core.
///
/// Catalog failures are non-fatal: the session keeps serving with whatever index it has.
/// Submission failures end that submission and are published to consumers. A malformed
/// upstream report is never surfaced; the orchestrator logs it and synthesizes instead.
use crate::client::ClientError;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("catalog load failed: {0}")]
    CatalogLoad(#[source] ClientError),

    #[error("assessment submission failed: {0}")]
    Submission(#[source] ClientError),

    #[error("malformed report: {0}")]
    MalformedReport(String),

    #[error("invalid profile: {0}")]
    InvalidProfile(String),
}
