//! Analyzer trait definitions for dependency injection

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AnalyzerResult;
use crate::types::SaveOutcome;
use shared::messages::ScanUpdate;
use shared::{BusinessRecord, CompositeAssessment, ProviderFailure, ProviderModel};

/// One-shot inference call against an external provider.
///
/// Exactly one outbound network call per invocation; retries are the
/// backoff controller's responsibility, not the client's.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// Send `prompt` to the given provider/model and return the raw text
    /// extracted from that provider's response envelope.
    async fn complete(&self, model: &ProviderModel, prompt: &str) -> Result<String, ProviderFailure>;
}

/// External record store holding business records and their assessments
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Records awaiting analysis
    async fn pending_records(&self) -> AnalyzerResult<Vec<BusinessRecord>>;

    /// Look up a single record by id
    async fn record(&self, id: Uuid) -> AnalyzerResult<Option<BusinessRecord>>;

    /// Persist an assessment, replacing any previous one for the record
    async fn save_assessment(&self, assessment: &CompositeAssessment) -> AnalyzerResult<SaveOutcome>;
}

/// Push channel reporting run progress to a subscriber (typically a UI)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProgressSink: Send + Sync {
    /// Best-effort publish; a disconnected subscriber never fails a run
    async fn publish(&self, update: ScanUpdate);
}
