//! Engine-internal types and configuration

use shared::{DomainKind, ProviderId, ProviderModel};
use std::collections::HashMap;
use std::time::Duration;

/// Configuration for an analysis engine instance.
///
/// Passed in at construction; the engine holds no process-wide state, so
/// two engines with different configs can coexist in one process.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Attempt budget per provider call (1 = no retries)
    pub max_attempts: u32,

    /// Base retry delay; the delay before retry k is `base * k`
    pub retry_base_delay: Duration,

    /// Per-request HTTP timeout
    pub request_timeout: Duration,

    /// Records analyzed concurrently within one batch
    pub batch_size: usize,

    /// Pause between batches, to respect provider rate limits
    pub batch_delay: Duration,

    /// Which provider/model answers each analysis domain
    pub domain_models: HashMap<DomainKind, ProviderModel>,

    /// Provider/model used for thesis and summary text
    pub narrative_model: ProviderModel,
}

impl EngineConfig {
    pub fn model_for(&self, kind: DomainKind) -> ProviderModel {
        self.domain_models
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| ProviderModel::with_default_model(default_provider(kind)))
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        let domain_models = DomainKind::ALL
            .iter()
            .map(|kind| {
                (
                    *kind,
                    ProviderModel::with_default_model(default_provider(*kind)),
                )
            })
            .collect();

        Self {
            max_attempts: 3,
            retry_base_delay: Duration::from_millis(500),
            request_timeout: Duration::from_secs(30),
            batch_size: 5,
            batch_delay: Duration::from_secs(2),
            domain_models,
            narrative_model: ProviderModel::with_default_model(ProviderId::OpenAI),
        }
    }
}

/// Default provider assignment per domain.
///
/// Each dimension goes to a distinct provider where possible; with three
/// providers and four domains, risk shares OpenAI.
fn default_provider(kind: DomainKind) -> ProviderId {
    match kind {
        DomainKind::Financial => ProviderId::OpenAI,
        DomainKind::Strategic => ProviderId::Anthropic,
        DomainKind::Market => ProviderId::Gemini,
        DomainKind::Risk => ProviderId::OpenAI,
    }
}

/// Lifecycle of one per-record analysis run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Created,
    Dispatching,
    AllSettled,
    Fused,
}

/// What saving an assessment did in the record store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// First assessment for this record
    Added,
    /// Replaced a previous assessment (re-analysis)
    Updated,
}
