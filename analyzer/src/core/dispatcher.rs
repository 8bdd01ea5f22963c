//! Concurrent fan-out of domain analyses and batch scheduling
//!
//! One task per analysis domain, joined at a barrier: the dispatcher
//! never short-circuits on the first failure, because a failed domain
//! settles as a fallback assessment instead of an error. Batches of
//! records run concurrently within a batch and serially across batches.

use chrono::Utc;
use futures_util::future::join_all;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::core::fallback::fallback_assessment;
use crate::core::fusion::fuse;
use crate::core::normalize::extract_payload;
use crate::core::prompt::domain_prompt;
use crate::core::retry::execute_with_backoff;
use crate::core::sanitize::unit_score;
use crate::error::{AnalyzerError, AnalyzerResult};
use crate::services::narrative::synthesize;
use crate::traits::{ProgressSink, ProviderClient, RecordStore};
use crate::types::{EngineConfig, RunPhase, SaveOutcome};
use shared::messages::{RunId, ScanUpdate};
use shared::{
    BusinessRecord, CompositeAssessment, Confidence, DomainAssessment, DomainKind, DomainQuartet,
    Provenance,
};

/// Final counts for a completed scan run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanSummary {
    pub run_id: RunId,
    pub processed: usize,
    pub added: usize,
    pub updated: usize,
}

/// The analysis orchestration engine.
///
/// Owns its configuration and collaborator handles explicitly; no
/// process-wide state, so runs are deterministic under test doubles.
pub struct AnalysisEngine<C, S, P>
where
    C: ProviderClient + 'static,
    S: RecordStore + 'static,
    P: ProgressSink + 'static,
{
    config: EngineConfig,
    client: Arc<C>,
    store: Arc<S>,
    progress: Arc<P>,
}

impl<C, S, P> AnalysisEngine<C, S, P>
where
    C: ProviderClient + 'static,
    S: RecordStore + 'static,
    P: ProgressSink + 'static,
{
    pub fn new(config: EngineConfig, client: C, store: S, progress: P) -> Self {
        Self {
            config,
            client: Arc::new(client),
            store: Arc::new(store),
            progress: Arc::new(progress),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Analyze one record: fan out all four domains, join at the
    /// barrier, fuse, and synthesize narrative.
    ///
    /// Infallible by design — every failure along a domain chain settles
    /// as a fallback assessment, so the barrier is satisfied in bounded
    /// time and an assessment is always produced.
    pub async fn analyze_record(&self, record: &BusinessRecord) -> CompositeAssessment {
        debug!(
            "🧭 Run phase {:?} -> {:?} for '{}'",
            RunPhase::Created,
            RunPhase::Dispatching,
            record.name
        );

        let handles: Vec<_> = DomainKind::ALL
            .iter()
            .map(|kind| {
                let kind = *kind;
                let client = Arc::clone(&self.client);
                let config = self.config.clone();
                let record = record.clone();
                tokio::spawn(
                    async move { analyze_domain(kind, &record, client.as_ref(), &config).await },
                )
            })
            .collect();

        let mut slots: [Option<DomainAssessment>; 4] = [None, None, None, None];
        for (kind, settled) in DomainKind::ALL.iter().zip(join_all(handles).await) {
            match settled {
                Ok(assessment) => slots[kind.index()] = Some(assessment),
                Err(e) => warn!("💥 {} analysis task aborted: {}", kind, e),
            }
        }

        // Every slot settles; an aborted task degrades to fallback like
        // any other domain failure.
        let record_ref = record;
        let mut take = |kind: DomainKind| {
            slots[kind.index()]
                .take()
                .unwrap_or_else(|| fallback_assessment(kind, record_ref))
        };
        let domains = DomainQuartet {
            financial: take(DomainKind::Financial),
            strategic: take(DomainKind::Strategic),
            market: take(DomainKind::Market),
            risk: take(DomainKind::Risk),
        };
        debug!(
            "🧭 Run phase {:?} -> {:?} for '{}'",
            RunPhase::Dispatching,
            RunPhase::AllSettled,
            record.name
        );

        let fused = fuse(record, &domains);
        debug!(
            "🧭 Run phase {:?} -> {:?} for '{}' (composite {:.3})",
            RunPhase::AllSettled,
            RunPhase::Fused,
            record.name,
            fused.composite
        );

        let narrative = synthesize(self.client.as_ref(), &self.config, record, &fused).await;
        let confidence = Confidence::from_fallback_count(domains.fallback_count());

        CompositeAssessment {
            record_id: record.id,
            domains,
            composite_score: fused.composite,
            cap_rate: fused.cap_rate,
            payback_years: fused.payback_years,
            confidence,
            thesis: narrative.thesis,
            summary: narrative.summary,
            analyzed_at: Utc::now(),
        }
    }

    /// Analyze every pending record in rate-limited batches, publishing
    /// cumulative progress after each record.
    pub async fn run_scan(&self, run_id: RunId) -> AnalyzerResult<ScanSummary> {
        let result = self.scan_inner(run_id).await;
        if let Err(e) = &result {
            self.progress
                .publish(ScanUpdate::Failed {
                    run_id,
                    message: e.to_string(),
                })
                .await;
        }
        result
    }

    async fn scan_inner(&self, run_id: RunId) -> AnalyzerResult<ScanSummary> {
        let records = self.store.pending_records().await?;
        info!("🚀 Scan {} starting: {} record(s)", run_id, records.len());
        self.progress
            .publish(ScanUpdate::Started {
                run_id,
                total: records.len(),
            })
            .await;

        let mut processed = 0usize;
        let mut added = 0usize;
        let mut updated = 0usize;

        let batch_size = self.config.batch_size.max(1);
        let mut batches = records.chunks(batch_size).peekable();

        while let Some(batch) = batches.next() {
            let assessments = join_all(batch.iter().map(|record| self.analyze_record(record))).await;

            for assessment in &assessments {
                match self.store.save_assessment(assessment).await? {
                    SaveOutcome::Added => added += 1,
                    SaveOutcome::Updated => updated += 1,
                }
                processed += 1;
                self.progress
                    .publish(ScanUpdate::Progress {
                        run_id,
                        processed,
                        added,
                        updated,
                    })
                    .await;
            }

            if batches.peek().is_some() {
                tokio::time::sleep(self.config.batch_delay).await;
            }
        }

        self.progress
            .publish(ScanUpdate::Completed {
                run_id,
                processed,
                added,
                updated,
            })
            .await;
        info!(
            "✅ Scan {} complete: {} processed ({} added, {} updated)",
            run_id, processed, added, updated
        );

        Ok(ScanSummary {
            run_id,
            processed,
            added,
            updated,
        })
    }

    /// Analyze one stored record by id
    pub async fn run_single(&self, run_id: RunId, record_id: Uuid) -> AnalyzerResult<CompositeAssessment> {
        let result = self.single_inner(run_id, record_id).await;
        if let Err(e) = &result {
            self.progress
                .publish(ScanUpdate::Failed {
                    run_id,
                    message: e.to_string(),
                })
                .await;
        }
        result
    }

    async fn single_inner(
        &self,
        run_id: RunId,
        record_id: Uuid,
    ) -> AnalyzerResult<CompositeAssessment> {
        let record = self
            .store
            .record(record_id)
            .await?
            .ok_or(AnalyzerError::RecordNotFound { id: record_id })?;

        self.progress
            .publish(ScanUpdate::Started { run_id, total: 1 })
            .await;

        let assessment = self.analyze_record(&record).await;
        let outcome = self.store.save_assessment(&assessment).await?;
        let (added, updated) = match outcome {
            SaveOutcome::Added => (1, 0),
            SaveOutcome::Updated => (0, 1),
        };

        self.progress
            .publish(ScanUpdate::Progress {
                run_id,
                processed: 1,
                added,
                updated,
            })
            .await;
        self.progress
            .publish(ScanUpdate::Completed {
                run_id,
                processed: 1,
                added,
                updated,
            })
            .await;

        Ok(assessment)
    }

    /// Kick off a scan in the background, returning its run id
    pub fn start_scan(self: &Arc<Self>) -> RunId {
        let run_id = Uuid::new_v4();
        let engine = Arc::clone(self);
        tokio::spawn(async move {
            if let Err(e) = engine.run_scan(run_id).await {
                tracing::error!("❌ Scan {} failed: {}", run_id, e);
            }
        });
        run_id
    }

    /// Kick off a single-record analysis in the background
    pub fn start_analyze_one(self: &Arc<Self>, record_id: Uuid) -> RunId {
        let run_id = Uuid::new_v4();
        let engine = Arc::clone(self);
        tokio::spawn(async move {
            if let Err(e) = engine.run_single(run_id, record_id).await {
                tracing::error!("❌ Analysis {} failed: {}", run_id, e);
            }
        });
        run_id
    }
}

/// One domain's pipeline: prompt -> retry(provider) -> normalize ->
/// sanitize, degrading to the closed-form fallback on any failure.
pub(crate) async fn analyze_domain<C>(
    kind: DomainKind,
    record: &BusinessRecord,
    client: &C,
    config: &EngineConfig,
) -> DomainAssessment
where
    C: ProviderClient + ?Sized,
{
    let model = config.model_for(kind);
    let prompt = domain_prompt(kind, record);

    let raw = match execute_with_backoff(
        || client.complete(&model, &prompt),
        config.max_attempts,
        config.retry_base_delay,
    )
    .await
    {
        Ok(raw) => raw,
        Err(terminal) => {
            warn!(
                "🔄 {} analysis for '{}' exhausted {} attempt(s) ({}), using fallback",
                kind, record.name, terminal.attempts, terminal.last
            );
            return fallback_assessment(kind, record);
        }
    };

    match extract_payload(&raw) {
        Ok(payload) => DomainAssessment {
            domain: kind,
            score: unit_score(payload.score),
            findings: payload.findings,
            provenance: Provenance::Provider,
        },
        Err(e) => {
            warn!(
                "🔄 {} response for '{}' failed normalization ({}), using fallback",
                kind, record.name, e
            );
            fallback_assessment(kind, record)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::MockProviderClient;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use std::time::Duration;
    use shared::ProviderFailure;

    fn record() -> BusinessRecord {
        BusinessRecord {
            id: Uuid::new_v4(),
            name: "Hill Country HVAC".to_string(),
            sector: "home services".to_string(),
            location: "Austin, TX".to_string(),
            asking_price: 2_800_000.0,
            annual_revenue: 3_500_000.0,
            annual_profit: 1_000_000.0,
        }
    }

    fn fast_config() -> EngineConfig {
        EngineConfig {
            max_attempts: 3,
            retry_base_delay: Duration::from_millis(1),
            batch_delay: Duration::from_millis(1),
            ..EngineConfig::default()
        }
    }

    #[tokio::test]
    async fn test_domain_pipeline_provider_sourced() {
        let mut client = MockProviderClient::new();
        client.expect_complete().times(1).returning(|_, _| {
            Ok("```json\n{\"score\": 1.4, \"findings\": [\"solid book\"]}\n```".to_string())
        });

        let assessment =
            analyze_domain(DomainKind::Financial, &record(), &client, &fast_config()).await;
        assert_eq!(assessment.provenance, Provenance::Provider);
        // Out-of-range provider score is clamped, not rejected
        assert_eq!(assessment.score, 1.0);
        assert_eq!(assessment.findings, vec!["solid book".to_string()]);
    }

    #[tokio::test]
    async fn test_domain_pipeline_unparseable_falls_back() {
        let mut client = MockProviderClient::new();
        client
            .expect_complete()
            .times(1)
            .returning(|_, _| Ok("I would rather not say.".to_string()));

        let assessment =
            analyze_domain(DomainKind::Market, &record(), &client, &fast_config()).await;
        assert_eq!(assessment.provenance, Provenance::Fallback);
        assert_eq!(assessment.domain, DomainKind::Market);
    }

    #[tokio::test]
    async fn test_domain_pipeline_retries_then_succeeds() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let mut client = MockProviderClient::new();
        client.expect_complete().returning(move |_, _| {
            if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                Err(ProviderFailure::RateLimited)
            } else {
                Ok("{\"score\": 0.62}".to_string())
            }
        });

        let assessment =
            analyze_domain(DomainKind::Strategic, &record(), &client, &fast_config()).await;
        assert_eq!(assessment.provenance, Provenance::Provider);
        assert_eq!(assessment.score, 0.62);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_domain_pipeline_terminal_failure_falls_back() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let mut client = MockProviderClient::new();
        client.expect_complete().returning(move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(ProviderFailure::ServiceUnavailable)
        });

        let assessment =
            analyze_domain(DomainKind::Risk, &record(), &client, &fast_config()).await;
        assert_eq!(assessment.provenance, Provenance::Fallback);
        // Attempt budget respected
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
