//! In-memory record store
//!
//! The production record store lives outside this engine; this
//! implementation backs the CLI binary and tests with the same
//! added/updated semantics the external store exposes.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::AnalyzerResult;
use crate::traits::RecordStore;
use crate::types::SaveOutcome;
use shared::{BusinessRecord, CompositeAssessment};

/// Thread-safe in-process store for records and their assessments
#[derive(Default)]
pub struct MemoryRecordStore {
    records: Arc<RwLock<HashMap<Uuid, BusinessRecord>>>,
    assessments: Arc<RwLock<HashMap<Uuid, CompositeAssessment>>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with records awaiting analysis
    pub async fn insert_record(&self, record: BusinessRecord) {
        let mut records = self.records.write().await;
        records.insert(record.id, record);
    }

    pub async fn assessment(&self, record_id: Uuid) -> Option<CompositeAssessment> {
        let assessments = self.assessments.read().await;
        assessments.get(&record_id).cloned()
    }

    pub async fn assessment_count(&self) -> usize {
        let assessments = self.assessments.read().await;
        assessments.len()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn pending_records(&self) -> AnalyzerResult<Vec<BusinessRecord>> {
        let records = self.records.read().await;
        let mut pending: Vec<BusinessRecord> = records.values().cloned().collect();
        // Stable ordering keeps batch composition deterministic
        pending.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(pending)
    }

    async fn record(&self, id: Uuid) -> AnalyzerResult<Option<BusinessRecord>> {
        let records = self.records.read().await;
        Ok(records.get(&id).cloned())
    }

    async fn save_assessment(&self, assessment: &CompositeAssessment) -> AnalyzerResult<SaveOutcome> {
        let mut assessments = self.assessments.write().await;
        let outcome = if assessments.contains_key(&assessment.record_id) {
            SaveOutcome::Updated
        } else {
            SaveOutcome::Added
        };
        assessments.insert(assessment.record_id, assessment.clone());
        Ok(outcome)
    }
}
