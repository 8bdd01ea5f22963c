//! Tests for the in-memory record store

use chrono::Utc;
use uuid::Uuid;

use crate::core::fallback::fallback_assessment;
use crate::services::record_store::MemoryRecordStore;
use crate::traits::RecordStore;
use crate::types::SaveOutcome;
use shared::{BusinessRecord, CompositeAssessment, Confidence, DomainKind, DomainQuartet};

fn record(name: &str) -> BusinessRecord {
    BusinessRecord {
        id: Uuid::new_v4(),
        name: name.to_string(),
        sector: "services".to_string(),
        location: "Boise, ID".to_string(),
        asking_price: 500_000.0,
        annual_revenue: 800_000.0,
        annual_profit: 120_000.0,
    }
}

fn assessment_for(record: &BusinessRecord) -> CompositeAssessment {
    let domains = DomainQuartet {
        financial: fallback_assessment(DomainKind::Financial, record),
        strategic: fallback_assessment(DomainKind::Strategic, record),
        market: fallback_assessment(DomainKind::Market, record),
        risk: fallback_assessment(DomainKind::Risk, record),
    };
    CompositeAssessment {
        record_id: record.id,
        domains,
        composite_score: 0.5,
        cap_rate: 0.24,
        payback_years: 4.167,
        confidence: Confidence::Minimal,
        thesis: "thesis".to_string(),
        summary: "summary".to_string(),
        analyzed_at: Utc::now(),
    }
}

#[tokio::test]
async fn test_pending_records_sorted_by_name() {
    let store = MemoryRecordStore::new();
    store.insert_record(record("Zeta Plumbing")).await;
    store.insert_record(record("Alpha Roofing")).await;

    let pending = store.pending_records().await.unwrap();
    assert_eq!(pending.len(), 2);
    assert_eq!(pending[0].name, "Alpha Roofing");
    assert_eq!(pending[1].name, "Zeta Plumbing");
}

#[tokio::test]
async fn test_save_is_added_then_updated() {
    let store = MemoryRecordStore::new();
    let rec = record("Alpha Roofing");
    store.insert_record(rec.clone()).await;

    let assessment = assessment_for(&rec);
    assert_eq!(
        store.save_assessment(&assessment).await.unwrap(),
        SaveOutcome::Added
    );
    // Re-analysis replaces, never mutates in place
    assert_eq!(
        store.save_assessment(&assessment).await.unwrap(),
        SaveOutcome::Updated
    );
    assert_eq!(store.assessment_count().await, 1);
}

#[tokio::test]
async fn test_record_lookup() {
    let store = MemoryRecordStore::new();
    let rec = record("Alpha Roofing");
    store.insert_record(rec.clone()).await;

    assert_eq!(store.record(rec.id).await.unwrap(), Some(rec));
    assert_eq!(store.record(Uuid::new_v4()).await.unwrap(), None);
}
