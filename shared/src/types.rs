//! Core types used throughout the acquisition analysis system

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Inference providers available in the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderId {
    OpenAI,
    Anthropic,
    Gemini,
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderId::OpenAI => write!(f, "openai"),
            ProviderId::Anthropic => write!(f, "anthropic"),
            ProviderId::Gemini => write!(f, "gemini"),
        }
    }
}

impl std::str::FromStr for ProviderId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(ProviderId::OpenAI),
            "anthropic" => Ok(ProviderId::Anthropic),
            "gemini" | "google" => Ok(ProviderId::Gemini),
            _ => Err(format!("Unknown provider: {s}")),
        }
    }
}

/// Provider plus the model to request from it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ProviderModel {
    pub provider: ProviderId,
    pub model: String,
}

impl ProviderModel {
    pub fn new(provider: ProviderId, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    pub fn with_default_model(provider: ProviderId) -> Self {
        let model = match provider {
            ProviderId::OpenAI => "gpt-4o-mini",
            ProviderId::Anthropic => "claude-3-sonnet",
            ProviderId::Gemini => "gemini-pro",
        };
        Self::new(provider, model)
    }
}

/// Analysis dimensions applied to every business record.
///
/// Closed set: fusion weights and the persisted assessment shape both
/// assume exactly these four domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainKind {
    Financial,
    Strategic,
    Market,
    Risk,
}

impl DomainKind {
    pub const ALL: [DomainKind; 4] = [
        DomainKind::Financial,
        DomainKind::Strategic,
        DomainKind::Market,
        DomainKind::Risk,
    ];

    /// Fixed convex fusion weight for this domain (weights sum to 1.0).
    /// The risk score is inverted to a safety score before weighting.
    pub fn weight(self) -> f64 {
        match self {
            DomainKind::Financial => 0.3,
            DomainKind::Strategic => 0.3,
            DomainKind::Market => 0.2,
            DomainKind::Risk => 0.2,
        }
    }

    pub fn index(self) -> usize {
        match self {
            DomainKind::Financial => 0,
            DomainKind::Strategic => 1,
            DomainKind::Market => 2,
            DomainKind::Risk => 3,
        }
    }
}

impl fmt::Display for DomainKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainKind::Financial => write!(f, "financial"),
            DomainKind::Strategic => write!(f, "strategic"),
            DomainKind::Market => write!(f, "market"),
            DomainKind::Risk => write!(f, "risk"),
        }
    }
}

/// Where a domain assessment came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// Extracted from a live provider response
    Provider,
    /// Computed by the deterministic closed-form fallback
    Fallback,
}

/// A candidate acquisition, produced upstream and read-only here
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessRecord {
    pub id: Uuid,
    pub name: String,
    pub sector: String,
    pub location: String,
    pub asking_price: f64,
    pub annual_revenue: f64,
    pub annual_profit: f64,
}

/// One domain's assessment of a business record.
///
/// `score` is always finite and in [0,1] by the time a value of this type
/// leaves the analysis pipeline; the precision sanitizer enforces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainAssessment {
    pub domain: DomainKind,
    pub score: f64,
    pub findings: Vec<String>,
    pub provenance: Provenance,
}

impl DomainAssessment {
    pub fn is_fallback(&self) -> bool {
        self.provenance == Provenance::Fallback
    }
}

/// Exactly one assessment per domain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainQuartet {
    pub financial: DomainAssessment,
    pub strategic: DomainAssessment,
    pub market: DomainAssessment,
    pub risk: DomainAssessment,
}

impl DomainQuartet {
    pub fn get(&self, kind: DomainKind) -> &DomainAssessment {
        match kind {
            DomainKind::Financial => &self.financial,
            DomainKind::Strategic => &self.strategic,
            DomainKind::Market => &self.market,
            DomainKind::Risk => &self.risk,
        }
    }

    /// How many domains had to fall back to formula-derived results
    pub fn fallback_count(&self) -> usize {
        DomainKind::ALL
            .iter()
            .filter(|kind| self.get(**kind).is_fallback())
            .count()
    }
}

/// Confidence in a composite assessment, derived from fallback provenance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    High,
    Medium,
    Low,
    Minimal,
}

impl Confidence {
    pub fn from_fallback_count(count: usize) -> Self {
        match count {
            0 => Confidence::High,
            1 => Confidence::Medium,
            2 => Confidence::Low,
            _ => Confidence::Minimal,
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Confidence::High => write!(f, "high"),
            Confidence::Medium => write!(f, "medium"),
            Confidence::Low => write!(f, "low"),
            Confidence::Minimal => write!(f, "minimal"),
        }
    }
}

/// The fused multi-domain assessment persisted for a business record.
///
/// Immutable once built; re-analysis produces a new value rather than
/// mutating in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeAssessment {
    pub record_id: Uuid,
    #[serde(flatten)]
    pub domains: DomainQuartet,
    pub composite_score: f64,
    pub cap_rate: f64,
    pub payback_years: f64,
    pub confidence: Confidence,
    pub thesis: String,
    pub summary: String,
    pub analyzed_at: DateTime<Utc>,
}
