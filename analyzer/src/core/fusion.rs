//! Weighted fusion of domain assessments into a composite score

use shared::{BusinessRecord, DomainKind, DomainQuartet};

use crate::core::sanitize::{clamp, round3, SCORE_CEILING};

/// Sentinel cap for payback when profit is zero, negative, or tiny
pub const PAYBACK_SENTINEL_YEARS: f64 = 99.0;

/// Scores derived from the four domain results plus record financials
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FusedScores {
    pub composite: f64,
    pub cap_rate: f64,
    pub payback_years: f64,
}

/// Annual profit over asking price; zero when either side makes the
/// ratio meaningless
pub fn capitalization_rate(record: &BusinessRecord) -> f64 {
    if record.asking_price <= 0.0 || record.annual_profit <= 0.0 {
        return 0.0;
    }
    round3(clamp(
        record.annual_profit / record.asking_price,
        0.0,
        SCORE_CEILING,
        0.0,
    ))
}

/// Years of profit needed to recoup the asking price, capped at the
/// sentinel so zero or negative profit never yields inf/NaN
pub fn payback_years(record: &BusinessRecord) -> f64 {
    if record.asking_price <= 0.0 || record.annual_profit <= 0.0 {
        return PAYBACK_SENTINEL_YEARS;
    }
    let years = record.asking_price / record.annual_profit;
    round3(clamp(years, 0.0, PAYBACK_SENTINEL_YEARS, PAYBACK_SENTINEL_YEARS))
}

/// Fuse the four settled domain assessments.
///
/// Deterministic and order-independent: the quartet is keyed by domain,
/// so task completion order cannot influence the result. Risk is
/// inverted to a safety score before weighting.
pub fn fuse(record: &BusinessRecord, domains: &DomainQuartet) -> FusedScores {
    let weighted: f64 = DomainKind::ALL
        .iter()
        .map(|kind| {
            let score = domains.get(*kind).score;
            let contribution = match kind {
                DomainKind::Risk => 1.0 - score,
                _ => score,
            };
            kind.weight() * contribution
        })
        .sum();

    FusedScores {
        composite: round3(clamp(weighted, 0.0, 1.0, 0.0)),
        cap_rate: capitalization_rate(record),
        payback_years: payback_years(record),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{DomainAssessment, Provenance};
    use uuid::Uuid;

    fn record(asking: f64, revenue: f64, profit: f64) -> BusinessRecord {
        BusinessRecord {
            id: Uuid::nil(),
            name: "Test Co".to_string(),
            sector: "services".to_string(),
            location: "Austin, TX".to_string(),
            asking_price: asking,
            annual_revenue: revenue,
            annual_profit: profit,
        }
    }

    fn assessment(domain: DomainKind, score: f64) -> DomainAssessment {
        DomainAssessment {
            domain,
            score,
            findings: vec![],
            provenance: Provenance::Provider,
        }
    }

    fn quartet(financial: f64, strategic: f64, market: f64, risk: f64) -> DomainQuartet {
        DomainQuartet {
            financial: assessment(DomainKind::Financial, financial),
            strategic: assessment(DomainKind::Strategic, strategic),
            market: assessment(DomainKind::Market, market),
            risk: assessment(DomainKind::Risk, risk),
        }
    }

    #[test]
    fn test_composite_weighting_with_risk_inversion() {
        let fused = fuse(&record(1_000_000.0, 2_000_000.0, 250_000.0), &quartet(0.8, 0.6, 0.5, 0.3));
        // 0.3*0.8 + 0.3*0.6 + 0.2*0.5 + 0.2*0.7 = 0.66
        assert_eq!(fused.composite, 0.66);
    }

    #[test]
    fn test_capitalization_rate_and_payback() {
        let fused = fuse(&record(2_800_000.0, 3_500_000.0, 1_000_000.0), &quartet(0.5, 0.5, 0.5, 0.5));
        assert_eq!(fused.cap_rate, 0.357);
        assert_eq!(fused.payback_years, 2.8);
    }

    #[test]
    fn test_zero_profit_hits_sentinel() {
        let fused = fuse(&record(2_800_000.0, 3_500_000.0, 0.0), &quartet(0.5, 0.5, 0.5, 0.5));
        assert_eq!(fused.cap_rate, 0.0);
        assert_eq!(fused.payback_years, PAYBACK_SENTINEL_YEARS);
    }

    #[test]
    fn test_negative_profit_hits_sentinel() {
        let fused = fuse(&record(2_800_000.0, 3_500_000.0, -50_000.0), &quartet(0.5, 0.5, 0.5, 0.5));
        assert_eq!(fused.cap_rate, 0.0);
        assert_eq!(fused.payback_years, PAYBACK_SENTINEL_YEARS);
    }

    #[test]
    fn test_zero_asking_price_defaults() {
        let fused = fuse(&record(0.0, 3_500_000.0, 1_000_000.0), &quartet(0.5, 0.5, 0.5, 0.5));
        assert_eq!(fused.cap_rate, 0.0);
        assert_eq!(fused.payback_years, PAYBACK_SENTINEL_YEARS);
    }

    #[test]
    fn test_payback_clamped_to_sentinel() {
        let fused = fuse(&record(100_000_000.0, 1_000_000.0, 100.0), &quartet(0.5, 0.5, 0.5, 0.5));
        assert_eq!(fused.payback_years, PAYBACK_SENTINEL_YEARS);
    }

    #[test]
    fn test_composite_stays_in_unit_range() {
        let fused = fuse(&record(1.0, 1.0, 1.0), &quartet(1.0, 1.0, 1.0, 0.0));
        assert_eq!(fused.composite, 1.0);
        let fused = fuse(&record(1.0, 1.0, 1.0), &quartet(0.0, 0.0, 0.0, 1.0));
        assert_eq!(fused.composite, 0.0);
    }
}
