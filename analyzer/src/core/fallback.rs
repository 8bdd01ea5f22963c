//! Deterministic fallback assessments when a provider is unusable
//!
//! Pure closed-form heuristics over the record's financials. These are
//! provisional defaults rather than a documented valuation model, kept
//! in one place so a better model can replace them wholesale. Bounded by
//! construction: every score goes through the unit sanitizer.

use shared::{BusinessRecord, DomainAssessment, DomainKind, Provenance};

use crate::core::fusion::{capitalization_rate, payback_years};
use crate::core::sanitize::unit_score;

/// Revenue at which the market-scale heuristic saturates
const MARKET_SCALE_REVENUE: f64 = 5_000_000.0;

/// Payback horizon at which the risk heuristic saturates
const RISK_HORIZON_YEARS: f64 = 20.0;

/// Formula-derived substitute for a failed domain analysis.
///
/// Pure function of its inputs: identical records yield byte-identical
/// assessments, findings text included.
pub fn fallback_assessment(kind: DomainKind, record: &BusinessRecord) -> DomainAssessment {
    let cap_rate = capitalization_rate(record);
    let margin = profit_margin(record);
    let payback = payback_years(record);

    let (score, findings) = match kind {
        DomainKind::Financial => {
            // A 50% cap rate saturates the score
            let score = unit_score(cap_rate * 2.0);
            let findings = vec![
                format!(
                    "Capitalization rate of {:.1}% at the {:.0} asking price",
                    cap_rate * 100.0,
                    record.asking_price
                ),
                format!("Net margin of {:.1}% on reported revenue", margin * 100.0),
            ];
            (score, findings)
        }
        DomainKind::Strategic => {
            let score = unit_score(0.3 + margin);
            let findings = vec![format!(
                "{} operation in {} with {:.1}% margins as the main strategic lever",
                record.sector, record.location, margin * 100.0
            )];
            (score, findings)
        }
        DomainKind::Market => {
            let score = unit_score(record.annual_revenue / MARKET_SCALE_REVENUE);
            let findings = vec![format!(
                "Revenue of {:.0} relative to a {:.0} small-market ceiling",
                record.annual_revenue, MARKET_SCALE_REVENUE
            )];
            (score, findings)
        }
        DomainKind::Risk => {
            // Longer payback, higher risk
            let score = unit_score(payback / RISK_HORIZON_YEARS);
            let findings = vec![format!(
                "Estimated payback of {:.1} years against a {:.0}-year risk horizon",
                payback, RISK_HORIZON_YEARS
            )];
            (score, findings)
        }
    };

    DomainAssessment {
        domain: kind,
        score,
        findings,
        provenance: Provenance::Fallback,
    }
}

fn profit_margin(record: &BusinessRecord) -> f64 {
    if record.annual_revenue <= 0.0 || record.annual_profit <= 0.0 {
        return 0.0;
    }
    unit_score(record.annual_profit / record.annual_revenue)
}
