//! Prompt construction for domain analyses and narrative text

use shared::{BusinessRecord, DomainKind};

use crate::core::fusion::FusedScores;

/// Build the analysis prompt for one domain.
///
/// Every domain prompt demands the same JSON shape so the normalizer
/// only has to know one payload layout.
pub fn domain_prompt(kind: DomainKind, record: &BusinessRecord) -> String {
    let focus = match kind {
        DomainKind::Financial => {
            "profitability, margins, earnings quality, and whether the asking price is justified by cash flow"
        }
        DomainKind::Strategic => {
            "competitive moat, owner dependence, growth levers, and operational transferability"
        }
        DomainKind::Market => {
            "market size, local demand trends, customer concentration, and sector outlook"
        }
        DomainKind::Risk => {
            "downside exposure: key-person risk, revenue durability, regulatory or sector headwinds"
        }
    };

    format!(
        "You are evaluating a small-business acquisition.\n\
         Business: {name} ({sector}) in {location}\n\
         Asking price: ${asking:.0}\n\
         Annual revenue: ${revenue:.0}\n\
         Annual net profit: ${profit:.0}\n\n\
         Assess the {kind} dimension only, focusing on {focus}.\n\
         Respond with a single JSON object and nothing else:\n\
         {{\"score\": <0.0-1.0>, \"findings\": [\"<finding>\", ...]}}\n\
         For the risk dimension a higher score means MORE risk.",
        name = record.name,
        sector = record.sector,
        location = record.location,
        asking = record.asking_price,
        revenue = record.annual_revenue,
        profit = record.annual_profit,
    )
}

/// Prompt for the one-paragraph investment thesis
pub fn thesis_prompt(record: &BusinessRecord, fused: &FusedScores) -> String {
    format!(
        "Write a one-paragraph investment thesis for acquiring {name}, a {sector} \
         business in {location} listed at ${asking:.0}. Composite score {composite:.3}, \
         capitalization rate {cap:.1}%, payback {payback:.1} years. \
         Plain prose only, no headings or lists.",
        name = record.name,
        sector = record.sector,
        location = record.location,
        asking = record.asking_price,
        composite = fused.composite,
        cap = fused.cap_rate * 100.0,
        payback = fused.payback_years,
    )
}

/// Prompt for the two-sentence executive summary
pub fn summary_prompt(record: &BusinessRecord, fused: &FusedScores) -> String {
    format!(
        "Summarize in two sentences whether {name} ({sector}, {location}) is worth \
         pursuing at ${asking:.0} given a composite score of {composite:.3} and a \
         {payback:.1}-year payback. Plain prose only.",
        name = record.name,
        sector = record.sector,
        location = record.location,
        asking = record.asking_price,
        composite = fused.composite,
        payback = fused.payback_years,
    )
}
