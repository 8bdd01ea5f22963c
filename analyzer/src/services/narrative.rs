//! Narrative synthesis: investment thesis and executive summary
//!
//! One provider call per text artifact, each through the backoff
//! controller; terminal failure substitutes template text so an
//! assessment is never persisted without narrative.

use tracing::warn;

use crate::core::fusion::FusedScores;
use crate::core::prompt::{summary_prompt, thesis_prompt};
use crate::core::retry::execute_with_backoff;
use crate::traits::ProviderClient;
use crate::types::EngineConfig;
use shared::BusinessRecord;

/// Prose artifacts attached to a composite assessment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Narrative {
    pub thesis: String,
    pub summary: String,
}

/// Produce thesis and summary for a fused assessment.
///
/// The two artifacts fail independently: one can be provider-sourced
/// while the other falls back to template text.
pub async fn synthesize<C>(
    client: &C,
    config: &EngineConfig,
    record: &BusinessRecord,
    fused: &FusedScores,
) -> Narrative
where
    C: ProviderClient + ?Sized,
{
    let thesis = artifact(
        client,
        config,
        &thesis_prompt(record, fused),
        || fallback_thesis(record, fused),
        "thesis",
    )
    .await;

    let summary = artifact(
        client,
        config,
        &summary_prompt(record, fused),
        || fallback_summary(record, fused),
        "summary",
    )
    .await;

    Narrative { thesis, summary }
}

async fn artifact<C, F>(
    client: &C,
    config: &EngineConfig,
    prompt: &str,
    fallback: F,
    label: &str,
) -> String
where
    C: ProviderClient + ?Sized,
    F: FnOnce() -> String,
{
    let outcome = execute_with_backoff(
        || client.complete(&config.narrative_model, prompt),
        config.max_attempts,
        config.retry_base_delay,
    )
    .await;

    match outcome {
        Ok(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                warn!("📝 Provider returned empty {label}, using template text");
                fallback()
            } else {
                trimmed.to_string()
            }
        }
        Err(terminal) => {
            warn!(
                "📝 Narrative {} failed after {} attempt(s) ({}), using template text",
                label, terminal.attempts, terminal.last
            );
            fallback()
        }
    }
}

fn fallback_thesis(record: &BusinessRecord, fused: &FusedScores) -> String {
    format!(
        "{} is a {} business in {} listed at ${:.0} with annual net profit of ${:.0}. \
         At a {:.1}% capitalization rate the asking price is recouped in roughly {:.1} years, \
         and the fused analysis scores the opportunity {:.3} out of 1.0.",
        record.name,
        record.sector,
        record.location,
        record.asking_price,
        record.annual_profit,
        fused.cap_rate * 100.0,
        fused.payback_years,
        fused.composite,
    )
}

fn fallback_summary(record: &BusinessRecord, fused: &FusedScores) -> String {
    format!(
        "{} scores {:.3} overall with an estimated {:.1}-year payback. \
         Figures are derived from reported financials; provider commentary was unavailable.",
        record.name, fused.composite, fused.payback_years,
    )
}
