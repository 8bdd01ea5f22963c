//! Core analysis pipeline: pure logic plus the dispatcher

pub mod dispatcher;
pub mod fallback;
pub mod fusion;
pub mod normalize;
pub mod prompt;
pub mod retry;
pub mod sanitize;

pub use dispatcher::{AnalysisEngine, ScanSummary};
pub use fallback::fallback_assessment;
pub use fusion::{fuse, FusedScores, PAYBACK_SENTINEL_YEARS};
pub use normalize::{extract_payload, DomainPayload};
pub use retry::execute_with_backoff;
pub use sanitize::{clamp, round3, unit_score, SCORE_CEILING};
