//! Acquisition analysis orchestration engine
//!
//! Dispatches concurrent domain analyses (financial, strategic, market,
//! risk) to external inference providers, tolerantly extracts structured
//! results from their free-text responses, substitutes deterministic
//! fallback computations when a provider is unusable, and fuses the four
//! settled results into a single composite assessment with narrative.

pub mod core;
pub mod error;
pub mod services;
pub mod traits;
pub mod types;

// Re-export main types
pub use crate::core::{AnalysisEngine, ScanSummary};
pub use error::{AnalyzerError, AnalyzerResult, TerminalFailure};
pub use services::{
    ChannelProgressSink, HttpProviderClient, MemoryRecordStore, ProviderCredentials,
    ProviderEndpoints,
};
pub use traits::{ProgressSink, ProviderClient, RecordStore};
pub use types::{EngineConfig, RunPhase, SaveOutcome};
