//! Shared types for the acquisition analysis system
//!
//! Contains the data model, error taxonomy, and progress messages shared
//! between the analysis engine and its collaborators. Engine-internal
//! types stay in the analyzer crate.

pub mod errors;
pub mod logging;
pub mod messages;
pub mod types;

pub use errors::*;
pub use types::*;

pub use messages::{RunId, ScanUpdate};
