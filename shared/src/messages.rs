//! Progress messages pushed to subscribers of an analysis run

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier for one analysis run (scan or single-record)
pub type RunId = Uuid;

/// Updates published on the progress channel while a run executes.
///
/// `Progress` counts are cumulative: a subscriber only needs the latest
/// update to know where the run stands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScanUpdate {
    Started {
        run_id: RunId,
        total: usize,
    },

    Progress {
        run_id: RunId,
        processed: usize,
        added: usize,
        updated: usize,
    },

    Completed {
        run_id: RunId,
        processed: usize,
        added: usize,
        updated: usize,
    },

    /// Run-level catastrophic failure; partial counts already published stand
    Failed {
        run_id: RunId,
        message: String,
    },
}

impl ScanUpdate {
    pub fn run_id(&self) -> RunId {
        match self {
            ScanUpdate::Started { run_id, .. }
            | ScanUpdate::Progress { run_id, .. }
            | ScanUpdate::Completed { run_id, .. }
            | ScanUpdate::Failed { run_id, .. } => *run_id,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ScanUpdate::Completed { .. } | ScanUpdate::Failed { .. })
    }
}
