pub mod audit;
pub mod device;
pub mod fill;
pub mod orchestrator;
pub mod overwrite;
pub mod system;
pub mod ui;
pub mod vendor;

// Re-export the orchestrator entry points for convenience
pub use orchestrator::{erase_device, ConfirmationGate, EraseOrchestrator, RunState};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EraseError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("insufficient privileges: {0}")]
    Privilege(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("vendor command failed: {0}")]
    VendorCommand(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type EraseResult<T> = Result<T, EraseError>;

/// Terminal outcome of one erase run. A run is never retried automatically;
/// a new run is a fresh invocation with fresh validation.
#[derive(Debug)]
pub enum EraseOutcome {
    Completed,
    Cancelled,
    Aborted(EraseError),
}

impl EraseOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            EraseOutcome::Completed => "completed",
            EraseOutcome::Cancelled => "cancelled",
            EraseOutcome::Aborted(_) => "aborted",
        }
    }
}

/// Run configuration handed to the orchestrator at construction. There is no
/// process-wide default target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EraseConfig {
    pub device: PathBuf,
    pub expose_hidden_areas: bool,
    pub vendor_secure_erase: bool,
    pub require_elevation: bool,
}

impl EraseConfig {
    pub fn new(device: impl Into<PathBuf>) -> Self {
        Self {
            device: device.into(),
            expose_hidden_areas: true,
            vendor_secure_erase: true,
            require_elevation: true,
        }
    }
}

/// Outcome of a single overwrite pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassReport {
    pub pass: u32,
    pub pattern: String,
    pub blocks_written: u64,
    pub bytes_written: u64,
}

/// Serializable summary of one erase run, written as JSON on request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: String,
    pub device: String,
    pub capacity_bytes: u64,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub finished_at: Option<chrono::DateTime<chrono::Utc>>,
    pub outcome: String,
    pub failure: Option<String>,
    pub passes: Vec<PassReport>,
}

impl RunReport {
    pub(crate) fn begin(device: &Path) -> Self {
        Self {
            run_id: uuid::Uuid::new_v4().to_string(),
            device: device.display().to_string(),
            capacity_bytes: 0,
            started_at: chrono::Utc::now(),
            finished_at: None,
            outcome: "in-progress".to_string(),
            failure: None,
            passes: Vec::new(),
        }
    }
}
