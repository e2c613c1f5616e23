// Erase orchestrator
//
// Sequences validation, the confirmation gate, the best-effort vendor steps
// and the overwrite passes, and defines overall success and failure. This is
// the only holder of mutable run-level state; every other component is a
// stateless function of its inputs.

use crate::device::BlockDevice;
use crate::overwrite::engine::OverwriteEngine;
use crate::overwrite::pattern::dod_sequence;
use crate::system::locator::SystemLocator;
use crate::system::validator::TargetValidator;
use crate::vendor::hidden_areas::HiddenAreaController;
use crate::vendor::secure_erase::SecureEraseDriver;
use crate::{EraseConfig, EraseError, EraseOutcome, RunReport};

/// Operator acknowledgement collected before any destructive operation.
/// Anything but an explicit yes is a decline.
pub trait ConfirmationGate {
    fn confirm(&self, device: &BlockDevice) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Validating,
    AwaitingConfirmation,
    ExposingHiddenAreas,
    SecureErasing,
    Overwriting,
    Done,
    Aborted,
}

pub struct EraseOrchestrator {
    config: EraseConfig,
    state: RunState,
    report: RunReport,
}

impl EraseOrchestrator {
    pub fn new(config: EraseConfig) -> Self {
        let report = RunReport::begin(&config.device);
        Self {
            config,
            state: RunState::Idle,
            report,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn report(&self) -> &RunReport {
        &self.report
    }

    /// Drive one erase run to a terminal outcome. The device is never
    /// touched before validation and confirmation have both cleared it, and
    /// every invocation validates afresh.
    pub fn execute(&mut self, gate: &dyn ConfirmationGate) -> EraseOutcome {
        self.state = RunState::Idle;
        self.report = RunReport::begin(&self.config.device);

        let outcome = self.run(gate);

        self.report.finished_at = Some(chrono::Utc::now());
        self.report.outcome = outcome.label().to_string();
        match &outcome {
            EraseOutcome::Completed => {
                self.state = RunState::Done;
                tracing::info!("run {} completed", self.report.run_id);
            }
            EraseOutcome::Cancelled => {
                self.state = RunState::Aborted;
                tracing::info!("run {} cancelled by the operator", self.report.run_id);
            }
            EraseOutcome::Aborted(e) => {
                self.state = RunState::Aborted;
                self.report.failure = Some(e.to_string());
                tracing::error!("run {} aborted: {}", self.report.run_id, e);
            }
        }
        outcome
    }

    fn run(&mut self, gate: &dyn ConfirmationGate) -> EraseOutcome {
        if self.config.require_elevation && !is_elevated() {
            return EraseOutcome::Aborted(EraseError::Privilege(
                "raw device access and vendor commands require elevated privileges".to_string(),
            ));
        }

        self.transition(RunState::Validating);
        let system = SystemLocator::locate();
        if let Err(e) = TargetValidator::validate(&self.config.device, &system) {
            return EraseOutcome::Aborted(e);
        }
        let device = match BlockDevice::probe(&self.config.device) {
            Ok(device) => device,
            Err(e) => return EraseOutcome::Aborted(e),
        };
        self.report.capacity_bytes = device.capacity();
        tracing::info!(
            "validated target {}: {} bytes",
            device.path().display(),
            device.capacity()
        );

        self.transition(RunState::AwaitingConfirmation);
        if !gate.confirm(&device) {
            tracing::info!("confirmation declined; no data was written");
            return EraseOutcome::Cancelled;
        }

        let device_path = device.path().to_string_lossy().into_owned();

        self.transition(RunState::ExposingHiddenAreas);
        if self.config.expose_hidden_areas {
            // Best-effort hardening: a device without these vendor features
            // must not block erasure of the area it does expose.
            if let Err(e) = HiddenAreaController::expose_full_capacity(&device_path) {
                tracing::warn!("hidden-area exposure failed: {}", e);
            }
        } else {
            tracing::info!("hidden-area exposure skipped by configuration");
        }

        self.transition(RunState::SecureErasing);
        if self.config.vendor_secure_erase {
            // The overwrite passes below remain the guaranteed fallback.
            if let Err(e) = SecureEraseDriver::secure_erase(&device_path) {
                tracing::warn!("vendor secure erase failed: {}", e);
            }
        } else {
            tracing::info!("vendor secure erase skipped by configuration");
        }

        self.transition(RunState::Overwriting);
        match OverwriteEngine::run_passes(&device, &dod_sequence()) {
            Ok(passes) => {
                self.report.passes = passes;
                EraseOutcome::Completed
            }
            Err(e) => EraseOutcome::Aborted(e),
        }
    }

    fn transition(&mut self, next: RunState) {
        tracing::info!("state transition: {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}

/// Convenience entry point for a single erase run.
pub fn erase_device(config: EraseConfig, gate: &dyn ConfirmationGate) -> EraseOutcome {
    EraseOrchestrator::new(config).execute(gate)
}

#[cfg(unix)]
pub fn is_elevated() -> bool {
    unsafe { libc::geteuid() == 0 }
}

#[cfg(windows)]
pub fn is_elevated() -> bool {
    // `net session` succeeds only in an elevated shell.
    std::process::Command::new("net")
        .args(["session"])
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}
