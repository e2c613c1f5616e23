/// End-to-end erase runs over mock devices
///
/// Exercises the orchestrator state machine, the confirmation gate, and the
/// overwrite engine's coverage guarantees together.
use diskpurge::overwrite::BLOCK_SIZE;
use diskpurge::{EraseError, EraseOrchestrator, EraseOutcome, RunState};

#[path = "common/mod.rs"]
mod common;

use common::{mock_device, test_config, AlwaysConfirm, NeverConfirm, SEED_BYTE};

#[test]
fn completed_run_overwrites_every_block() {
    // 40960 bytes at 4096-byte blocks: exactly 10 blocks per pass.
    let device = mock_device(40960);
    let mut orchestrator = EraseOrchestrator::new(test_config(device.path()));

    let outcome = orchestrator.execute(&AlwaysConfirm);
    assert!(matches!(outcome, EraseOutcome::Completed), "got {:?}", outcome);
    assert_eq!(orchestrator.state(), RunState::Done);

    let report = orchestrator.report();
    assert_eq!(report.capacity_bytes, 40960);
    assert_eq!(report.outcome, "completed");
    assert!(report.failure.is_none());
    assert!(report.finished_at.is_some());

    for pass in &report.passes {
        assert_eq!(pass.blocks_written, 10);
        assert_eq!(pass.bytes_written, 40960);
    }

    // The last pass is random data repeated per block: the seed byte pattern
    // is gone, and the device did not grow.
    let content = std::fs::read(device.path()).expect("read back");
    assert_eq!(content.len(), 40960);
    assert!(content.iter().any(|&b| b != SEED_BYTE));
    assert_eq!(&content[..BLOCK_SIZE], &content[BLOCK_SIZE..2 * BLOCK_SIZE]);
}

#[test]
fn pass_order_recorded_as_zeros_ones_random() {
    let device = mock_device(2 * BLOCK_SIZE);
    let mut orchestrator = EraseOrchestrator::new(test_config(device.path()));

    let outcome = orchestrator.execute(&AlwaysConfirm);
    assert!(matches!(outcome, EraseOutcome::Completed));

    let observed: Vec<&str> = orchestrator
        .report()
        .passes
        .iter()
        .map(|p| p.pattern.as_str())
        .collect();
    assert_eq!(observed, ["zeros", "ones", "random"]);

    let numbers: Vec<u32> = orchestrator.report().passes.iter().map(|p| p.pass).collect();
    assert_eq!(numbers, [1, 2, 3]);
}

#[test]
fn declined_confirmation_writes_nothing() {
    let device = mock_device(4 * BLOCK_SIZE);
    let mut orchestrator = EraseOrchestrator::new(test_config(device.path()));

    let outcome = orchestrator.execute(&NeverConfirm);
    assert!(matches!(outcome, EraseOutcome::Cancelled), "got {:?}", outcome);
    assert_eq!(orchestrator.state(), RunState::Aborted);
    assert_eq!(orchestrator.report().outcome, "cancelled");
    assert!(orchestrator.report().passes.is_empty());

    let content = std::fs::read(device.path()).expect("read back");
    assert!(
        content.iter().all(|&b| b == SEED_BYTE),
        "a declined run must leave every byte untouched"
    );
}

#[test]
fn missing_target_aborts_with_not_found_before_confirmation() {
    let mut orchestrator =
        EraseOrchestrator::new(test_config(std::path::Path::new("/nonexistent/diskpurge-target")));

    // The gate would confirm, but validation must reject first.
    let outcome = orchestrator.execute(&AlwaysConfirm);
    match outcome {
        EraseOutcome::Aborted(EraseError::Validation(reason)) => {
            assert!(reason.contains("not found"), "got: {}", reason);
        }
        other => panic!("expected a validation abort, got {:?}", other),
    }
    assert_eq!(orchestrator.state(), RunState::Aborted);
    assert_eq!(orchestrator.report().outcome, "aborted");
    assert!(orchestrator.report().failure.is_some());
}

#[test]
fn rerunning_revalidates_and_produces_a_fresh_report() {
    let device = mock_device(2 * BLOCK_SIZE);
    let mut orchestrator = EraseOrchestrator::new(test_config(device.path()));

    let first = orchestrator.execute(&NeverConfirm);
    assert!(matches!(first, EraseOutcome::Cancelled));
    let first_id = orchestrator.report().run_id.clone();

    let second = orchestrator.execute(&AlwaysConfirm);
    assert!(matches!(second, EraseOutcome::Completed));
    assert_ne!(
        orchestrator.report().run_id,
        first_id,
        "each run must be a fresh invocation with fresh validation"
    );
    assert_eq!(orchestrator.report().passes.len(), 3);
}
