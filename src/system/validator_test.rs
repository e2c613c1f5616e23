/// Tests for target validation
///
/// Covers the three mandatory, short-circuiting steps: unknown system device,
/// candidate existence, and whole-device identity comparison.
use super::locator::SystemDevice;
use super::validator::TargetValidator;
use crate::EraseError;
use std::path::Path;

fn reason(err: EraseError) -> String {
    match err {
        EraseError::Validation(reason) => reason,
        other => panic!("expected a validation failure, got {:?}", other),
    }
}

#[test]
fn unknown_system_device_rejects_everything() {
    // Even an existing candidate must be rejected when the system device
    // cannot be determined.
    let candidate = tempfile::NamedTempFile::new().expect("temp file");
    let err = TargetValidator::validate(candidate.path(), &SystemDevice::Unknown)
        .expect_err("unknown system device must reject");
    assert!(reason(err).contains("cannot determine system device"));
}

#[test]
fn missing_candidate_rejected_with_not_found_reason() {
    let system = SystemDevice::Known("/dev/sda".to_string());
    let err = TargetValidator::validate(Path::new("/nonexistent/diskpurge-target"), &system)
        .expect_err("missing candidate must reject");

    let reason = reason(err);
    assert!(reason.contains("not found"), "got: {}", reason);
    assert!(
        !reason.contains("system device"),
        "a missing device must never be reported as the system device: {}",
        reason
    );
}

#[cfg(unix)]
#[test]
fn candidate_matching_system_device_rejected() {
    // /dev/null exists everywhere and normalizes to itself, so it can stand
    // in for the resolved system device.
    let system = SystemDevice::Known("/dev/null".to_string());
    let err = TargetValidator::validate(Path::new("/dev/null"), &system)
        .expect_err("system device candidate must reject");
    assert!(reason(err).contains("system device"));
}

#[test]
fn candidate_resolving_to_system_identity_rejected() {
    // Identity comparison happens after symlink resolution, so any path
    // formatting of the system device is caught.
    let candidate = tempfile::NamedTempFile::new().expect("temp file");
    let identity = std::fs::canonicalize(candidate.path())
        .expect("canonicalize")
        .to_string_lossy()
        .into_owned();

    let err = TargetValidator::validate(candidate.path(), &SystemDevice::Known(identity))
        .expect_err("matching identity must reject");
    assert!(reason(err).contains("system device"));
}

#[test]
fn distinct_existing_candidate_is_cleared() {
    let candidate = tempfile::NamedTempFile::new().expect("temp file");
    let system = SystemDevice::Known("/dev/sda".to_string());
    TargetValidator::validate(candidate.path(), &system).expect("distinct device must clear");
}

#[test]
fn path_prefix_overlap_is_not_a_match() {
    // A legitimate target sharing a textual prefix with the system identifier
    // must not be rejected: comparison is identity, not prefix.
    let dir = tempfile::tempdir().expect("temp dir");
    let candidate = dir.path().join("data1");
    std::fs::write(&candidate, b"x").expect("seed file");

    let system = SystemDevice::Known(
        std::fs::canonicalize(dir.path())
            .expect("canonicalize")
            .join("data")
            .to_string_lossy()
            .into_owned(),
    );
    TargetValidator::validate(&candidate, &system)
        .expect("prefix overlap alone must not reject");
}
