/// Shared fixtures for end-to-end erase tests
///
/// Mock devices are regular temp files seeded with a recognizable byte so a
/// declined or aborted run can be checked for zero writes.
use diskpurge::device::BlockDevice;
use diskpurge::{ConfirmationGate, EraseConfig};
use std::io::Write;
use tempfile::NamedTempFile;

pub const SEED_BYTE: u8 = 0xA5;

pub fn mock_device(size: usize) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(&vec![SEED_BYTE; size]).expect("seed data");
    file.flush().expect("flush");
    file
}

/// Run configuration pointing at a mock device: no elevation requirement and
/// no vendor commands, so the run is hermetic.
pub fn test_config(device: &std::path::Path) -> EraseConfig {
    let mut config = EraseConfig::new(device);
    config.require_elevation = false;
    config.expose_hidden_areas = false;
    config.vendor_secure_erase = false;
    config
}

pub struct AlwaysConfirm;

impl ConfirmationGate for AlwaysConfirm {
    fn confirm(&self, _device: &BlockDevice) -> bool {
        true
    }
}

pub struct NeverConfirm;

impl ConfirmationGate for NeverConfirm {
    fn confirm(&self, _device: &BlockDevice) -> bool {
        false
    }
}
