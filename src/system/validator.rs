use super::locator::SystemDevice;
use crate::{EraseError, EraseResult};
use std::path::Path;

pub struct TargetValidator;

impl TargetValidator {
    /// Clear a candidate device for erasure. All steps are mandatory and
    /// short-circuit on the first failure; a clearance is valid only for the
    /// current run and is never cached.
    pub fn validate(candidate: &Path, system: &SystemDevice) -> EraseResult<()> {
        let system_id = match system {
            SystemDevice::Known(id) => id,
            SystemDevice::Unknown => {
                return Err(EraseError::Validation(
                    "cannot determine system device, refusing to proceed".to_string(),
                ))
            }
        };

        if !candidate.exists() {
            return Err(EraseError::Validation(format!(
                "device not found: {}",
                candidate.display()
            )));
        }

        if Self::whole_device_identity(candidate) == *system_id {
            return Err(EraseError::Validation(format!(
                "target {} is the system device",
                candidate.display()
            )));
        }

        Ok(())
    }

    /// Whole-device identity of a candidate: symlinks resolved, partition
    /// suffix normalized. The comparison against the system device is
    /// equality on this identity, never a path-prefix match.
    fn whole_device_identity(candidate: &Path) -> String {
        let resolved =
            std::fs::canonicalize(candidate).unwrap_or_else(|_| candidate.to_path_buf());

        #[cfg(windows)]
        {
            super::locator::normalize_drive_root(&resolved.to_string_lossy())
        }
        #[cfg(not(windows))]
        {
            super::locator::normalize_whole_device(&resolved.to_string_lossy())
        }
    }
}
