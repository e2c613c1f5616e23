use crate::{EraseError, EraseResult};
use std::fs::{File, OpenOptions};
use std::io::{Seek, SeekFrom};
use std::path::{Path, PathBuf};

/// A cleared erase target. Capacity is discovered, never assumed; a raw write
/// handle is opened per pass and dropped at pass end. No value of this type
/// outlives a single erase run.
#[derive(Debug, Clone)]
pub struct BlockDevice {
    path: PathBuf,
    capacity: u64,
}

impl BlockDevice {
    /// Probe a candidate device: confirm it can be opened and discover its
    /// addressable capacity.
    pub fn probe(path: &Path) -> EraseResult<Self> {
        let mut handle = OpenOptions::new().read(true).open(path).map_err(|e| {
            EraseError::Validation(format!("cannot open {}: {}", path.display(), e))
        })?;

        let capacity = handle.seek(SeekFrom::End(0))?;
        if capacity == 0 {
            return Err(EraseError::Configuration(format!(
                "{} reports zero capacity",
                path.display()
            )));
        }

        #[cfg(unix)]
        if !is_block_device(path) {
            tracing::debug!("{} is not a block device", path.display());
        }

        Ok(Self {
            path: path.to_path_buf(),
            capacity,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Open a fresh handle for one raw sequential write pass.
    pub(crate) fn open_for_write(&self) -> std::io::Result<File> {
        OpenOptions::new().write(true).open(&self.path)
    }
}

#[cfg(unix)]
fn is_block_device(path: &Path) -> bool {
    use nix::sys::stat::{stat, SFlag};

    match stat(path) {
        Ok(st) => st.st_mode & SFlag::S_IFMT.bits() == SFlag::S_IFBLK.bits(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn probe_discovers_capacity() {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(&[0xAAu8; 8192]).expect("seed data");

        let device = BlockDevice::probe(file.path()).expect("probe");
        assert_eq!(device.capacity(), 8192);
        assert_eq!(device.path(), file.path());
    }

    #[test]
    fn probe_rejects_missing_path() {
        let err = BlockDevice::probe(std::path::Path::new("/nonexistent/diskpurge-dev"))
            .expect_err("missing path must not probe");
        assert!(matches!(err, EraseError::Validation(_)));
    }

    #[test]
    fn probe_rejects_zero_capacity() {
        let file = NamedTempFile::new().expect("temp file");
        let err = BlockDevice::probe(file.path()).expect_err("empty file must not probe");
        assert!(matches!(err, EraseError::Configuration(_)));
    }
}
