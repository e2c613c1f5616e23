use crate::overwrite::engine::is_end_of_device;
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::Path;
use sysinfo::Disks;

/// Copy `source` into `target_dir` as copy_1.dat, copy_2.dat, ... until the
/// volume cannot hold another copy. Returns the number of copies written.
///
/// This consumes free space on a mounted filesystem; it is not an erase and
/// gives none of the erase path's guarantees.
pub fn fill_volume(source: &Path, target_dir: &Path) -> Result<u64> {
    let copy_size = fs::metadata(source)
        .with_context(|| format!("cannot stat {}", source.display()))?
        .len();
    if copy_size == 0 {
        return Err(anyhow!("source file {} is empty", source.display()));
    }

    let mut copies = 0u64;
    loop {
        match available_space(target_dir) {
            Some(free) if free >= copy_size => {}
            Some(free) => {
                tracing::info!(
                    "volume full: {} bytes free, next copy needs {}",
                    free,
                    copy_size
                );
                break;
            }
            None => {
                return Err(anyhow!(
                    "no mounted volume found for {}",
                    target_dir.display()
                ))
            }
        }

        let target = target_dir.join(format!("copy_{}.dat", copies + 1));
        match fs::copy(source, &target) {
            Ok(_) => copies += 1,
            // The free-space reading can go stale between the check and the
            // copy; running out mid-copy is the same terminal condition.
            Err(e) if is_end_of_device(&e) => {
                let _ = fs::remove_file(&target);
                break;
            }
            Err(e) => {
                return Err(e).with_context(|| format!("copy to {} failed", target.display()))
            }
        }

        if copies % 100 == 0 {
            tracing::info!("{} copies written to {}", copies, target_dir.display());
        }
    }

    Ok(copies)
}

/// Free bytes on the volume holding `path`; the longest matching mount point
/// wins.
fn available_space(path: &Path) -> Option<u64> {
    let resolved = fs::canonicalize(path).ok()?;
    let disks = Disks::new_with_refreshed_list();
    disks
        .iter()
        .filter(|d| resolved.starts_with(d.mount_point()))
        .max_by_key(|d| d.mount_point().as_os_str().len())
        .map(|d| d.available_space())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_source_is_rejected() {
        let source = tempfile::NamedTempFile::new().expect("temp file");
        let dir = tempfile::tempdir().expect("temp dir");

        let err = fill_volume(source.path(), dir.path()).expect_err("empty source must fail");
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn missing_source_is_rejected() {
        let dir = tempfile::tempdir().expect("temp dir");
        assert!(fill_volume(Path::new("/nonexistent/source.dat"), dir.path()).is_err());
    }
}
