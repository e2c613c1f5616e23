use super::pattern::{OverwritePass, BLOCK_SIZE};
use crate::device::BlockDevice;
use crate::ui::progress::PassProgress;
use crate::{EraseError, EraseResult, PassReport};
use std::io::{self, Write};
use std::path::Path;

/// Render the progress bar every this many blocks (4 MiB of writes).
const PROGRESS_INTERVAL_BLOCKS: u64 = 1024;

pub struct OverwriteEngine;

impl OverwriteEngine {
    /// Run the overwrite passes strictly in order. Each pass owns a fresh
    /// device handle for its duration. A fatal error stops the current pass
    /// and the run; later passes never start after one.
    pub fn run_passes(
        device: &BlockDevice,
        passes: &[OverwritePass],
    ) -> EraseResult<Vec<PassReport>> {
        let mut reports = Vec::with_capacity(passes.len());

        for pass in passes {
            tracing::info!(
                "pass {}/{} ({}) started on {}",
                pass.number,
                passes.len(),
                pass.pattern.label(),
                device.path().display()
            );

            let report = Self::run_single_pass(device, pass, passes.len())?;

            tracing::info!(
                "pass {}/{} ({}) completed: {} blocks, {} bytes",
                report.pass,
                passes.len(),
                report.pattern,
                report.blocks_written,
                report.bytes_written
            );
            reports.push(report);
        }

        Ok(reports)
    }

    fn run_single_pass(
        device: &BlockDevice,
        pass: &OverwritePass,
        pass_total: usize,
    ) -> EraseResult<PassReport> {
        let block = pass.materialize_block();
        let capacity = device.capacity();

        let mut handle = device
            .open_for_write()
            .map_err(|e| classify_io_error(e, device.path()))?;

        let mut progress = PassProgress::new(
            format!("pass {}/{} ({})", pass.number, pass_total, pass.pattern.label()),
            capacity,
        );

        let mut bytes_written = 0u64;
        let mut blocks_written = 0u64;

        // Bounded by the discovered capacity, including the final partial
        // region; an end-of-device signal from the driver still terminates
        // the pass as a success, not an error.
        'pass: while bytes_written < capacity {
            let want = (capacity - bytes_written).min(BLOCK_SIZE as u64) as usize;
            let mut chunk = &block[..want];

            while !chunk.is_empty() {
                match handle.write(chunk) {
                    // A zero-length write means the device accepts no more
                    // data: the end of the addressable range.
                    Ok(0) => break 'pass,
                    Ok(n) => {
                        chunk = &chunk[n..];
                        bytes_written += n as u64;
                    }
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) if is_end_of_device(&e) => break 'pass,
                    Err(e) => return Err(classify_io_error(e, device.path())),
                }
            }

            blocks_written += 1;
            if blocks_written % PROGRESS_INTERVAL_BLOCKS == 0 {
                progress.update(bytes_written);
            }
        }

        handle.sync_all().map_err(|e| classify_io_error(e, device.path()))?;
        progress.finish(bytes_written);

        Ok(PassReport {
            pass: pass.number,
            pattern: pass.pattern.label().to_string(),
            blocks_written,
            bytes_written,
        })
    }
}

/// End-of-device write failures terminate a pass successfully; they are the
/// expected way a full-device pass ends on platforms that report it as an
/// error rather than a short write.
pub(crate) fn is_end_of_device(err: &io::Error) -> bool {
    if err.kind() == io::ErrorKind::StorageFull {
        return true;
    }
    #[cfg(unix)]
    {
        err.raw_os_error() == Some(libc::ENOSPC)
    }
    #[cfg(not(unix))]
    {
        false
    }
}

/// Fatal classification for write-path errors that are not end-of-device.
/// Permission denial means missing privilege, not transient I/O trouble, and
/// must stop the whole run.
pub(crate) fn classify_io_error(err: io::Error, device: &Path) -> EraseError {
    if err.kind() == io::ErrorKind::PermissionDenied {
        EraseError::Privilege(format!(
            "permission denied on {}: {}",
            device.display(),
            err
        ))
    } else {
        EraseError::Io(err)
    }
}
