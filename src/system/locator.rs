/// The device backing the running operating system, computed once per run and
/// only ever compared against candidates. `Unknown` means the mechanism
/// failed; callers must refuse to proceed rather than assume no system device
/// exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SystemDevice {
    Known(String),
    Unknown,
}

pub struct SystemLocator;

impl SystemLocator {
    /// Resolve the system (boot) device for this host.
    pub fn locate() -> SystemDevice {
        Self::locate_impl()
    }

    #[cfg(target_os = "linux")]
    fn locate_impl() -> SystemDevice {
        match std::fs::read_to_string("/proc/mounts") {
            Ok(table) => match Self::root_device_from_mounts(&table) {
                Some(device) => SystemDevice::Known(device),
                None => {
                    tracing::error!("no root mount found in /proc/mounts");
                    SystemDevice::Unknown
                }
            },
            Err(e) => {
                tracing::error!("failed to read mount table: {}", e);
                SystemDevice::Unknown
            }
        }
    }

    #[cfg(windows)]
    fn locate_impl() -> SystemDevice {
        match std::env::var("SystemDrive") {
            Ok(drive) if !drive.is_empty() => {
                SystemDevice::Known(normalize_drive_root(&drive))
            }
            _ => {
                tracing::error!("SystemDrive environment variable not set");
                SystemDevice::Unknown
            }
        }
    }

    #[cfg(not(any(target_os = "linux", windows)))]
    fn locate_impl() -> SystemDevice {
        tracing::error!("system-device detection is not supported on this platform");
        SystemDevice::Unknown
    }

    /// Extract the whole-device identifier backing the root mount from
    /// mount-table text (the /proc/mounts format: device, mount point,
    /// fstype, options).
    pub(crate) fn root_device_from_mounts(table: &str) -> Option<String> {
        for line in table.lines() {
            let mut fields = line.split_whitespace();
            if let (Some(device), Some("/")) = (fields.next(), fields.next()) {
                return Some(normalize_whole_device(device));
            }
        }
        None
    }
}

/// Normalize a partition identifier to its parent whole-device identifier:
/// `/dev/sda1` -> `/dev/sda`, `/dev/nvme0n1p2` -> `/dev/nvme0n1`,
/// `/dev/mmcblk0p1` -> `/dev/mmcblk0`. Identifiers outside /dev (overlay,
/// tmpfs, UUID= specs) are left untouched.
pub(crate) fn normalize_whole_device(device: &str) -> String {
    let Some(name) = device.strip_prefix("/dev/") else {
        return device.to_string();
    };

    // Families whose canonical names end in a digit (nvme0n1, mmcblk0) mark
    // partitions with a 'p' separator; classic sdX/hdX/vdX names append the
    // partition number directly.
    let normalized = if name.starts_with("nvme")
        || name.starts_with("mmcblk")
        || name.starts_with("loop")
        || name.starts_with("md")
    {
        strip_partition_p_suffix(name)
    } else {
        name.trim_end_matches(|c: char| c.is_ascii_digit())
    };

    format!("/dev/{}", normalized)
}

fn strip_partition_p_suffix(name: &str) -> &str {
    let stem = name.trim_end_matches(|c: char| c.is_ascii_digit());
    if stem.len() == name.len() {
        return name;
    }
    // The 'p' separator only marks a partition when it follows the device
    // number ("nvme0n1p2"); a trailing 'p' in the device name itself
    // ("loop0") does not.
    match stem.strip_suffix('p') {
        Some(parent) if parent.ends_with(|c: char| c.is_ascii_digit()) => parent,
        _ => name,
    }
}

#[cfg(windows)]
pub(crate) fn normalize_drive_root(drive: &str) -> String {
    drive.trim_end_matches('\\').to_ascii_uppercase()
}
