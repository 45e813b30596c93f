//! Compute platform and device registry.
//!
//! A platform is a named group of devices: the host worker pool, or all
//! adapters of one graphics API. Backends enumerate their platforms, then
//! resolve an explicit [`DeviceSelection`] against the list with
//! [`select_device`]. Enumeration and the choice are logged at `info`
//! level so a run on an unfamiliar machine shows what was available.

use std::fmt;

use tracing::info;

use crate::error::{ConfigError, ResourceError, StepError};

/// Broad device category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeviceKind {
    /// Host CPU cores.
    Cpu,
    /// GPU sharing memory with the host.
    IntegratedGpu,
    /// Dedicated GPU.
    DiscreteGpu,
    /// Virtualised GPU.
    VirtualGpu,
    /// Anything else, including software rasterisers.
    Other,
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Cpu => "cpu",
            Self::IntegratedGpu => "integrated gpu",
            Self::DiscreteGpu => "discrete gpu",
            Self::VirtualGpu => "virtual gpu",
            Self::Other => "other",
        };
        f.write_str(s)
    }
}

/// One selectable compute device.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeviceInfo {
    /// Human-readable name.
    pub name: String,
    /// Device category.
    pub kind: DeviceKind,
    /// Parallel execution units (worker threads for the host).
    /// Zero when the driver does not report it.
    pub compute_units: usize,
}

/// A group of devices sharing one driver stack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlatformInfo {
    /// Platform name.
    pub name: String,
    /// Vendor or driver description.
    pub vendor: String,
    /// Devices on this platform, in enumeration order.
    pub devices: Vec<DeviceInfo>,
}

/// Directory the device kernels are read from when none is configured,
/// relative to the working directory.
pub const DEFAULT_KERNEL_DIR: &str = "src/he915";

/// Which platform and device to run on. Defaults to the first of each.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DeviceSelection {
    /// Index into the platform list.
    pub platform_index: usize,
    /// Index into the chosen platform's device list.
    pub device_index: usize,
}

impl DeviceSelection {
    /// Select `platform_index` / `device_index`.
    pub const fn new(platform_index: usize, device_index: usize) -> Self {
        Self {
            platform_index,
            device_index,
        }
    }
}

/// Resolve `selection` against `platforms`, logging the enumeration.
///
/// # Errors
///
/// - [`ResourceError::NoPlatform`] if `platforms` is empty.
/// - [`ConfigError::PlatformOutOfRange`] if the platform index is too large.
/// - [`ResourceError::NoDevice`] if the chosen platform has no devices.
/// - [`ConfigError::DeviceOutOfRange`] if the device index is too large.
pub fn select_device(
    platforms: &[PlatformInfo],
    selection: DeviceSelection,
) -> Result<(&PlatformInfo, &DeviceInfo), StepError> {
    if platforms.is_empty() {
        return Err(ResourceError::NoPlatform.into());
    }

    info!("Found {} platforms", platforms.len());
    for (i, p) in platforms.iter().enumerate() {
        info!("  Platform {i} : {} ({})", p.name, p.vendor);
    }
    info!("Choosing platform {}", selection.platform_index);
    let platform = platforms
        .get(selection.platform_index)
        .ok_or(ConfigError::PlatformOutOfRange {
            index: selection.platform_index,
            available: platforms.len(),
        })?;

    if platform.devices.is_empty() {
        return Err(ResourceError::NoDevice {
            platform: platform.name.clone(),
        }
        .into());
    }

    info!("Found {} devices", platform.devices.len());
    for (i, d) in platform.devices.iter().enumerate() {
        info!("  Device {i} : {} [{}]", d.name, d.kind);
    }
    info!("Choosing device {}", selection.device_index);
    let device = platform
        .devices
        .get(selection.device_index)
        .ok_or_else(|| ConfigError::DeviceOutOfRange {
            platform: platform.name.clone(),
            index: selection.device_index,
            available: platform.devices.len(),
        })?;

    Ok((platform, device))
}

/// The host platform list: a single platform with a single device, the
/// rayon worker pool of `worker_threads` threads.
pub fn host_platforms(worker_threads: usize) -> Vec<PlatformInfo> {
    vec![PlatformInfo {
        name: "host".to_string(),
        vendor: "rayon".to_string(),
        devices: vec![DeviceInfo {
            name: format!("cpu worker pool ({worker_threads} threads)"),
            kind: DeviceKind::Cpu,
            compute_units: worker_threads,
        }],
    }]
}
