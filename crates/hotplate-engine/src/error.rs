//! Error taxonomy for stepping calls.
//!
//! Every failure aborts the whole call; nothing here is retried. The
//! three families mirror where a failure originates:
//!
//! - [`ConfigError`]: the request itself is wrong (bad `dt`, selection
//!   index out of range, kernel source missing).
//! - [`BuildError`]: the device rejected the update-rule program. Carries
//!   one diagnostic log per candidate device.
//! - [`ResourceError`]: the machine cannot provide what was asked for (no
//!   platform, no device, a transfer failed).

use std::error::Error;
use std::fmt;
use std::path::PathBuf;

use hotplate_core::WorldError;

// ── ConfigError ────────────────────────────────────────────────────

/// The stepping request or backend configuration is invalid.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// The world violates an invariant.
    World(WorldError),
    /// `dt` is NaN, infinite, or negative.
    InvalidDt {
        /// The invalid value.
        value: f32,
    },
    /// The selected platform index does not exist.
    PlatformOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of platforms found.
        available: usize,
    },
    /// The selected device index does not exist on the chosen platform.
    DeviceOutOfRange {
        /// Name of the chosen platform.
        platform: String,
        /// Requested index.
        index: usize,
        /// Number of devices on the platform.
        available: usize,
    },
    /// The kernel source file could not be read.
    KernelSourceMissing {
        /// Full path that was tried.
        path: PathBuf,
        /// Underlying I/O error text.
        reason: String,
    },
    /// The requested backend was not compiled into this build.
    BackendUnavailable {
        /// Backend name.
        name: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::World(e) => write!(f, "world: {e}"),
            Self::InvalidDt { value } => {
                write!(f, "dt must be finite and non-negative, got {value}")
            }
            Self::PlatformOutOfRange { index, available } => write!(
                f,
                "platform index {index} out of range ({available} platforms available)"
            ),
            Self::DeviceOutOfRange {
                platform,
                index,
                available,
            } => write!(
                f,
                "device index {index} out of range on platform '{platform}' ({available} devices available)"
            ),
            Self::KernelSourceMissing { path, reason } => write!(
                f,
                "couldn't load kernel source from '{}': {reason}",
                path.display()
            ),
            Self::BackendUnavailable { name } => {
                write!(f, "backend '{name}' is not available in this build")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::World(e) => Some(e),
            _ => None,
        }
    }
}

impl From<WorldError> for ConfigError {
    fn from(e: WorldError) -> Self {
        Self::World(e)
    }
}

// ── BuildError ─────────────────────────────────────────────────────

/// Compiler diagnostics for one device.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeviceBuildLog {
    /// Human-readable device name.
    pub device: String,
    /// Diagnostic text reported by the device compiler. Empty when the
    /// build succeeded on this device.
    pub log: String,
}

/// The update-rule program failed to build on at least one device.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildError {
    /// One entry per candidate device, in enumeration order.
    pub logs: Vec<DeviceBuildLog>,
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "kernel build failed")?;
        for entry in &self.logs {
            write!(f, "\nlog for device {}:\n{}", entry.device, entry.log)?;
        }
        Ok(())
    }
}

impl Error for BuildError {}

// ── ResourceError ──────────────────────────────────────────────────

/// A compute resource is unavailable or failed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResourceError {
    /// No compute platform was found.
    NoPlatform,
    /// The chosen platform has no devices.
    NoDevice {
        /// Name of the platform.
        platform: String,
    },
    /// Opening a device failed.
    DeviceRequestFailed {
        /// Device name.
        device: String,
        /// Driver-reported reason.
        reason: String,
    },
    /// The host worker pool could not be started.
    ThreadPoolFailed {
        /// Reason reported by the pool builder.
        reason: String,
    },
    /// Moving data to or from a device failed.
    TransferFailed {
        /// Description of the failed transfer.
        reason: String,
    },
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoPlatform => write!(f, "no compute platforms found"),
            Self::NoDevice { platform } => {
                write!(f, "no compute devices found on platform '{platform}'")
            }
            Self::DeviceRequestFailed { device, reason } => {
                write!(f, "could not open device '{device}': {reason}")
            }
            Self::ThreadPoolFailed { reason } => {
                write!(f, "could not start worker pool: {reason}")
            }
            Self::TransferFailed { reason } => write!(f, "device transfer failed: {reason}"),
        }
    }
}

impl Error for ResourceError {}

// ── StepError ──────────────────────────────────────────────────────

/// Any failure of a stepping call.
#[derive(Clone, Debug, PartialEq)]
pub enum StepError {
    /// Invalid request or configuration.
    Configuration(ConfigError),
    /// Device-side program build failure.
    Build(BuildError),
    /// Missing or failing compute resource.
    Resource(ResourceError),
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration(e) => write!(f, "configuration error: {e}"),
            Self::Build(e) => write!(f, "build error: {e}"),
            Self::Resource(e) => write!(f, "resource error: {e}"),
        }
    }
}

impl Error for StepError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Configuration(e) => Some(e),
            Self::Build(e) => Some(e),
            Self::Resource(e) => Some(e),
        }
    }
}

impl From<ConfigError> for StepError {
    fn from(e: ConfigError) -> Self {
        Self::Configuration(e)
    }
}

impl From<BuildError> for StepError {
    fn from(e: BuildError) -> Self {
        Self::Build(e)
    }
}

impl From<ResourceError> for StepError {
    fn from(e: ResourceError) -> Self {
        Self::Resource(e)
    }
}

impl From<WorldError> for StepError {
    fn from(e: WorldError) -> Self {
        Self::Configuration(ConfigError::World(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_error_lists_every_device() {
        let e = BuildError {
            logs: vec![
                DeviceBuildLog {
                    device: "gpu0".into(),
                    log: "error: unknown identifier".into(),
                },
                DeviceBuildLog {
                    device: "gpu1".into(),
                    log: String::new(),
                },
            ],
        };
        let msg = e.to_string();
        assert!(msg.contains("log for device gpu0:\nerror: unknown identifier"));
        assert!(msg.contains("log for device gpu1:"));
    }

    #[test]
    fn kernel_source_message_names_path() {
        let e = ConfigError::KernelSourceMissing {
            path: PathBuf::from("src/he915/step_world_packed.wgsl"),
            reason: "No such file or directory".into(),
        };
        assert!(e
            .to_string()
            .starts_with("couldn't load kernel source from 'src/he915/step_world_packed.wgsl'"));
    }

    #[test]
    fn step_error_sources_chain() {
        let e: StepError = WorldError::EmptyGrid {
            width: 0,
            height: 0,
        }
        .into();
        let config = e.source().expect("config source");
        assert!(config.source().is_some(), "world error should chain");
    }

    #[test]
    fn open_border_is_a_configuration_error() {
        let e = StepError::from(WorldError::OpenBorder { x: 0, y: 2 });
        assert!(matches!(
            e,
            StepError::Configuration(ConfigError::World(WorldError::OpenBorder { x: 0, y: 2 }))
        ));
        assert!(e.to_string().starts_with("configuration error: "));
    }

    #[test]
    fn conversions_pick_matching_variant() {
        assert!(matches!(
            StepError::from(ResourceError::NoPlatform),
            StepError::Resource(ResourceError::NoPlatform)
        ));
        assert!(matches!(
            StepError::from(ConfigError::InvalidDt { value: -1.0 }),
            StepError::Configuration(ConfigError::InvalidDt { .. })
        ));
    }
}
