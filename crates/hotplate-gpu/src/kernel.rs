//! Kernel-source loading.
//!
//! Each [`KernelVariant`] has its own WGSL file. Files are looked up in a
//! kernel directory, [`DEFAULT_KERNEL_DIR`] unless configured otherwise,
//! and read fresh for every backend constructed.

use std::fs;
use std::path::{Path, PathBuf};

use hotplate_engine::ConfigError;
use hotplate_stencil::KernelVariant;

pub use hotplate_engine::DEFAULT_KERNEL_DIR;

/// Name of the compute entry point in every kernel file.
pub const ENTRY_POINT: &str = "step_cell";

/// The WGSL text of one kernel variant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KernelSource {
    /// Variant this source implements.
    pub variant: KernelVariant,
    /// File the text was read from.
    pub path: PathBuf,
    /// WGSL source text.
    pub text: String,
}

impl KernelSource {
    /// File name holding `variant`'s kernel.
    pub fn file_name(variant: KernelVariant) -> &'static str {
        match variant {
            KernelVariant::Flags => "step_world_flags.wgsl",
            KernelVariant::PackedMask => "step_world_packed.wgsl",
        }
    }

    /// Read `variant`'s kernel from `dir`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::KernelSourceMissing`] naming the full path if the
    /// file cannot be read.
    pub fn load(dir: &Path, variant: KernelVariant) -> Result<Self, ConfigError> {
        let path = dir.join(Self::file_name(variant));
        let text = fs::read_to_string(&path).map_err(|e| ConfigError::KernelSourceMissing {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            variant,
            path,
            text,
        })
    }
}
