//! Argument types shared by both binaries.

use std::ffi::OsString;
use std::fmt;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use hotplate_stencil::KernelVariant;

/// Parse the trailing `BINARY` positional: `0`, `1`, `true` or `false`.
pub fn parse_bool_flag(s: &str) -> Result<bool, String> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" => Ok(true),
        "0" | "false" => Ok(false),
        other => Err(format!("expected 0, 1, true or false, got '{other}'")),
    }
}

/// Parse command-line arguments, printing clap's message on failure.
///
/// Usage errors exit with status 1 like every other failure; `--help` and
/// `--version` print to stdout and exit 0.
pub fn parse_cli_from<C, I, T>(args: I) -> Result<C, ExitCode>
where
    C: Parser,
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    C::try_parse_from(args).map_err(|e| {
        let _ = e.print();
        if e.use_stderr() {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        }
    })
}

/// Which execution backend `step_world` runs on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum BackendKind {
    /// Single-threaded reference loop.
    Sequential,
    /// rayon worker pool, one work item per cell.
    #[default]
    Parallel,
    /// wgpu compute (requires the `gpu` feature).
    Gpu,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Sequential => "sequential",
            Self::Parallel => "parallel",
            Self::Gpu => "gpu",
        })
    }
}

/// Command-line spelling of [`KernelVariant`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum VariantArg {
    /// Re-derive neighbour insulation from flags.
    Flags,
    /// Read the precomputed packed neighbour mask.
    #[default]
    Packed,
}

impl From<VariantArg> for KernelVariant {
    fn from(v: VariantArg) -> Self {
        match v {
            VariantArg::Flags => KernelVariant::Flags,
            VariantArg::Packed => KernelVariant::PackedMask,
        }
    }
}
