//! step_world - advance a world read from stdin and write it to stdout.
//!
//! ```bash
//! make_world 64 | step_world 0.1 100 > stepped.world
//! HOTPLATE_SELECT_DEVICE=1 step_world 0.05 10 1 --backend gpu < in.world > out.world
//! ```

use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{ArgAction, Parser};
use tracing::info;

use hotplate_cli::{
    parse_bool_flag, parse_cli_from, setup_logging, step_world, BackendKind, StepOptions, VariantArg,
    DEFAULT_KERNEL_DIR,
};
use hotplate_engine::DeviceSelection;
use hotplate_io::{load_world, save_world, world_hash, WorldEncoding};

/// Advance a heat-diffusion world by N iterations of size DT.
#[derive(Parser)]
#[command(name = "step_world")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Time step per iteration
    #[arg(default_value_t = 0.1)]
    dt: f32,

    /// Number of iterations
    #[arg(default_value_t = 1)]
    n: u32,

    /// Write the binary encoding (0/1/true/false)
    #[arg(default_value = "false", value_parser = parse_bool_flag, action = ArgAction::Set)]
    binary: bool,

    /// Execution backend
    #[arg(long, value_enum, default_value_t = BackendKind::Parallel)]
    backend: BackendKind,

    /// Per-cell input read by the update rule
    #[arg(long, value_enum, default_value_t = VariantArg::Packed)]
    variant: VariantArg,

    /// Compute platform index
    #[arg(long, env = "HOTPLATE_SELECT_PLATFORM", default_value_t = 0)]
    platform: usize,

    /// Compute device index on the chosen platform
    #[arg(long, env = "HOTPLATE_SELECT_DEVICE", default_value_t = 0)]
    device: usize,

    /// Directory holding the GPU kernels
    #[arg(long, env = "HOTPLATE_KERNEL_DIR", default_value = DEFAULT_KERNEL_DIR)]
    kernel_dir: PathBuf,

    /// Worker threads for the parallel backend (default: one per core)
    #[arg(long)]
    threads: Option<usize>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut world = load_world(&mut BufReader::new(io::stdin().lock()))
        .context("failed to read world from stdin")?;
    info!(
        "Loaded {} world at t={} (hash {:016x})",
        world.dims(),
        world.time(),
        world_hash(&world)
    );

    let options = StepOptions {
        backend: cli.backend,
        variant: cli.variant.into(),
        selection: DeviceSelection::new(cli.platform, cli.device),
        kernel_dir: cli.kernel_dir,
        threads: cli.threads,
    };
    step_world(&mut world, cli.dt, cli.n, &options)?;

    let mut out = BufWriter::new(io::stdout().lock());
    save_world(&mut out, &world, WorldEncoding::from_flag(cli.binary))
        .context("failed to write world to stdout")?;
    out.flush().context("failed to write world to stdout")?;
    Ok(())
}

fn main() -> ExitCode {
    let cli: Cli = match parse_cli_from(std::env::args_os()) {
        Ok(cli) => cli,
        Err(code) => return code,
    };
    setup_logging(cli.verbose, cli.quiet);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
