//! make_world - write the demonstration plate to stdout.
//!
//! ```bash
//! make_world 256 0.2 1 > plate.world
//! ```

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::Context;
use clap::{ArgAction, Parser};
use tracing::info;

use hotplate_cli::{make_test_world, parse_bool_flag, parse_cli_from, setup_logging};
use hotplate_io::{save_world, world_hash, WorldEncoding};

/// Generate a square test world with a hot source, a cold sink and an
/// insulating wall.
#[derive(Parser)]
#[command(name = "make_world")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Cells per side
    #[arg(default_value_t = 128)]
    grid_size: u32,

    /// Diffusion coefficient
    #[arg(default_value_t = 0.1)]
    alpha: f32,

    /// Write the binary encoding (0/1/true/false)
    #[arg(default_value = "false", value_parser = parse_bool_flag, action = ArgAction::Set)]
    binary: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let world = make_test_world(cli.grid_size, cli.alpha)
        .with_context(|| format!("cannot build a {0}x{0} world", cli.grid_size))?;
    info!(
        "Generated {} world (hash {:016x})",
        world.dims(),
        world_hash(&world)
    );

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

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
