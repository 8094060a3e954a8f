//! pumadevctl: manage puma-dev domain mappings.
//!
//! Parses arguments, sets up stderr logging, loads the layered configuration,
//! and hands the subcommand to a [`Session`]. Failures print one `Error:` line
//! on stderr and map to an exit status by error class.

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use pumadevctl::{
    build_info::BuildInfo,
    cli::Cli,
    cli_handler::{error_class, OutputFlags, Session},
    config::ConfigLoader,
    output::color_enabled,
};
use tracing::debug;

fn main() -> ExitCode {
    let build = BuildInfo::current();
    let cli = Cli::parse_with_version(build.summary());

    if let Err(err) = init_tracing(cli.verbose) {
        eprintln!("Error: {err:#}");
        return ExitCode::FAILURE;
    }

    match run(&cli, build) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(error_class(&err).exit_code())
        }
    }
}

fn run(cli: &Cli, build: BuildInfo) -> Result<()> {
    debug!("Parsed CLI arguments: {:?}", cli);

    let config = ConfigLoader::new()
        .load(cli)
        .context("Failed to load configuration")?;
    debug!("Loaded configuration: {:?}", config);

    let flags = OutputFlags::from_cli(cli, color_enabled());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let stdin = io::stdin();
    let mut input = stdin.lock();

    let result = Session::new(config, build, flags, &mut out, &mut input).run(&cli.command);
    out.flush().context("Failed to flush stdout")?;
    result
}

/// Initialize the tracing subscriber.
///
/// Logs go to stderr so stdout stays clean for JSON.
///
/// # Verbosity Levels
/// - 0 (default): `RUST_LOG`, else warnings and errors
/// - 1 (-v): Info level
/// - 2 (-vv): Debug level
/// - 3+ (-vvv): Trace level
fn init_tracing(verbose: u8) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .with(filter)
        .try_init()
        .context("Failed to initialize tracing subscriber")?;

    Ok(())
}
