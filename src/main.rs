//! skill-sync - Cortex Code skill synchronizer
//!
//! Mirrors the repository's skills to and from the user-level Cortex Code
//! skill directory, and refreshes the analyzer skill from its app checkout.

use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use skill_sync::Result;
use skill_sync::app::AppContext;
use skill_sync::cli::output::{emit_json, robot_error};
use skill_sync::cli::{Cli, Commands, usage};

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return parse_failure(&err),
    };

    let Some(command) = &cli.command else {
        eprint!("{}", usage());
        return ExitCode::FAILURE;
    };

    init_tracing(&cli);

    match run(&cli, command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.robot {
                // Robot mode: JSON error output to stdout
                let _ = emit_json(&robot_error(e.code(), e.to_string()));
            } else {
                eprintln!("Error: {e}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, command: &Commands) -> Result<()> {
    let ctx = AppContext::from_cli(cli)?;
    skill_sync::cli::commands::run(&ctx, command)
}

/// Help and version exit 0; anything else is a usage error (exit 1).
fn parse_failure(err: &clap::Error) -> ExitCode {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = err.print();
            ExitCode::SUCCESS
        }
        ErrorKind::InvalidSubcommand | ErrorKind::UnknownArgument => {
            let _ = err.print();
            eprint!("\n{}", usage());
            ExitCode::FAILURE
        }
        _ => {
            let _ = err.print();
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(cli: &Cli) {
    if cli.quiet {
        return;
    }

    let filter = match cli.verbose {
        0 => "warn,skill_sync=warn",
        1 => "info,skill_sync=info",
        2 => "debug,skill_sync=debug",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if cli.robot {
        // JSON logging for robot mode
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        // Human-readable logging
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
