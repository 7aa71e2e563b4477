//! Command-line interface for envdoctor
//!
//! Provides `check`, `verify`, `get` and `completions` subcommands.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod check;
mod get;
mod utils;
mod verify;

/// Resolve layered .env configuration and report environment health
#[derive(Parser)]
#[command(name = "envdoctor")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: utils::GlobalArgs,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that required configuration variables are set
    Check(check::CheckArgs),

    /// Check runtime dependencies and configuration variables
    Verify(verify::VerifyArgs),

    /// Print one resolved configuration value
    Get(get::GetArgs),

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    match cli.command {
        Commands::Check(args) => check::run(&cli.global, args),
        Commands::Verify(args) => verify::run(&cli.global, args),
        Commands::Get(args) => get::run(&cli.global, args),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "envdoctor", &mut std::io::stdout());
            Ok(ExitCode::SUCCESS)
        }
    }
}
