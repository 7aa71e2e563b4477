//! Shared CLI utilities.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::config::{load_settings, merge_cli_with_settings, CliOverrides};
use crate::domain::Settings;
use crate::env::{self, EnvLoader, ResolvedEnvironment};
use crate::render::{render_json, render_text, HealthReport, TextOptions};

#[derive(Args, Debug, Default)]
pub struct GlobalArgs {
    /// Settings file (default: envdoctor.toml / envdoctor.yaml in the working directory)
    #[arg(long, global = true, value_name = "FILE", env = "ENVDOCTOR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory the .env search starts from
    #[arg(short = 'p', long, global = true, value_name = "DIR", env = "ENVDOCTOR_PROJECT_DIR")]
    pub project_dir: Option<PathBuf>,

    /// Name of the dotenv file to look for
    #[arg(long, global = true, value_name = "NAME", env = "ENVDOCTOR_ENV_FILE")]
    pub env_file: Option<String>,

    /// Number of directories to check, starting at the project directory
    #[arg(long, global = true, value_name = "N", env = "ENVDOCTOR_SEARCH_DEPTH")]
    pub search_depth: Option<usize>,
}

#[derive(Args, Debug, Default)]
pub struct ReportArgs {
    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Omit the generation timestamp from JSON output
    #[arg(long)]
    pub no_timestamp: bool,
}

/// Load settings (CLI > Env > File > Defaults) and build the `.env` loader.
pub fn prepare(global: &GlobalArgs, python: Option<String>) -> Result<(Settings, EnvLoader)> {
    let cwd = std::env::current_dir().context("Cannot determine the working directory")?;

    let file_settings = load_settings(&cwd, global.config.as_deref())?;
    let overrides = CliOverrides {
        env_file: global.env_file.clone(),
        search_depth: global.search_depth,
        python,
        project_dir: global.project_dir.clone(),
    };
    let mut settings = merge_cli_with_settings(file_settings, &overrides);

    if let Some(dir) = &settings.project_dir {
        let absolute = cwd.join(dir);
        if !absolute.is_dir() {
            anyhow::bail!("Project directory does not exist: {}", dir.display());
        }
        settings.project_dir = Some(absolute.canonicalize()?);
    }
    if settings.env_file.trim().is_empty() {
        anyhow::bail!("The dotenv file name cannot be empty");
    }

    let loader = EnvLoader::from_settings(&settings, &cwd);
    Ok((settings, loader))
}

/// Merge the `.env` file into the process environment (once per process).
pub fn load_environment(loader: &EnvLoader) -> &'static ResolvedEnvironment {
    let resolved = env::init(loader);
    if resolved.applied_keys().is_empty() {
        tracing::debug!("No variables were set from a dotenv file");
    } else {
        tracing::debug!("Set from dotenv file: {}", resolved.applied_keys().join(", "));
    }
    resolved
}

/// Print `report` in the requested format and turn its verdict into an exit code.
pub fn emit_report(report: &HealthReport, args: &ReportArgs, title: &str) -> Result<ExitCode> {
    if args.json {
        println!("{}", render_json(report, !args.no_timestamp)?);
    } else {
        let colored = console::colors_enabled();
        print!("{}", render_text(report, &TextOptions { title, colored })?);
    }
    Ok(ExitCode::from(report.exit_code() as u8))
}
