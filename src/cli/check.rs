//! Check command implementation

use anyhow::Result;
use clap::Args;
use std::process::ExitCode;

use super::utils::{emit_report, load_environment, prepare, GlobalArgs, ReportArgs};
use crate::domain::VARIABLE_REGISTRY;
use crate::render::HealthReport;

#[derive(Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub report: ReportArgs,
}

pub fn run(global: &GlobalArgs, args: CheckArgs) -> Result<ExitCode> {
    let (_settings, loader) = prepare(global, None)?;
    let resolved = load_environment(&loader);

    let report = HealthReport::build(resolved, VARIABLE_REGISTRY, None);
    emit_report(&report, &args.report, "Environment configuration")
}
