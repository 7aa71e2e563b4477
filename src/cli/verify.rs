//! Verify command implementation

use anyhow::Result;
use clap::Args;
use std::process::ExitCode;

use super::utils::{emit_report, load_environment, prepare, GlobalArgs, ReportArgs};
use crate::domain::VARIABLE_REGISTRY;
use crate::probe::{probe_all, ProbeContext, DEFAULT_REGISTRY};
use crate::render::HealthReport;

#[derive(Args)]
pub struct VerifyArgs {
    /// Python interpreter used to import the runtime packages
    #[arg(long, value_name = "PYTHON", env = "ENVDOCTOR_PYTHON")]
    pub python: Option<String>,

    #[command(flatten)]
    pub report: ReportArgs,
}

pub fn run(global: &GlobalArgs, args: VerifyArgs) -> Result<ExitCode> {
    let (settings, loader) = prepare(global, args.python)?;
    let resolved = load_environment(&loader);

    let ctx = ProbeContext::new(&settings.python);
    let dependencies = probe_all(DEFAULT_REGISTRY, &ctx);

    let report = HealthReport::build(resolved, VARIABLE_REGISTRY, Some(dependencies));
    emit_report(&report, &args.report, "Installation health")
}
