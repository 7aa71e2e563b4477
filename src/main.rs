//! envdoctor: layered .env resolution and environment health checks
//!
//! Finds the nearest dotenv file for a project, merges it into the process
//! environment without overriding existing values, and reports whether the
//! required settings and runtime packages are in place.

use anyhow::Result;
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    envdoctor::cli::run()
}
