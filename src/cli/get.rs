//! Get command implementation

use anyhow::Result;
use clap::Args;
use std::process::ExitCode;

use super::utils::{load_environment, prepare, GlobalArgs};
use crate::redact::mask_value;

#[derive(Args)]
pub struct GetArgs {
    /// Variable name
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Value to use when the variable is not set
    #[arg(short, long, value_name = "VALUE")]
    pub default: Option<String>,

    /// Fail when the variable is not set and no default is given
    #[arg(short, long)]
    pub required: bool,

    /// Mask the value if the name looks like a secret
    #[arg(short, long)]
    pub mask: bool,
}

pub fn run(global: &GlobalArgs, args: GetArgs) -> Result<ExitCode> {
    let (_settings, loader) = prepare(global, None)?;
    let resolved = load_environment(&loader);

    match resolved.get(&args.name, args.default.as_deref(), args.required)? {
        Some(value) if args.mask => println!("{}", mask_value(&args.name, &value)),
        Some(value) => println!("{}", value),
        None => {
            tracing::warn!("{} is not set and no default was given", args.name);
            return Ok(ExitCode::FAILURE);
        }
    }
    Ok(ExitCode::SUCCESS)
}
