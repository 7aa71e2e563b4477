//! envdoctor: layered .env resolution and environment health checks
//!
//! The resolver checks a fixed number of nested directories for a dotenv file,
//! loads the nearest one without overriding variables that are already set,
//! and exposes typed access to the result. The report side masks secrets,
//! probes runtime dependencies and derives a pass/fail verdict.

pub mod cli;
pub mod config;
pub mod domain;
pub mod env;
pub mod error;
pub mod probe;
pub mod redact;
pub mod render;

pub use domain::{ConfigLocation, DependencyCheckResult, Settings, VariableSpec, VARIABLE_REGISTRY};
pub use env::{get_env_var, init, EnvLoader, ResolvedEnvironment};
pub use error::EnvError;
