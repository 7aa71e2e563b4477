//! Layered `.env` resolution
//!
//! Candidate files are checked nearest-first; the first one found is merged
//! into the environment without overriding values that are already set.

pub mod accessor;
pub mod loader;
mod parse;
pub mod paths;
pub mod store;

pub use accessor::get_env_var;
pub use loader::{EnvLoader, ResolvedEnvironment};
pub use paths::candidate_locations;
pub use store::{EnvStore, MapEnv, ProcessEnv};

use once_cell::sync::OnceCell;

static PROCESS_ENV: OnceCell<ResolvedEnvironment> = OnceCell::new();

/// Merge the `.env` file into the process environment, once per process.
///
/// Later calls return the first result without touching the environment
/// again, whatever loader they pass. Not safe to call while other threads read
/// or write environment variables: call it early in `main`.
pub fn init(loader: &EnvLoader) -> &'static ResolvedEnvironment {
    PROCESS_ENV.get_or_init(|| loader.resolve(&mut ProcessEnv))
}
