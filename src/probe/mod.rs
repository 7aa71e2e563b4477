//! Runtime dependency probing
//!
//! Each registry entry is activated independently; a failing entry is recorded
//! and the remaining entries are still checked.

pub mod registry;

pub use registry::{PythonImport, DEFAULT_REGISTRY};

use crate::domain::DependencyCheckResult;
use std::path::PathBuf;

/// Shared inputs for capability checks.
#[derive(Debug, Clone)]
pub struct ProbeContext {
    python: String,
    interpreter: Result<PathBuf, String>,
}

impl ProbeContext {
    /// Locate `python` on `PATH` (or as a direct path) once for all checks.
    pub fn new(python: &str) -> Self {
        let interpreter = which::which(python)
            .map_err(|e| format!("Python interpreter '{}' not found: {}", python, e));
        if let Err(err) = &interpreter {
            tracing::debug!("{}", err);
        }
        Self { python: python.to_string(), interpreter }
    }

    pub fn python(&self) -> &str {
        &self.python
    }

    pub fn interpreter(&self) -> Result<&PathBuf, &str> {
        self.interpreter.as_ref().map_err(String::as_str)
    }
}

/// A named external capability that can be activated on demand.
pub trait CapabilityCheck {
    fn name(&self) -> &str;

    /// Try to activate the capability. `Ok(Some(version))` when a version is
    /// known, `Ok(None)` when it is merely available, `Err(message)` otherwise.
    fn activate(&self, ctx: &ProbeContext) -> Result<Option<String>, String>;
}

/// Run every check in order and collect one result per entry.
pub fn probe_all<C: CapabilityCheck>(checks: &[C], ctx: &ProbeContext) -> Vec<DependencyCheckResult> {
    checks.iter().map(|check| run_check(check, ctx)).collect()
}

fn run_check<C: CapabilityCheck>(check: &C, ctx: &ProbeContext) -> DependencyCheckResult {
    match check.activate(ctx) {
        Ok(version) => {
            let detail = version.unwrap_or_else(|| "installed".to_string());
            tracing::debug!("{} available: {}", check.name(), detail);
            DependencyCheckResult::installed(check.name(), detail)
        }
        Err(message) => {
            tracing::debug!("{} unavailable: {}", check.name(), message);
            DependencyCheckResult::failed(check.name(), message)
        }
    }
}
