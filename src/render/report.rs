//! Health report model and verdict.

use crate::domain::{CandidateStatus, ConfigLocation, DependencyCheckResult, VariableSpec};
use crate::env::ResolvedEnvironment;
use crate::error::EnvError;
use crate::redact::mask_value;
use serde::Serialize;
use std::path::PathBuf;

/// Exit codes for the verification commands.
pub mod exit_codes {
    /// Every required variable is set (and every dependency is installed).
    pub const SUCCESS: i32 = 0;
    /// A required variable is missing or a dependency is unavailable.
    pub const FAILURE: i32 = 1;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableStatus {
    RequiredPresent,
    RequiredMissing,
    OptionalPresent,
    OptionalAbsent,
}

impl VariableStatus {
    pub fn is_fault(self) -> bool {
        self == Self::RequiredMissing
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariableRow {
    pub name: String,
    pub required: bool,
    pub status: VariableStatus,
    /// Masked display value; `None` when the variable is absent.
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationRow {
    pub path: PathBuf,
    pub rank: usize,
    pub found: bool,
    pub status: CandidateStatus,
}

impl LocationRow {
    pub fn new(location: &ConfigLocation, status: CandidateStatus) -> Self {
        Self { path: location.path.clone(), rank: location.rank, found: status.is_found(), status }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthReport {
    pub env_file: String,
    pub variables: Vec<VariableRow>,
    /// `None` when dependencies were not checked.
    pub dependencies: Option<Vec<DependencyCheckResult>>,
    pub source: Option<ConfigLocation>,
    pub fallback_file: Option<PathBuf>,
    pub locations: Vec<LocationRow>,
}

impl HealthReport {
    pub fn build(
        env: &ResolvedEnvironment,
        specs: &[VariableSpec],
        dependencies: Option<Vec<DependencyCheckResult>>,
    ) -> Self {
        let locations: Vec<LocationRow> =
            env.probed().map(|(location, status)| LocationRow::new(location, status)).collect();

        let env_file = env
            .candidates()
            .first()
            .and_then(|loc| loc.path.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            env_file,
            variables: specs.iter().map(|spec| variable_row(env, spec)).collect(),
            dependencies,
            source: env.source().cloned(),
            fallback_file: env.fallback_file().map(PathBuf::from),
            locations,
        }
    }

    pub fn missing_required(&self) -> impl Iterator<Item = &VariableRow> {
        self.variables.iter().filter(|row| row.status.is_fault())
    }

    /// `(installed, total)` when dependencies were checked.
    pub fn dependency_counts(&self) -> Option<(usize, usize)> {
        self.dependencies
            .as_ref()
            .map(|deps| (deps.iter().filter(|d| d.is_installed()).count(), deps.len()))
    }

    pub fn variables_ok(&self) -> bool {
        self.missing_required().next().is_none()
    }

    pub fn dependencies_ok(&self) -> bool {
        self.dependency_counts().map_or(true, |(installed, total)| installed == total)
    }

    /// Pass iff all required variables are present and, when checked, all
    /// dependencies are installed. Probed locations never affect the verdict.
    pub fn passed(&self) -> bool {
        self.variables_ok() && self.dependencies_ok()
    }

    pub fn exit_code(&self) -> i32 {
        if self.passed() {
            exit_codes::SUCCESS
        } else {
            exit_codes::FAILURE
        }
    }
}

fn variable_row(env: &ResolvedEnvironment, spec: &VariableSpec) -> VariableRow {
    // Set-but-empty counts as absent here; the accessor still returns it.
    let value = match env.get(spec.name, spec.default, spec.required) {
        Ok(value) => value.filter(|v| !v.is_empty()),
        Err(EnvError::Missing { .. }) | Err(EnvError::Invalid { .. }) => None,
    };

    let status = match (spec.required, value.is_some()) {
        (true, true) => VariableStatus::RequiredPresent,
        (true, false) => VariableStatus::RequiredMissing,
        (false, true) => VariableStatus::OptionalPresent,
        (false, false) => VariableStatus::OptionalAbsent,
    };

    VariableRow {
        name: spec.name.to_string(),
        required: spec.required,
        status,
        value: value.map(|v| mask_value(spec.name, &v).into_owned()),
    }
}
