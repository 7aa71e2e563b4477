//! Core data types shared across modules

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

pub const DEFAULT_ENV_FILE: &str = ".env";
pub const DEFAULT_SEARCH_DEPTH: usize = 3;
pub const DEFAULT_PYTHON: &str = "python3";
pub const REPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Tool settings, loaded from `envdoctor.toml` / `envdoctor.yaml` and CLI flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// File name looked up in each candidate directory.
    pub env_file: String,
    /// Number of directories checked, starting at the project directory.
    pub search_depth: usize,
    /// Python interpreter used to probe runtime packages.
    pub python: String,
    /// Directory the search starts from. Defaults to the working directory.
    pub project_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            env_file: DEFAULT_ENV_FILE.to_string(),
            search_depth: DEFAULT_SEARCH_DEPTH,
            python: DEFAULT_PYTHON.to_string(),
            project_dir: None,
        }
    }
}

/// A candidate configuration file and its precedence rank (0 is checked first).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigLocation {
    pub path: PathBuf,
    pub rank: usize,
}

impl fmt::Display for ConfigLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

/// What the loader saw at a candidate location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateStatus {
    /// Read and merged.
    Loaded,
    /// Exists, but a nearer candidate was loaded first.
    Shadowed,
    Missing,
    /// Exists but could not be read; scanning moved on.
    Unreadable,
}

impl CandidateStatus {
    pub fn is_found(self) -> bool {
        matches!(self, Self::Loaded | Self::Shadowed)
    }
}

/// A recognized configuration variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableSpec {
    pub name: &'static str,
    pub required: bool,
    pub default: Option<&'static str>,
}

impl VariableSpec {
    pub const fn required(name: &'static str) -> Self {
        Self { name, required: true, default: None }
    }

    pub const fn optional(name: &'static str) -> Self {
        Self { name, required: false, default: None }
    }

    pub fn is_sensitive(&self) -> bool {
        crate::redact::is_sensitive(self.name)
    }
}

/// Variables the orchestration runtime reads. Anything else in the environment
/// is passed through untouched.
pub const VARIABLE_REGISTRY: &[VariableSpec] = &[
    VariableSpec::required("OPENAI_API_KEY"),
    VariableSpec::optional("SERPER_API_KEY"),
    VariableSpec::optional("QDRANT_URL"),
    VariableSpec::optional("DATABASE_URL"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyStatus {
    Installed,
    Failed,
}

/// Outcome of activating one capability from the probe registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyCheckResult {
    pub name: String,
    pub status: DependencyStatus,
    /// Version (or `installed`) on success, error message on failure.
    pub detail: String,
}

impl DependencyCheckResult {
    pub fn installed(name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self { name: name.into(), status: DependencyStatus::Installed, detail: detail.into() }
    }

    pub fn failed(name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self { name: name.into(), status: DependencyStatus::Failed, detail: detail.into() }
    }

    pub fn is_installed(&self) -> bool {
        self.status == DependencyStatus::Installed
    }
}
