//! CLI overrides on top of file settings

use crate::domain::Settings;
use std::path::PathBuf;

/// Values given on the command line (or via `ENVDOCTOR_*` variables).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub env_file: Option<String>,
    pub search_depth: Option<usize>,
    pub python: Option<String>,
    pub project_dir: Option<PathBuf>,
}

/// Apply `overrides` to `settings`; every `Some` wins over the file value.
pub fn merge_cli_with_settings(mut settings: Settings, overrides: &CliOverrides) -> Settings {
    if let Some(env_file) = &overrides.env_file {
        settings.env_file = env_file.clone();
    }
    if let Some(depth) = overrides.search_depth {
        settings.search_depth = depth;
    }
    if let Some(python) = &overrides.python {
        settings.python = python.clone();
    }
    if let Some(dir) = &overrides.project_dir {
        settings.project_dir = Some(dir.clone());
    }
    settings
}
