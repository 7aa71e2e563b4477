//! Settings file loading

use crate::domain::Settings;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub fn load_settings(search_dir: &Path, config_path: Option<&Path>) -> Result<Settings> {
    let config_path_provided = config_path.is_some();

    let discovered = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => discover_settings(search_dir),
    };

    let Some(config_file) = discovered else {
        return Ok(Settings::default());
    };

    let content = fs::read_to_string(&config_file)
        .with_context(|| format!("Failed reading settings file: {}", config_file.display()))?;

    let ext = config_file.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();

    let parsed = match ext.as_str() {
        "toml" => parse_toml_settings(&content, &config_file),
        "yaml" | "yml" => parse_yaml_settings(&content, &config_file),
        other => Err(anyhow::anyhow!(
            "Unsupported settings extension '.{}' for file {}",
            other,
            config_file.display()
        )),
    };

    match parsed {
        Ok(settings) => {
            tracing::debug!("Loaded settings from {}", config_file.display());
            Ok(settings)
        }
        Err(e) if config_path_provided => Err(e),
        Err(e) => {
            // Auto-discovered: warn and carry on with defaults
            tracing::warn!(
                "Failed to parse auto-discovered settings {}: {:#}",
                config_file.display(),
                e
            );
            Ok(Settings::default())
        }
    }
}

/// Parse TOML settings, accepting either top-level keys or an `[envdoctor]` table.
fn parse_toml_settings(content: &str, config_file: &Path) -> Result<Settings> {
    let raw: toml::Value = toml::from_str(content)
        .with_context(|| format!("Invalid TOML syntax: {}", config_file.display()))?;

    let value = match raw.get("envdoctor") {
        Some(nested) => nested.clone(),
        None => raw,
    };

    value.try_into().with_context(|| format!("Invalid TOML settings: {}", config_file.display()))
}

/// Parse YAML settings, accepting either top-level keys or an `envdoctor` mapping.
fn parse_yaml_settings(content: &str, config_file: &Path) -> Result<Settings> {
    let raw: serde_yaml::Value = serde_yaml::from_str(content)
        .with_context(|| format!("Invalid YAML syntax: {}", config_file.display()))?;

    let value = match raw.get("envdoctor") {
        Some(nested) => nested.clone(),
        None => raw,
    };

    // An empty document parses as null
    if value.is_null() {
        return Ok(Settings::default());
    }

    serde_yaml::from_value(value)
        .with_context(|| format!("Invalid YAML settings: {}", config_file.display()))
}

fn discover_settings(search_dir: &Path) -> Option<PathBuf> {
    let candidates =
        ["envdoctor.toml", ".envdoctor.toml", "envdoctor.yaml", "envdoctor.yml", ".envdoctor.yml"];

    candidates.iter().map(|name| search_dir.join(name)).find(|path| path.is_file())
}
