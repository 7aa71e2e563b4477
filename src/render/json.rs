//! JSON report rendering.

use crate::domain::REPORT_SCHEMA_VERSION;
use crate::render::report::HealthReport;
use anyhow::Result;
use chrono::Utc;
use serde_json::{json, Map, Value};

pub fn render_json(report: &HealthReport, include_timestamp: bool) -> Result<String> {
    let mut out = Map::new();
    out.insert("schema_version".to_string(), Value::String(REPORT_SCHEMA_VERSION.to_string()));
    if include_timestamp {
        out.insert(
            "generated_at".to_string(),
            Value::String(Utc::now().format("%Y-%m-%dT%H:%M:%S+00:00").to_string()),
        );
    }
    out.insert("passed".to_string(), Value::Bool(report.passed()));
    out.insert("exit_code".to_string(), json!(report.exit_code()));
    out.insert("env_file".to_string(), Value::String(report.env_file.clone()));
    out.insert(
        "source".to_string(),
        report
            .source
            .as_ref()
            .map_or(Value::Null, |s| Value::String(s.path.display().to_string())),
    );
    out.insert(
        "fallback_file".to_string(),
        report
            .fallback_file
            .as_ref()
            .map_or(Value::Null, |p| Value::String(p.display().to_string())),
    );
    out.insert("locations".to_string(), serde_json::to_value(&report.locations)?);
    out.insert("variables".to_string(), serde_json::to_value(&report.variables)?);

    if let (Some(deps), Some((installed, total))) =
        (&report.dependencies, report.dependency_counts())
    {
        out.insert(
            "dependencies".to_string(),
            json!({
                "installed": installed,
                "total": total,
                "results": deps,
            }),
        );
    }

    Ok(serde_json::to_string_pretty(&Value::Object(out))?)
}
