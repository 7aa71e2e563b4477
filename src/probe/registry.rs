//! Capabilities the orchestration runtime needs
//!
//! ORDER MATTERS: reports list results in registry order.

use crate::probe::{CapabilityCheck, ProbeContext};
use std::process::Command;

/// A Python package, activated by importing it in the configured interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PythonImport {
    pub name: &'static str,
    /// Statement that must run without error, e.g. `import crewai`.
    pub statement: &'static str,
    /// Expression printed as the version after a successful import.
    pub version_expr: Option<&'static str>,
}

impl PythonImport {
    const fn new(name: &'static str, statement: &'static str) -> Self {
        Self { name, statement, version_expr: None }
    }

    const fn versioned(
        name: &'static str,
        statement: &'static str,
        version_expr: &'static str,
    ) -> Self {
        Self { name, statement, version_expr: Some(version_expr) }
    }

    /// The `-c` program passed to the interpreter.
    pub fn script(&self) -> String {
        match self.version_expr {
            Some(expr) => format!("{}\nprint({})", self.statement, expr),
            None => self.statement.to_string(),
        }
    }
}

impl CapabilityCheck for PythonImport {
    fn name(&self) -> &str {
        self.name
    }

    fn activate(&self, ctx: &ProbeContext) -> Result<Option<String>, String> {
        let interpreter = ctx.interpreter().map_err(str::to_string)?;

        let output = Command::new(interpreter)
            .arg("-c")
            .arg(self.script())
            .output()
            .map_err(|e| format!("Error: failed to run {}: {}", interpreter.display(), e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = stderr
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .last()
                .map(str::to_string)
                .unwrap_or_else(|| format!("{} exited with {}", ctx.python(), output.status));
            return Err(format!("Error: {}", message));
        }

        if self.version_expr.is_none() {
            return Ok(None);
        }
        let stdout = String::from_utf8_lossy(&output.stdout);
        let version = stdout.lines().map(str::trim).filter(|line| !line.is_empty()).last();
        Ok(version.map(str::to_string))
    }
}

pub static DEFAULT_REGISTRY: &[PythonImport] = &[
    // ── Orchestration core ───────────────────────────────────────────────────
    PythonImport::versioned("crewai", "import crewai", "crewai.__version__"),
    PythonImport::new("crewai-tools", "import crewai_tools"),
    // ── Reliability ──────────────────────────────────────────────────────────
    PythonImport::new("tenacity", "import tenacity"),
    PythonImport::new("aiolimiter", "import aiolimiter"),
    // ── HTTP ─────────────────────────────────────────────────────────────────
    PythonImport::versioned("httpx", "import httpx", "httpx.__version__"),
    // ── Retrieval ────────────────────────────────────────────────────────────
    PythonImport::new("sentence-transformers", "import sentence_transformers"),
    PythonImport::new("qdrant-client", "from qdrant_client import QdrantClient"),
    // ── Observability ────────────────────────────────────────────────────────
    PythonImport::new("structlog", "import structlog"),
    PythonImport::new("opentelemetry", "from opentelemetry import trace"),
    PythonImport::new("prometheus-client", "from prometheus_client import Counter"),
    // ── Validation ───────────────────────────────────────────────────────────
    PythonImport::versioned("pydantic", "import pydantic", "pydantic.__version__"),
    PythonImport::new("python-dotenv", "from dotenv import load_dotenv"),
    // ── Testing ──────────────────────────────────────────────────────────────
    PythonImport::versioned("pytest", "import pytest", "pytest.__version__"),
    PythonImport::new("respx", "import respx"),
    // ── Utilities ────────────────────────────────────────────────────────────
    PythonImport::new("rich", "import rich"),
];
