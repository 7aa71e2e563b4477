//! Human-readable report rendering.

use crate::domain::CandidateStatus;
use crate::render::report::{HealthReport, VariableStatus};
use anyhow::Result;
use console::Style;
use std::fmt::Write as _;

const WIDTH: usize = 60;

pub struct TextOptions<'a> {
    pub title: &'a str,
    pub colored: bool,
}

pub fn render_text(report: &HealthReport, options: &TextOptions<'_>) -> Result<String> {
    let rule = "=".repeat(WIDTH);
    let thin = "-".repeat(WIDTH);
    let green = Style::new().green();
    let red = Style::new().red();
    let dim = Style::new().dim();
    let paint = |text: &str, style: &Style| -> String {
        if options.colored {
            style.clone().force_styling(true).apply_to(text).to_string()
        } else {
            text.to_string()
        }
    };

    let mut out = String::new();
    writeln!(out, "{rule}\n{}\n{rule}\n", options.title)?;

    writeln!(out, "Variables:\n{thin}")?;
    for row in &report.variables {
        let (marker, value) = match row.status {
            VariableStatus::RequiredPresent => {
                (paint("✓", &green), row.value.clone().unwrap_or_default())
            }
            VariableStatus::OptionalPresent => ("•".to_string(), row.value.clone().unwrap_or_default()),
            VariableStatus::RequiredMissing => {
                (paint("✗", &red), paint("NOT FOUND (required)", &red))
            }
            VariableStatus::OptionalAbsent => {
                (paint("○", &dim), paint("not configured (optional)", &dim))
            }
        };
        writeln!(out, "{} {:<25} = {}", marker, row.name, value)?;
    }
    writeln!(out, "{thin}\n")?;

    writeln!(out, "Locations checked for {}:", report.env_file)?;
    for location in &report.locations {
        let (marker, note) = match location.status {
            CandidateStatus::Loaded => (paint("✓", &green), "found"),
            CandidateStatus::Shadowed => ("•".to_string(), "found, not loaded"),
            CandidateStatus::Missing => (paint("○", &dim), "not found"),
            CandidateStatus::Unreadable => (paint("✗", &red), "unreadable"),
        };
        writeln!(out, "  {} {} ({})", marker, location.path.display(), note)?;
    }
    match (&report.source, &report.fallback_file) {
        (Some(source), _) => writeln!(out, "Loaded from: {}", source)?,
        (None, Some(fallback)) => {
            writeln!(out, "Loaded from: {} (working directory fallback)", fallback.display())?
        }
        (None, None) => writeln!(out, "Loaded from: nothing (no {} found)", report.env_file)?,
    }

    if let Some(deps) = &report.dependencies {
        writeln!(out, "\nDependencies:\n{thin}")?;
        for dep in deps {
            let tag = if dep.is_installed() { paint("OK  ", &green) } else { paint("FAIL", &red) };
            writeln!(out, "[{}] {:<25} {}", tag, dep.name, dep.detail)?;
        }
        let (installed, total) = report.dependency_counts().unwrap_or_default();
        writeln!(out, "{thin}")?;
        writeln!(out, "Result: {}/{} packages installed correctly", installed, total)?;
    }

    writeln!(out, "\n{rule}")?;
    if report.passed() {
        writeln!(out, "{}", paint("✓ All checks passed.", &green))?;
        return Ok(out);
    }
    if !report.variables_ok() {
        let message = format!(
            "✗ Configuration incomplete. Set the required variables in your {} file.",
            report.env_file
        );
        writeln!(out, "{}", paint(message.as_str(), &red))?;
    }
    if !report.dependencies_ok() {
        writeln!(out, "{}", paint("✗ Some dependencies are not installed correctly.", &red))?;
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::{render_text, TextOptions};
    use crate::domain::{CandidateStatus, ConfigLocation, DependencyCheckResult};
    use crate::render::report::{HealthReport, LocationRow, VariableRow, VariableStatus};
    use std::path::PathBuf;

    fn row(name: &str, required: bool, status: VariableStatus, value: Option<&str>) -> VariableRow {
        VariableRow { name: name.to_string(), required, status, value: value.map(str::to_string) }
    }

    fn location(path: &str, rank: usize) -> ConfigLocation {
        ConfigLocation { path: PathBuf::from(path), rank }
    }

    fn sample_report(dependencies: Option<Vec<DependencyCheckResult>>) -> HealthReport {
        HealthReport {
            env_file: ".env".to_string(),
            variables: vec![
                row("OPENAI_API_KEY", true, VariableStatus::RequiredPresent, Some("sk-proj-...cdef")),
                row("SERPER_API_KEY", false, VariableStatus::OptionalAbsent, None),
                row("QDRANT_URL", false, VariableStatus::OptionalPresent, Some("http://localhost:6333")),
                row("DATABASE_URL", false, VariableStatus::OptionalAbsent, None),
            ],
            dependencies,
            source: Some(location("/lab/.env", 1)),
            fallback_file: None,
            locations: vec![
                LocationRow::new(&location("/lab/assistant/.env", 0), CandidateStatus::Missing),
                LocationRow::new(&location("/lab/.env", 1), CandidateStatus::Loaded),
            ],
        }
    }

    #[test]
    fn renders_environment_report() {
        let report = sample_report(None);
        let text = render_text(&report, &TextOptions { title: "Environment check", colored: false })
            .expect("render");

        let rule = "=".repeat(60);
        let thin = "-".repeat(60);
        let expected = format!(
            "{rule}\nEnvironment check\n{rule}\n\n\
Variables:\n{thin}\n\
✓ OPENAI_API_KEY            = sk-proj-...cdef\n\
○ SERPER_API_KEY            = not configured (optional)\n\
• QDRANT_URL                = http://localhost:6333\n\
○ DATABASE_URL              = not configured (optional)\n\
{thin}\n\n\
Locations checked for .env:\n\
  ○ /lab/assistant/.env (not found)\n\
  ✓ /lab/.env (found)\n\
Loaded from: /lab/.env\n\
\n{rule}\n\
✓ All checks passed.\n"
        );
        similar_asserts::assert_eq!(text, expected);
    }

    #[test]
    fn renders_dependency_rows_and_failures() {
        let mut report = sample_report(Some(vec![
            DependencyCheckResult::installed("crewai", "0.80.0"),
            DependencyCheckResult::failed("respx", "Error: No module named 'respx'"),
        ]));
        report.variables[0] = row("OPENAI_API_KEY", true, VariableStatus::RequiredMissing, None);

        let text = render_text(&report, &TextOptions { title: "Installation", colored: false })
            .expect("render");
        assert!(text.contains("✗ OPENAI_API_KEY            = NOT FOUND (required)\n"));
        assert!(text.contains("[OK  ] crewai                    0.80.0\n"));
        assert!(text.contains("[FAIL] respx                     Error: No module named 'respx'\n"));
        assert!(text.contains("Result: 1/2 packages installed correctly\n"));
        assert!(text.contains("✗ Configuration incomplete."));
        assert!(text.contains("✗ Some dependencies are not installed correctly."));
        assert!(!text.contains("All checks passed"));
    }

    #[test]
    fn reports_fallback_and_nothing_loaded() {
        let mut report = sample_report(None);
        report.source = None;
        report.fallback_file = Some(PathBuf::from("/cwd/.env"));
        let text = render_text(&report, &TextOptions { title: "t", colored: false }).expect("render");
        assert!(text.contains("Loaded from: /cwd/.env (working directory fallback)\n"));

        report.fallback_file = None;
        let text = render_text(&report, &TextOptions { title: "t", colored: false }).expect("render");
        assert!(text.contains("Loaded from: nothing (no .env found)\n"));
    }

    #[test]
    fn colored_output_contains_escape_codes() {
        let report = sample_report(None);
        let text = render_text(&report, &TextOptions { title: "t", colored: true }).expect("render");
        assert!(text.contains("\u{1b}["));
    }

    #[test]
    fn marks_shadowed_and_unreadable_locations() {
        let mut report = sample_report(None);
        report.locations = vec![
            LocationRow::new(&location("/lab/assistant/.env", 0), CandidateStatus::Unreadable),
            LocationRow::new(&location("/lab/.env", 1), CandidateStatus::Loaded),
            LocationRow::new(&location("/.env", 2), CandidateStatus::Shadowed),
        ];

        let text = render_text(&report, &TextOptions { title: "t", colored: false }).expect("render");
        assert!(text.contains("  ✗ /lab/assistant/.env (unreadable)\n"));
        assert!(text.contains("  ✓ /lab/.env (found)\n"));
        assert!(text.contains("  • /.env (found, not loaded)\n"));
    }
}
