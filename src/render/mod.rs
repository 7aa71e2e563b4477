//! Output rendering (text and JSON health reports)

pub mod json;
pub mod report;
pub mod text;

pub use json::render_json;
pub use report::{exit_codes, HealthReport, LocationRow, VariableRow, VariableStatus};
pub use text::{render_text, TextOptions};
