use super::{IncludeReport, OutputFormatter};
use crate::directive::IncludeOutcome;
use crate::error::ErrorKind;
use crate::message::{Level, Message};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// JSON output formatter
#[derive(Debug, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

/// JSON representation of an include() evaluation
#[derive(Debug, Serialize, Deserialize)]
struct JsonOutput {
    args: Vec<String>,
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    outcome: Option<IncludeOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonError>,
    messages: Vec<Message>,
    variables: BTreeMap<String, String>,
    loaded: Vec<String>,
    generated: Vec<String>,
    stats: JsonStats,
}

#[derive(Debug, Serialize, Deserialize)]
struct JsonError {
    kind: ErrorKind,
    message: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct JsonStats {
    fatal_errors: usize,
    warnings: usize,
    author_warnings: usize,
}

impl From<&IncludeReport> for JsonOutput {
    fn from(report: &IncludeReport) -> Self {
        let (outcome, error) = match &report.result {
            Ok(outcome) => (Some(outcome.clone()), None),
            Err(e) => (
                None,
                Some(JsonError {
                    kind: e.kind(),
                    message: e.to_string(),
                }),
            ),
        };

        Self {
            args: report.args.clone(),
            success: report.succeeded(),
            outcome,
            error,
            messages: report.messages.clone(),
            variables: report.variables.clone(),
            loaded: report.loaded.iter().map(|p| p.display().to_string()).collect(),
            generated: report.generated.iter().map(|p| p.display().to_string()).collect(),
            stats: JsonStats {
                fatal_errors: report.count(Level::FatalError),
                warnings: report.count(Level::Warning),
                author_warnings: report.count(Level::AuthorWarning),
            },
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &IncludeReport) -> String {
        serde_json::to_string_pretty(&JsonOutput::from(report))
            .unwrap_or_else(|e| format!(r#"{{"error": "Failed to serialize JSON: {e}"}}"#))
    }
}
