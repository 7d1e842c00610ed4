pub mod human;
pub mod json;

use crate::directive::IncludeOutcome;
use crate::error::IncludeError;
use crate::host::FsHost;
use crate::message::{Level, Message};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Trait for formatting the result of an include() evaluation
pub trait OutputFormatter {
    fn format_report(&self, report: &IncludeReport) -> String;
}

/// Get the appropriate formatter for the given format
pub fn get_formatter(format: &crate::cli::OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        crate::cli::OutputFormat::Human => Box::new(human::HumanFormatter::new()),
        crate::cli::OutputFormat::Json => Box::new(json::JsonFormatter::new()),
    }
}

/// Everything observable after one include() evaluation
#[derive(Debug, Clone, PartialEq)]
pub struct IncludeReport {
    /// Arguments the directive was called with
    pub args: Vec<String>,
    pub result: Result<IncludeOutcome, IncludeError>,
    pub messages: Vec<Message>,
    pub variables: BTreeMap<String, String>,
    pub loaded: Vec<PathBuf>,
    pub generated: Vec<PathBuf>,
}

impl IncludeReport {
    /// Collect the report from the host the directive ran against
    pub fn from_host(args: Vec<String>, result: Result<IncludeOutcome, IncludeError>, host: &FsHost) -> Self {
        Self {
            args,
            result,
            messages: host.messages().to_vec(),
            variables: host.variables().clone(),
            loaded: host.loaded().iter().map(|f| f.path.clone()).collect(),
            generated: host.generated().to_vec(),
        }
    }

    pub fn succeeded(&self) -> bool {
        self.result.is_ok()
    }

    pub fn count(&self, level: Level) -> usize {
        self.messages.iter().filter(|m| m.level == level).count()
    }

    /// The directive call as it would appear in a script
    pub fn call(&self) -> String {
        let args: Vec<String> = self
            .args
            .iter()
            .map(|a| if a.is_empty() || a.contains(' ') { format!("\"{a}\"") } else { a.clone() })
            .collect();
        format!("include({})", args.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(args: &[&str], result: Result<IncludeOutcome, IncludeError>) -> IncludeReport {
        IncludeReport {
            args: args.iter().map(|a| a.to_string()).collect(),
            result,
            messages: vec![
                Message::author_warning("one"),
                Message::author_warning("two"),
                Message::fatal_error("three"),
            ],
            variables: BTreeMap::new(),
            loaded: Vec::new(),
            generated: Vec::new(),
        }
    }

    #[test]
    fn test_call_quotes_empty_and_spaced_args() {
        let r = report(&["", "OPTIONAL"], Ok(IncludeOutcome::Ignored));
        assert_eq!(r.call(), "include(\"\" OPTIONAL)");

        let r = report(&["my file.cmake"], Ok(IncludeOutcome::NotLoaded));
        assert_eq!(r.call(), "include(\"my file.cmake\")");
    }

    #[test]
    fn test_counts() {
        let r = report(&["x"], Err(IncludeError::ArgumentCount));
        assert!(!r.succeeded());
        assert_eq!(r.count(Level::AuthorWarning), 2);
        assert_eq!(r.count(Level::FatalError), 1);
        assert_eq!(r.count(Level::Warning), 0);
    }
}
