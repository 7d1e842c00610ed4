use super::{IncludeReport, OutputFormatter};
use crate::directive::IncludeOutcome;
use crate::message::Level;
use std::io::IsTerminal;

/// Human-readable output formatter
#[derive(Debug, Default)]
pub struct HumanFormatter {
    use_colors: bool,
}

impl HumanFormatter {
    pub fn new() -> Self {
        Self {
            use_colors: Self::should_use_colors(),
        }
    }

    /// Create a new human formatter with explicit color setting
    pub fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn should_use_colors() -> bool {
        std::io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err()
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.use_colors {
            format!("\x1b[{code}m{text}\x1b[0m")
        } else {
            text.to_string()
        }
    }

    fn format_level(&self, level: &Level) -> String {
        let text = level.to_string();
        match level {
            Level::FatalError => self.paint("31", &text),
            Level::Warning | Level::AuthorWarning => self.paint("33", &text),
            Level::Info => self.paint("36", &text),
        }
    }

    fn format_outcome(&self, report: &IncludeReport) -> String {
        match &report.result {
            Ok(IncludeOutcome::Loaded(path)) => {
                format!("{} {}", self.paint("32", "loaded"), path.display())
            }
            Ok(IncludeOutcome::NotLoaded) => self.paint("33", "not loaded"),
            Ok(IncludeOutcome::Ignored) => self.paint("90", "ignored"),
            Err(e) => format!("{} {}", self.paint("31", "error:"), e),
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_report(&self, report: &IncludeReport) -> String {
        let mut output = Vec::new();

        output.push(self.paint("1", &report.call()));

        for message in &report.messages {
            let mut lines = message.text.trim_end().lines();
            let first = lines.next().unwrap_or_default();
            output.push(format!("  {}: {}", self.format_level(&message.level), first));
            for line in lines {
                output.push(format!("    {line}"));
            }
        }

        for path in &report.generated {
            output.push(format!("  {} {}", self.paint("36", "generated"), path.display()));
        }

        for (name, value) in &report.variables {
            output.push(format!("  {} = {}", self.paint("36", name), value));
        }

        output.push(format!("  {}", self.format_outcome(report)));

        output.join("\n")
    }
}
