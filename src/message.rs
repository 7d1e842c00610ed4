use serde::{Deserialize, Serialize};

/// Severity of a message issued while evaluating a directive
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Level {
    /// Informational message
    Info,
    /// Warning addressed to the author of the script
    AuthorWarning,
    /// Warning that doesn't prevent success
    Warning,
    /// Error that aborts the current directive
    FatalError,
}

impl Level {
    /// Whether this level stops evaluation
    pub fn is_fatal(&self) -> bool {
        matches!(self, Level::FatalError)
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Level::Info => write!(f, "info"),
            Level::AuthorWarning => write!(f, "author-warning"),
            Level::Warning => write!(f, "warning"),
            Level::FatalError => write!(f, "fatal-error"),
        }
    }
}

/// A message surfaced through the host's reporting channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Severity level of the message
    pub level: Level,
    /// Human-readable text, possibly spanning several lines
    pub text: String,
}

impl Message {
    /// Create a new message
    pub fn new(level: Level, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }

    pub fn author_warning(text: impl Into<String>) -> Self {
        Self::new(Level::AuthorWarning, text)
    }

    pub fn fatal_error(text: impl Into<String>) -> Self {
        Self::new(Level::FatalError, text)
    }
}

impl std::fmt::Display for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.level, self.text)
    }
}
