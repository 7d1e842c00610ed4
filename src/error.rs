use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Why an include directive failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IncludeError {
    #[error("called with wrong number of arguments.  include() only takes one file.")]
    ArgumentCount,

    #[error("called with invalid arguments: {}", .modifier.duplicate_text())]
    DuplicateModifier { modifier: Modifier },

    #[error("called with no value for RESULT_VARIABLE.")]
    MissingValue,

    #[error("called with invalid argument: {0}")]
    UnknownArgument(String),

    #[error("may not include the export() result {}", .path.display())]
    ExportFilePolicy { path: PathBuf },

    #[error("could not find load file:\n  {specifier}")]
    FileNotFound { specifier: String },
}

/// A modifier that may appear only once
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    Optional,
    ResultVariable,
}

impl Modifier {
    fn duplicate_text(&self) -> &'static str {
        match self {
            Modifier::Optional => "OPTIONAL used twice",
            Modifier::ResultVariable => "only one result variable allowed",
        }
    }
}

/// Discriminant of [`IncludeError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    ArgumentCount,
    DuplicateModifier,
    MissingValue,
    UnknownArgument,
    ExportFilePolicy,
    FileNotFound,
}

impl IncludeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            IncludeError::ArgumentCount => ErrorKind::ArgumentCount,
            IncludeError::DuplicateModifier { .. } => ErrorKind::DuplicateModifier,
            IncludeError::MissingValue => ErrorKind::MissingValue,
            IncludeError::UnknownArgument(_) => ErrorKind::UnknownArgument,
            IncludeError::ExportFilePolicy { .. } => ErrorKind::ExportFilePolicy,
            IncludeError::FileNotFound { .. } => ErrorKind::FileNotFound,
        }
    }

    /// Whether the argument list itself was malformed
    pub fn is_argument_error(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::ArgumentCount
                | ErrorKind::DuplicateModifier
                | ErrorKind::MissingValue
                | ErrorKind::UnknownArgument
        )
    }
}
