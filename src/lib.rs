//! Resolver for the `include()` directive of a build-configuration interpreter.
//!
//! [`directive::include`] validates the directive's arguments, resolves the
//! target as a file or module, applies the export-file policy and asks the
//! host interpreter to load the file. Everything it touches outside itself is
//! reached through the traits in [`host`].

pub mod cli;
pub mod config;
pub mod directive;
pub mod error;
pub mod host;
pub mod message;
pub mod output;
pub mod policy;

pub use directive::{IncludeContext, IncludeOptions, IncludeOutcome, NOT_FOUND, include};
pub use error::{ErrorKind, IncludeError};
pub use host::Host;
pub use message::{Level, Message};
