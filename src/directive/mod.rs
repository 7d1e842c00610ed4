pub mod args;
pub mod export;
pub mod include;
pub mod target;

pub use args::{IncludeOptions, Keyword};
pub use export::check_export_file;
pub use include::{IncludeContext, IncludeOutcome, NOT_FOUND, include, include_with_options};
pub use target::{ResolvedTarget, resolve_target};
