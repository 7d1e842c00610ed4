use super::args::IncludeOptions;
use super::export::check_export_file;
use super::target::resolve_target;
use crate::error::IncludeError;
use crate::host::{Host, MessageSink};
use crate::message::Message;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Value bound to a result variable when nothing was loaded
pub const NOT_FOUND: &str = "NOTFOUND";

/// Evaluation state the directive runs in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeContext {
    /// Directory relative targets are resolved against
    pub current_source_dir: PathBuf,
    /// A fatal error was reported earlier in this run; the host is asked again after a failed load
    pub fatal_error_occurred: bool,
}

impl IncludeContext {
    pub fn new(current_source_dir: impl Into<PathBuf>) -> Self {
        Self {
            current_source_dir: current_source_dir.into(),
            fatal_error_occurred: false,
        }
    }

    /// Context for `current_source_dir`, taking the fatal flag from `sink`
    pub fn from_host<S: MessageSink + ?Sized>(current_source_dir: impl Into<PathBuf>, sink: &S) -> Self {
        Self {
            current_source_dir: current_source_dir.into(),
            fatal_error_occurred: sink.fatal_error_occurred(),
        }
    }
}

/// How a successful include() ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "path", rename_all = "kebab-case")]
pub enum IncludeOutcome {
    /// Empty target; nothing was done
    Ignored,
    /// The file was read
    Loaded(PathBuf),
    /// The file was not read, and that was acceptable
    NotLoaded,
}

/// Run `include(<args>)` against `host`
pub fn include<H, S>(host: &mut H, ctx: &IncludeContext, args: &[S]) -> Result<IncludeOutcome, IncludeError>
where
    H: Host + ?Sized,
    S: AsRef<str>,
{
    let options = IncludeOptions::parse(args)?;
    include_with_options(host, ctx, &options)
}

/// Run an already parsed include() against `host`
pub fn include_with_options<H>(
    host: &mut H,
    ctx: &IncludeContext,
    options: &IncludeOptions,
) -> Result<IncludeOutcome, IncludeError>
where
    H: Host + ?Sized,
{
    if options.target.is_empty() {
        tracing::warn!("include() given empty file name");
        host.report(Message::author_warning("include() given empty file name (ignored)."));
        return Ok(IncludeOutcome::Ignored);
    }

    let target = resolve_target(&*host, &options.target, &ctx.current_source_dir);
    check_export_file(host, &target.path)?;

    if options.optional && !host.file_exists(&target.path) {
        tracing::debug!(path = %target.path.display(), "optional file does not exist");
        bind_result(host, options, None);
        return Ok(IncludeOutcome::NotLoaded);
    }

    let readit = host.load_file(&target.path, options.no_policy_scope);
    bind_result(host, options, readit.then_some(target.path.as_path()));

    if readit {
        return Ok(IncludeOutcome::Loaded(target.path));
    }

    if !options.optional && !ctx.fatal_error_occurred && !host.fatal_error_occurred() {
        return Err(IncludeError::FileNotFound {
            specifier: target.specifier,
        });
    }

    tracing::debug!(path = %target.path.display(), "load failed, not reported");
    Ok(IncludeOutcome::NotLoaded)
}

fn bind_result<H: Host + ?Sized>(host: &mut H, options: &IncludeOptions, loaded: Option<&Path>) {
    if let Some(name) = &options.result_variable {
        let value = loaded.map_or_else(|| NOT_FOUND.to_string(), |p| p.to_string_lossy().into_owned());
        tracing::debug!(variable = %name, %value, "binding include result");
        host.define(name, &value);
    }
}
