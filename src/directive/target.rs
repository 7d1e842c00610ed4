use crate::host::{ModuleSearch, PathUtil};
use crate::host::fs::SCRIPT_SUFFIX;
use std::path::{Path, PathBuf};

/// Where an include() target points
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    /// The target as written
    pub specifier: String,
    /// Module file found for the target, if it named a module
    pub module: Option<PathBuf>,
    /// Canonical absolute path to load
    pub path: PathBuf,
}

/// Resolve a non-empty target against `source_dir`.
///
/// A relative target is first tried as a module name; a module hit takes
/// precedence over a file of the same name relative to `source_dir`.
pub fn resolve_target<H>(host: &H, specifier: &str, source_dir: &Path) -> ResolvedTarget
where
    H: ModuleSearch + PathUtil + ?Sized,
{
    let module = if host.is_full_path(specifier) {
        None
    } else {
        host.find_module(&format!("{specifier}{SCRIPT_SUFFIX}"))
    };

    let effective = match &module {
        Some(found) => found.to_string_lossy().into_owned(),
        None => specifier.to_string(),
    };
    let path = host.collapse_full_path(&effective, source_dir);

    tracing::debug!(
        specifier,
        module = ?module,
        path = %path.display(),
        "resolved include target"
    );

    ResolvedTarget {
        specifier: specifier.to_string(),
        module,
        path,
    }
}
