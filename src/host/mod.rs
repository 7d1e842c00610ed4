//! Collaborators of the include directive
//!
//! The resolver never touches the filesystem, the build graph or the variable
//! store directly. Each concern is a trait here, and a host interpreter
//! provides all of them at once through [`Host`].

pub mod fs;
pub mod path;

use crate::message::Message;
use std::path::{Path, PathBuf};

pub use crate::policy::PolicyStore;
pub use fs::FsHost;

/// Lookup of named modules in the known module directories
pub trait ModuleSearch {
    /// Absolute path of the module file `file_name` (e.g. `Foo.cmake`), if any
    fn find_module(&self, file_name: &str) -> Option<PathBuf>;
}

/// Path classification and normalisation
pub trait PathUtil {
    fn is_full_path(&self, path: &str) -> bool {
        path::is_full_path(path)
    }

    /// Canonical absolute form of `path` interpreted against `base`
    fn collapse_full_path(&self, path: &str, base: &Path) -> PathBuf {
        path::collapse_full_path(path, base)
    }
}

pub trait FileSystem {
    fn file_exists(&self, path: &Path) -> bool;
}

/// Files generated by the build graph's `export()` step
pub trait ExportRegistry {
    /// Whether `path` was registered as a generated target-export file
    fn is_exported_targets_file(&self, path: &Path) -> bool;

    /// Create the generation objects and (re)write the import file at `path`.
    /// Must be safe to call repeatedly.
    fn materialize_and_generate(&mut self, path: &Path);
}

/// The script engine that parses and runs a file
pub trait Interpreter {
    /// Read and execute `path`; `no_policy_scope` suppresses the fresh
    /// policy scope normally opened for the file. Returns whether it was read.
    fn load_file(&mut self, path: &Path, no_policy_scope: bool) -> bool;
}

pub trait VariableStore {
    fn define(&mut self, name: &str, value: &str);
}

/// Reporting channel for warnings and errors
pub trait MessageSink {
    fn report(&mut self, message: Message);

    /// Whether a fatal error has already been reported during this run
    fn fatal_error_occurred(&self) -> bool;
}

/// Everything the include directive needs from its host interpreter
pub trait Host:
    ModuleSearch
    + PathUtil
    + FileSystem
    + ExportRegistry
    + PolicyStore
    + Interpreter
    + VariableStore
    + MessageSink
{
}

impl<T> Host for T where
    T: ModuleSearch
        + PathUtil
        + FileSystem
        + ExportRegistry
        + PolicyStore
        + Interpreter
        + VariableStore
        + MessageSink
{
}
