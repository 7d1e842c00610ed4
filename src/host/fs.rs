use super::{
    ExportRegistry, FileSystem, Interpreter, MessageSink, ModuleSearch, PathUtil, VariableStore,
};
use crate::config::{Config, ExportFile};
use crate::message::{Level, Message};
use crate::policy::{PolicyId, PolicyMap, PolicyStatus, PolicyStore};
use eyre::{Result, WrapErr};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Suffix of script files, also appended to module names
pub const SCRIPT_SUFFIX: &str = ".cmake";

/// A file read by the interpreter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedFile {
    pub path: PathBuf,
    pub no_policy_scope: bool,
}

/// Host backed by the real filesystem and an in-memory evaluation state
#[derive(Debug)]
pub struct FsHost {
    module_dirs: Vec<PathBuf>,
    export_files: Vec<ExportFile>,
    /// Innermost policy scope last
    policy_scopes: Vec<PolicyMap>,
    variables: BTreeMap<String, String>,
    messages: Vec<Message>,
    loaded: Vec<LoadedFile>,
    generated: Vec<PathBuf>,
    generation_objects_created: bool,
    fatal_error: bool,
}

impl FsHost {
    /// Create a host from configuration
    pub fn new(config: &Config) -> Result<Self> {
        let mut module_dirs = config.module_path.clone();
        if let Some(root) = &config.modules_root {
            module_dirs.push(root.clone());
        }

        Ok(Self {
            module_dirs,
            export_files: config.export_files.clone(),
            policy_scopes: vec![config.policy_map()?],
            variables: BTreeMap::new(),
            messages: Vec::new(),
            loaded: Vec::new(),
            generated: Vec::new(),
            generation_objects_created: false,
            fatal_error: false,
        })
    }

    /// Set a policy in the current scope
    pub fn set_policy(&mut self, id: PolicyId, status: PolicyStatus) {
        if let Some(scope) = self.policy_scopes.last_mut() {
            scope.set(id, status);
        }
    }

    pub fn variable(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(String::as_str)
    }

    pub fn variables(&self) -> &BTreeMap<String, String> {
        &self.variables
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn loaded(&self) -> &[LoadedFile] {
        &self.loaded
    }

    /// Import files written so far, in order of generation
    pub fn generated(&self) -> &[PathBuf] {
        &self.generated
    }

    pub fn policy_scope_depth(&self) -> usize {
        self.policy_scopes.len()
    }

    /// All module files directly inside the module directories, by module name.
    /// A name found in an earlier directory shadows later ones.
    pub fn available_modules(&self) -> BTreeMap<String, PathBuf> {
        let mut modules = BTreeMap::new();
        for dir in &self.module_dirs {
            for entry in WalkDir::new(dir)
                .min_depth(1)
                .max_depth(1)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
            {
                let file_name = entry.file_name().to_string_lossy();
                if let Some(name) = file_name.strip_suffix(SCRIPT_SUFFIX) {
                    modules
                        .entry(name.to_string())
                        .or_insert_with(|| entry.path().to_path_buf());
                }
            }
        }
        modules
    }

    fn export_file(&self, path: &Path) -> Option<&ExportFile> {
        self.export_files.iter().find(|e| e.path == path)
    }

    fn write_import_file(export: &ExportFile) -> Result<()> {
        if let Some(parent) = export.path.parent() {
            fs::create_dir_all(parent)
                .wrap_err_with(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let mut content = format!(
            "# Generated by export() on {}. Do not edit.\n",
            chrono::Utc::now().to_rfc3339()
        );
        for target in &export.targets {
            content.push_str(&format!("add_library({target} UNKNOWN IMPORTED)\n"));
        }

        fs::write(&export.path, content)
            .wrap_err_with(|| format!("Failed to write import file {}", export.path.display()))
    }
}

impl ModuleSearch for FsHost {
    fn find_module(&self, file_name: &str) -> Option<PathBuf> {
        self.module_dirs
            .iter()
            .map(|dir| dir.join(file_name))
            .find(|candidate| candidate.is_file())
            .map(|found| {
                let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("/"));
                self.collapse_full_path(&found.to_string_lossy(), &cwd)
            })
    }
}

impl PathUtil for FsHost {}

impl FileSystem for FsHost {
    fn file_exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

impl ExportRegistry for FsHost {
    fn is_exported_targets_file(&self, path: &Path) -> bool {
        self.export_file(path).is_some()
    }

    fn materialize_and_generate(&mut self, path: &Path) {
        if !self.generation_objects_created {
            tracing::debug!("creating generation objects");
            self.generation_objects_created = true;
        }

        let Some(export) = self.export_file(path).cloned() else {
            return;
        };

        match Self::write_import_file(&export) {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "generated import file");
                self.generated.push(export.path);
            }
            Err(e) => self.report(Message::new(Level::Warning, format!("{e:#}"))),
        }
    }
}

impl PolicyStore for FsHost {
    fn policy_status(&self, id: PolicyId) -> PolicyStatus {
        self.policy_scopes
            .last()
            .map(|scope| scope.policy_status(id))
            .unwrap_or(PolicyStatus::Warn)
    }
}

impl Interpreter for FsHost {
    fn load_file(&mut self, path: &Path, no_policy_scope: bool) -> bool {
        if !no_policy_scope {
            let inherited = self.policy_scopes.last().cloned().unwrap_or_default();
            self.policy_scopes.push(inherited);
        }

        let readit = match fs::read_to_string(path) {
            Ok(content) => {
                tracing::debug!(path = %path.display(), bytes = content.len(), "read list file");
                self.loaded.push(LoadedFile {
                    path: path.to_path_buf(),
                    no_policy_scope,
                });
                true
            }
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "could not read list file");
                false
            }
        };

        if !no_policy_scope {
            self.policy_scopes.pop();
        }
        readit
    }
}

impl VariableStore for FsHost {
    fn define(&mut self, name: &str, value: &str) {
        self.variables.insert(name.to_string(), value.to_string());
    }
}

impl MessageSink for FsHost {
    fn report(&mut self, message: Message) {
        if message.level.is_fatal() {
            self.fatal_error = true;
        }
        self.messages.push(message);
    }

    fn fatal_error_occurred(&self) -> bool {
        self.fatal_error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let file_path = dir.join(name);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create dir");
        }
        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    #[test]
    fn test_find_module_searches_in_order() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let first = temp_dir.path().join("first");
        let second = temp_dir.path().join("second");
        create_test_file(&second, "Foo.cmake", "");
        create_test_file(&second, "Bar.cmake", "");
        let first_bar = create_test_file(&first, "Bar.cmake", "");

        let config = Config {
            module_path: vec![first.clone()],
            modules_root: Some(second.clone()),
            ..Config::default()
        };
        let host = FsHost::new(&config).expect("Failed to create host");

        assert_eq!(host.find_module("Foo.cmake"), Some(second.join("Foo.cmake")));
        assert_eq!(host.find_module("Bar.cmake"), Some(first_bar));
        assert_eq!(host.find_module("Missing.cmake"), None);
    }

    #[test]
    fn test_find_module_ignores_directories() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        fs::create_dir_all(temp_dir.path().join("Dir.cmake")).expect("Failed to create dir");

        let config = Config {
            module_path: vec![temp_dir.path().to_path_buf()],
            ..Config::default()
        };
        let host = FsHost::new(&config).expect("Failed to create host");

        assert_eq!(host.find_module("Dir.cmake"), None);
    }

    #[test]
    fn test_available_modules() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        create_test_file(temp_dir.path(), "Foo.cmake", "");
        create_test_file(temp_dir.path(), "notes.txt", "");
        create_test_file(temp_dir.path(), "nested/Deep.cmake", "");

        let config = Config {
            module_path: vec![temp_dir.path().to_path_buf()],
            ..Config::default()
        };
        let host = FsHost::new(&config).expect("Failed to create host");

        let modules = host.available_modules();
        assert_eq!(modules.keys().collect::<Vec<_>>(), vec!["Foo"]);
    }

    #[test]
    fn test_load_file_records_reads() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let file = create_test_file(temp_dir.path(), "a.cmake", "set(X 1)\n");
        let mut host = FsHost::new(&Config::default()).expect("Failed to create host");

        assert!(host.load_file(&file, true));
        assert!(!host.load_file(&temp_dir.path().join("missing.cmake"), false));

        assert_eq!(
            host.loaded(),
            &[LoadedFile {
                path: file,
                no_policy_scope: true
            }]
        );
        assert_eq!(host.policy_scope_depth(), 1);
    }

    #[test]
    fn test_generate_import_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("build/FooTargets.cmake");
        let config = Config {
            export_files: vec![ExportFile {
                path: path.clone(),
                targets: vec!["Foo::foo".to_string(), "Foo::bar".to_string()],
            }],
            ..Config::default()
        };
        let mut host = FsHost::new(&config).expect("Failed to create host");

        assert!(host.is_exported_targets_file(&path));
        assert!(!host.is_exported_targets_file(&temp_dir.path().join("other.cmake")));

        host.materialize_and_generate(&path);
        host.materialize_and_generate(&path);

        let content = fs::read_to_string(&path).expect("Import file not written");
        assert!(content.starts_with("# Generated by export()"));
        assert!(content.contains("add_library(Foo::foo UNKNOWN IMPORTED)\n"));
        assert!(content.contains("add_library(Foo::bar UNKNOWN IMPORTED)\n"));
        assert_eq!(host.generated(), &[path.clone(), path]);
    }

    #[test]
    fn test_fatal_error_latches() {
        let mut host = FsHost::new(&Config::default()).expect("Failed to create host");
        assert!(!host.fatal_error_occurred());

        host.report(Message::author_warning("careful"));
        assert!(!host.fatal_error_occurred());

        host.report(Message::fatal_error("stop"));
        host.report(Message::author_warning("after"));
        assert!(host.fatal_error_occurred());
        assert_eq!(host.messages().len(), 3);
    }

    #[test]
    fn test_policy_status_from_config() {
        let mut host = FsHost::new(&Config::strict()).expect("Failed to create host");
        assert_eq!(host.policy_status(PolicyId::Cmp0024), PolicyStatus::New);

        host.set_policy(PolicyId::Cmp0024, PolicyStatus::Old);
        assert_eq!(host.policy_status(PolicyId::Cmp0024), PolicyStatus::Old);
    }

    #[test]
    fn test_define_overwrites() {
        let mut host = FsHost::new(&Config::default()).expect("Failed to create host");
        host.define("R", "NOTFOUND");
        host.define("R", "/x.cmake");
        assert_eq!(host.variable("R"), Some("/x.cmake"));
    }
}
