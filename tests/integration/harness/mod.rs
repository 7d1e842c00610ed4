//! In-memory host that records every collaborator call in order

use include_resolver::host::{
    ExportRegistry, FileSystem, Interpreter, MessageSink, ModuleSearch, PathUtil, PolicyStore,
    VariableStore,
};
use include_resolver::message::{Level, Message};
use include_resolver::policy::{PolicyId, PolicyStatus};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// A collaborator call observed by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Generate(PathBuf),
    Load { path: PathBuf, no_policy_scope: bool },
    Define { name: String, value: String },
    Report(Level),
}

#[derive(Debug, Default)]
pub struct RecordingHost {
    /// Module file name -> absolute path
    pub modules: BTreeMap<String, PathBuf>,
    /// Files that exist and load successfully
    pub files: BTreeSet<PathBuf>,
    /// Files that exist but fail to load
    pub broken: BTreeSet<PathBuf>,
    /// Files that raise a fatal error while loading and then fail
    pub fatal: BTreeSet<PathBuf>,
    pub exports: BTreeSet<PathBuf>,
    pub policy: Option<PolicyStatus>,
    pub calls: Vec<Call>,
    pub messages: Vec<Message>,
    pub variables: BTreeMap<String, String>,
    pub fatal_error: bool,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.insert(path.into());
        self
    }

    pub fn with_broken_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.broken.insert(path.into());
        self
    }

    pub fn with_fatal_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.fatal.insert(path.into());
        self
    }

    pub fn with_module(mut self, file_name: &str, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        self.files.insert(path.clone());
        self.modules.insert(file_name.to_string(), path);
        self
    }

    pub fn with_export(mut self, path: impl Into<PathBuf>, status: PolicyStatus) -> Self {
        self.exports.insert(path.into());
        self.policy = Some(status);
        self
    }

    pub fn loads(&self) -> Vec<&PathBuf> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Load { path, .. } => Some(path),
                _ => None,
            })
            .collect()
    }

    pub fn generations(&self) -> usize {
        self.calls.iter().filter(|c| matches!(c, Call::Generate(_))).count()
    }

    pub fn position(&self, call: &Call) -> Option<usize> {
        self.calls.iter().position(|c| c == call)
    }
}

impl ModuleSearch for RecordingHost {
    fn find_module(&self, file_name: &str) -> Option<PathBuf> {
        self.modules.get(file_name).cloned()
    }
}

impl PathUtil for RecordingHost {}

impl FileSystem for RecordingHost {
    fn file_exists(&self, path: &Path) -> bool {
        self.files.contains(path) || self.broken.contains(path) || self.fatal.contains(path)
    }
}

impl ExportRegistry for RecordingHost {
    fn is_exported_targets_file(&self, path: &Path) -> bool {
        self.exports.contains(path)
    }

    fn materialize_and_generate(&mut self, path: &Path) {
        self.calls.push(Call::Generate(path.to_path_buf()));
        self.files.insert(path.to_path_buf());
    }
}

impl PolicyStore for RecordingHost {
    fn policy_status(&self, _id: PolicyId) -> PolicyStatus {
        self.policy.unwrap_or(PolicyStatus::Warn)
    }
}

impl Interpreter for RecordingHost {
    fn load_file(&mut self, path: &Path, no_policy_scope: bool) -> bool {
        self.calls.push(Call::Load {
            path: path.to_path_buf(),
            no_policy_scope,
        });
        if self.fatal.contains(path) {
            self.report(Message::fatal_error("error in included file"));
            return false;
        }
        self.files.contains(path)
    }
}

impl VariableStore for RecordingHost {
    fn define(&mut self, name: &str, value: &str) {
        self.calls.push(Call::Define {
            name: name.to_string(),
            value: value.to_string(),
        });
        self.variables.insert(name.to_string(), value.to_string());
    }
}

impl MessageSink for RecordingHost {
    fn report(&mut self, message: Message) {
        self.calls.push(Call::Report(message.level));
        if message.level.is_fatal() {
            self.fatal_error = true;
        }
        self.messages.push(message);
    }

    fn fatal_error_occurred(&self) -> bool {
        self.fatal_error
    }
}
