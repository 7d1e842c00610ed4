use crate::host::path::collapse_full_path;
use crate::policy::{PolicyId, PolicyMap, PolicyStatus};
use eyre::{ContextCompat, Result, WrapErr};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// A file produced by the build graph's `export()` step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportFile {
    /// Location of the generated import file
    pub path: PathBuf,
    /// Imported targets declared by the generated file
    #[serde(default)]
    pub targets: Vec<String>,
}

impl ExportFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            targets: Vec::new(),
        }
    }
}

/// Configuration of the host the include directive runs in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base configuration to extend from
    pub extends: Option<String>,
    /// Directories searched for modules, in order
    #[serde(rename = "module-path")]
    pub module_path: Vec<PathBuf>,
    /// Directory of bundled modules, searched after `module-path`
    #[serde(rename = "modules-root")]
    pub modules_root: Option<PathBuf>,
    /// Policy settings keyed by policy id, e.g. `CMP0024: NEW`
    pub policies: BTreeMap<String, PolicyStatus>,
    /// Registered export files
    #[serde(rename = "export-files")]
    pub export_files: Vec<ExportFile>,
}

impl Config {
    /// Load configuration from a file path
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        let config_file = match config_path {
            Some(path) => path.clone(),
            None => Self::default_config_path()?,
        };

        if config_file.exists() {
            let content = fs::read_to_string(&config_file).wrap_err_with(|| {
                format!("Failed to read config file: {}", config_file.display())
            })?;

            let mut config: Config = serde_yaml::from_str(&content).wrap_err_with(|| {
                format!("Failed to parse config file: {}", config_file.display())
            })?;

            config.resolve_relative_paths(&config_file)?;

            if let Some(base_name) = config.extends.clone() {
                let base_config = Self::load_base_config(&base_name, &config_file)?;
                config = config.merge_with_base(base_config);
            }

            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Load a base configuration by name
    fn load_base_config(base_name: &str, current_config_path: &Path) -> Result<Self> {
        match base_name {
            "default" => Ok(Self::default()),
            "strict" => Ok(Self::strict()),
            "legacy" => Ok(Self::legacy()),
            _ => {
                let base_path = current_config_path
                    .parent()
                    .unwrap_or_else(|| Path::new("."))
                    .join(base_name);

                if base_path.exists() {
                    Self::load(Some(&base_path))
                } else {
                    Err(eyre::eyre!("Base configuration '{}' not found", base_name))
                }
            }
        }
    }

    /// Merge this configuration with a base configuration
    fn merge_with_base(mut self, base: Self) -> Self {
        let mut policies = base.policies;
        policies.extend(self.policies);
        self.policies = policies;

        // Own module directories are searched before the base's
        let mut module_path = self.module_path;
        for dir in base.module_path {
            if !module_path.contains(&dir) {
                module_path.push(dir);
            }
        }
        self.module_path = module_path;

        if self.modules_root.is_none() {
            self.modules_root = base.modules_root;
        }

        for export in base.export_files {
            if !self.export_files.iter().any(|e| e.path == export.path) {
                self.export_files.push(export);
            }
        }

        self
    }

    /// Rebase paths in the file onto the file's own directory and collapse them
    fn resolve_relative_paths(&mut self, config_file: &Path) -> Result<()> {
        let dir = config_file.parent().unwrap_or_else(|| Path::new("."));
        let dir = if dir.is_absolute() {
            dir.to_path_buf()
        } else {
            std::env::current_dir()
                .wrap_err("Failed to determine current directory")?
                .join(dir)
        };
        let rebase = |p: &mut PathBuf| *p = collapse_full_path(&p.to_string_lossy(), &dir);

        self.module_path.iter_mut().for_each(rebase);
        if let Some(root) = self.modules_root.as_mut() {
            rebase(root);
        }
        for export in &mut self.export_files {
            rebase(&mut export.path);
        }
        Ok(())
    }

    /// Get the default configuration file path
    fn default_config_path() -> Result<PathBuf> {
        let candidates = vec![
            PathBuf::from(".include-resolver.yaml"),
            PathBuf::from(".include-resolver.yml"),
            PathBuf::from("include-resolver.yaml"),
            PathBuf::from("include-resolver.yml"),
        ];

        for candidate in candidates {
            if candidate.exists() {
                return Ok(candidate);
            }
        }

        let config_dir = dirs::config_local_dir()
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .context("Could not determine config directory")?;

        Ok(config_dir.join("include-resolver").join("config.yaml"))
    }

    /// Policy settings as a store
    pub fn policy_map(&self) -> Result<PolicyMap> {
        PolicyMap::from_settings(&self.policies).wrap_err("Invalid policy configuration")
    }

    /// Set a policy by id
    pub fn set_policy(&mut self, id: PolicyId, status: PolicyStatus) {
        self.policies.insert(id.to_string(), status);
    }

    /// Register an export file unless it is already known
    pub fn add_export_file(&mut self, export: ExportFile) {
        if !self.export_files.iter().any(|e| e.path == export.path) {
            self.export_files.push(export);
        }
    }

    /// Create a strict configuration preset: export results may not be included
    pub fn strict() -> Self {
        let mut config = Self::default();
        config.set_policy(PolicyId::Cmp0024, PolicyStatus::New);
        config
    }

    /// Create a legacy configuration preset: export results are included silently
    pub fn legacy() -> Self {
        let mut config = Self::default();
        config.set_policy(PolicyId::Cmp0024, PolicyStatus::Old);
        config
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extends: None,
            module_path: Vec::new(),
            modules_root: None,
            policies: BTreeMap::new(),
            export_files: Vec::new(),
        }
    }
}
