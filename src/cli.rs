use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for the evaluation report
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output with colors
    Human,
    /// JSON format for machine processing
    Json,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Human
    }
}

/// Command-line interface for evaluating a single include() directive
#[derive(Parser)]
#[command(
    name = "include-resolver",
    about = "Evaluate an include() directive of a build-configuration script",
    version = env!("CARGO_PKG_VERSION"),
    after_help = "Example: include-resolver -C src -M cmake Utils OPTIONAL RESULT_VARIABLE R"
)]
pub struct Cli {
    /// Arguments of the directive: <file|module> [OPTIONAL] [NO_POLICY_SCOPE] [RESULT_VARIABLE <var>]
    #[arg(help = "Directive arguments")]
    pub args: Vec<String>,

    /// Current source directory
    #[arg(short = 'C', long, help = "Directory relative targets are resolved against")]
    pub source_dir: Option<PathBuf>,

    /// Module directories searched before the configured ones
    #[arg(short = 'M', long, help = "Additional module directory (repeatable)")]
    pub module_path: Vec<PathBuf>,

    /// Configuration file path
    #[arg(short, long, help = "Path to configuration file")]
    pub config: Option<PathBuf>,

    /// Files to treat as export() results
    #[arg(long, help = "Register a generated export file (repeatable)")]
    pub export_file: Vec<PathBuf>,

    /// Policy settings (format: ID=STATUS)
    #[arg(long, help = "Set a policy, e.g. CMP0024=NEW (comma-separated)")]
    pub policy: Vec<String>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "human", help = "Output format")]
    pub format: OutputFormat,

    /// List all available modules and exit
    #[arg(long, help = "List modules found in the module directories and exit")]
    pub list_modules: bool,

    /// Show configuration and exit
    #[arg(long, help = "Show effective configuration and exit")]
    pub show_config: bool,

    /// Enable verbose output
    #[arg(short, long, help = "Enable debug logging")]
    pub verbose: bool,
}

impl Cli {
    /// Parse policy settings from comma-separated `ID=STATUS` strings
    pub fn get_policy_settings(&self) -> Vec<(String, String)> {
        self.policy
            .iter()
            .flat_map(|s| s.split(','))
            .filter_map(|s| {
                let (id, status) = s.split_once('=')?;
                let (id, status) = (id.trim(), status.trim());
                if id.is_empty() || status.is_empty() {
                    None
                } else {
                    Some((id.to_string(), status.to_string()))
                }
            })
            .collect()
    }

    /// Source directory, defaulting to the current directory
    pub fn get_source_dir(&self) -> std::io::Result<PathBuf> {
        let cwd = std::env::current_dir()?;
        Ok(match &self.source_dir {
            Some(dir) if dir.is_relative() => cwd.join(dir),
            Some(dir) => dir.clone(),
            None => cwd,
        })
    }
}

// Provide a default implementation for testing
impl Default for Cli {
    fn default() -> Self {
        Self {
            args: Vec::new(),
            source_dir: None,
            module_path: Vec::new(),
            config: None,
            export_file: Vec::new(),
            policy: Vec::new(),
            format: OutputFormat::default(),
            list_modules: false,
            show_config: false,
            verbose: false,
        }
    }
}
