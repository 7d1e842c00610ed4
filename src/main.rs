use clap::Parser;
use eyre::{Result, WrapErr};
use include_resolver::cli::Cli;
use include_resolver::config::{Config, ExportFile};
use include_resolver::directive::{IncludeContext, include};
use include_resolver::host::{FsHost, path::collapse_full_path};
use include_resolver::output::{IncludeReport, get_formatter};
use include_resolver::policy::{PolicyId, PolicyStatus};
use std::path::Path;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let source_dir = cli
        .get_source_dir()
        .wrap_err("Failed to determine source directory")?;

    let mut config = Config::load(cli.config.as_ref()).wrap_err("Failed to load configuration")?;
    apply_cli_overrides(&mut config, &cli, &source_dir)?;

    if cli.show_config {
        return show_config(&config);
    }

    let mut host = FsHost::new(&config)?;

    if cli.list_modules {
        return list_modules(&host);
    }

    let ctx = IncludeContext::from_host(&source_dir, &host);
    let result = include(&mut host, &ctx, cli.args.as_slice());
    if let Err(e) = &result {
        tracing::error!("include {e}");
    }

    let report = IncludeReport::from_host(cli.args.clone(), result, &host);
    let formatter = get_formatter(&cli.format);
    println!("{}", formatter.format_report(&report));

    if !report.succeeded() {
        std::process::exit(1);
    }

    Ok(())
}

/// Log to stderr; `RUST_LOG` wins over `--verbose`
fn init_tracing(verbose: bool) {
    let default = if verbose { "include_resolver=debug" } else { "include_resolver=info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Apply CLI overrides to the configuration
fn apply_cli_overrides(config: &mut Config, cli: &Cli, source_dir: &Path) -> Result<()> {
    // CLI module directories are searched first
    let mut module_path: Vec<_> = cli
        .module_path
        .iter()
        .map(|dir| collapse_full_path(&dir.to_string_lossy(), source_dir))
        .collect();
    module_path.append(&mut config.module_path);
    config.module_path = module_path;

    for export in &cli.export_file {
        let path = collapse_full_path(&export.to_string_lossy(), source_dir);
        config.add_export_file(ExportFile::new(path));
    }

    for (id, status) in cli.get_policy_settings() {
        let id: PolicyId = id.parse()?;
        let status: PolicyStatus = status.parse()?;
        config.set_policy(id, status);
    }

    Ok(())
}

/// List the modules the include directive can find
fn list_modules(host: &FsHost) -> Result<()> {
    let modules = host.available_modules();
    if modules.is_empty() {
        println!("No modules found");
        return Ok(());
    }

    println!("Available modules:");
    println!();
    for (name, path) in modules {
        println!("  {:<30} {}", name, path.display());
    }

    Ok(())
}

/// Show the effective configuration
fn show_config(config: &Config) -> Result<()> {
    let yaml = serde_yaml::to_string(config).wrap_err("Failed to serialize configuration")?;

    println!("Effective configuration:");
    println!("{}", yaml);

    Ok(())
}
