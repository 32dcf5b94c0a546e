use std::path::Path;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info, warn, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use tokio::runtime::Runtime;

use artifact_uploader::cli::{Args, Commands};
use artifact_uploader::config::{build_environment, parse_key_value, UploadConfig};
use artifact_uploader::constants::{EXIT_DEGRADED, EXIT_FATAL, EXIT_SUCCESS};
use artifact_uploader::models::{RunOutcome, UploadSummary};
use artifact_uploader::security::{safe_error_message, scrub_credentials};
use artifact_uploader::upload::run_against_s3;
use artifact_uploader::utils::summary::write_upload_summary;

fn main() {
    // Parse arguments
    let args = Args::parse();

    if let Err(e) = initialize_logging(args.verbose) {
        eprintln!("{:#}", e);
        process::exit(EXIT_FATAL);
    }

    let code = match run(&args) {
        Ok(RunOutcome::Unchanged) => EXIT_SUCCESS,
        Ok(RunOutcome::Degraded) => EXIT_DEGRADED,
        Err(e) => {
            error!("{}", safe_error_message("Upload step failed", &format!("{:#}", e)));
            EXIT_FATAL
        }
    };
    process::exit(code);
}

/// Initialize logging with the specified verbosity level
fn initialize_logging(verbose: bool) -> Result<()> {
    let log_level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };
    TermLogger::init(
        log_level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .context("Failed to initialize logger")?;
    Ok(())
}

fn run(args: &Args) -> Result<RunOutcome> {
    // Handle subcommands
    if let Some(cmd) = &args.command {
        handle_subcommand(cmd)?;
        return Ok(RunOutcome::Unchanged);
    }

    let config = load_config(args)?;
    let overrides = args
        .env
        .iter()
        .map(|pair| parse_key_value(pair))
        .collect::<Result<Vec<_>>>()?;
    let env = build_environment(&overrides);

    info!(
        "Uploading from {} to bucket {} at {}",
        config.start_path(&args.workspace).display(),
        config.bucket,
        scrub_credentials(&config.host)
    );

    let runtime = Runtime::new().context("Failed to create Tokio runtime")?;
    let summary = runtime.block_on(run_against_s3(&config, &args.workspace, &env))?;

    write_summary_if_requested(args.summary.as_deref(), &config, &summary);
    Ok(summary.outcome())
}

/// Handle the init-config subcommand
fn handle_subcommand(cmd: &Commands) -> Result<()> {
    match cmd {
        Commands::InitConfig { path } => {
            info!("Creating default configuration file at {}", path.display());
            UploadConfig::create_default_config_file(path)?;
            info!("Configuration created successfully");
            Ok(())
        }
    }
}

/// Load the YAML configuration (if any), apply CLI overrides and validate
fn load_config(args: &Args) -> Result<UploadConfig> {
    let mut config = match &args.config {
        Some(path) => UploadConfig::from_yaml_file(path)?,
        None => UploadConfig::default(),
    };
    args.apply_to(&mut config);
    config.validate().context("Invalid upload configuration")?;
    Ok(config)
}

fn write_summary_if_requested(path: Option<&Path>, config: &UploadConfig, summary: &UploadSummary) {
    if let Some(path) = path {
        if let Err(e) = write_upload_summary(path, config, summary) {
            warn!("{}", safe_error_message("Failed to write upload summary", &format!("{:#}", e)));
        }
    }
}
