//! pact - construct and inspect package manager actions
//!
//! Thin CLI over the action crates: builds objects by class name, reports
//! effective fetch options, and asks configured repositories which actions
//! they might support.

mod cli;
mod display;
mod error;

use crate::cli::{Cli, Commands};
use crate::display::{ClassInfo, CommandOutput, OutputRenderer};
use crate::error::CliError;
use clap::Parser;
use pact_config::{fixed_paths, Config};
use pact_repository::RepositorySet;
use pact_types::{construct, ActionKind, AnySupportsActionTest, Arg, Class, FetchActionOptions};
use std::process;
use tracing::{debug, error, info};

#[tokio::main]
async fn main() {
    // Parse command line arguments first to check for JSON mode
    let cli = Cli::parse();
    let json_mode = cli.global.json;

    init_tracing(json_mode, cli.global.debug);

    if let Err(e) = run(cli).await {
        error!("Application error: {}", e);
        if json_mode {
            match e.to_json() {
                Ok(json) => println!("{json}"),
                Err(err) => eprintln!("Failed to serialize error: {err}"),
            }
        }
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Main application logic
async fn run(cli: Cli) -> Result<(), CliError> {
    info!("Starting pact v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration with proper precedence:
    // 1. Start with file config (or defaults)
    let mut config = Config::load_or_default(cli.global.config.as_deref()).await?;

    // 2. Merge environment variables
    config.merge_env()?;

    // 3. Apply CLI flags (highest precedence)
    apply_cli_config(&mut config, &cli.command);

    let json_output =
        cli.global.json || config.general.default_output == pact_types::OutputFormat::Json;
    let renderer = OutputRenderer::new(json_output);

    let output = execute_command(cli.command, &config)?;
    renderer.render(&output)?;

    debug!("Command completed successfully");
    Ok(())
}

/// Execute the specified command
fn execute_command(command: Commands, config: &Config) -> Result<CommandOutput, CliError> {
    match command {
        Commands::New { class, args } => {
            let class: Class = class.parse()?;
            let args = args
                .iter()
                .map(|raw| parse_arg(raw))
                .collect::<Result<Vec<_>, _>>()?;
            let object = construct(class, &args)?;
            Ok(CommandOutput::Object(object))
        }

        Commands::Classes => Ok(CommandOutput::Classes(
            Class::ALL.into_iter().map(ClassInfo::from).collect(),
        )),

        Commands::FetchOptions { .. } => Ok(CommandOutput::FetchOptions(config.fetch)),

        Commands::Supports { action, repository } => {
            let action: ActionKind = action.parse()?;
            let probe = AnySupportsActionTest::from(action);
            let repositories = RepositorySet::from_config(&config.repositories);

            let names = match repository {
                Some(name) => {
                    let repo = repositories.get(&name)?;
                    if repo.some_ids_might_support_action(&probe) {
                        vec![name]
                    } else {
                        Vec::new()
                    }
                }
                None => repositories
                    .might_support(&probe)
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
            };

            Ok(CommandOutput::Supports {
                action,
                repositories: names,
            })
        }
    }
}

/// Parse one command line argument: JSON if it parses, otherwise a string
fn parse_arg(raw: &str) -> Result<Arg, CliError> {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(value) => Ok(Arg::from_json(value)?),
        Err(_) => Ok(Arg::Str(raw.to_string())),
    }
}

/// Apply CLI configuration overrides (highest precedence)
fn apply_cli_config(config: &mut Config, command: &Commands) {
    if let Commands::FetchOptions {
        safe_resume,
        fetch_unneeded,
    } = command
    {
        config.fetch = FetchActionOptions::new(
            config.fetch.safe_resume() || *safe_resume,
            config.fetch.fetch_unneeded() || *fetch_unneeded,
        );
    }
}

/// Initialize tracing/logging
fn init_tracing(json_mode: bool, debug_enabled_flag: bool) {
    let debug_enabled = std::env::var("RUST_LOG").is_ok() || debug_enabled_flag;

    if debug_enabled {
        // Debug mode: structured JSON logs to file
        let log_dir = std::path::Path::new(fixed_paths::LOGS_DIR);
        if let Err(e) = std::fs::create_dir_all(log_dir) {
            eprintln!("Warning: Failed to create log directory: {e}");
        }

        let log_file = log_dir.join(format!(
            "pact-{}.log",
            chrono::Utc::now().format("%Y%m%d-%H%M%S")
        ));

        match std::fs::File::create(&log_file) {
            Ok(file) => {
                tracing_subscriber::fmt()
                    .json()
                    .with_writer(file)
                    .with_env_filter(
                        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(
                            |_| tracing_subscriber::EnvFilter::new("info,pact=debug,pact_types=debug"),
                        ),
                    )
                    .init();

                if !json_mode {
                    eprintln!("Debug logging enabled: {}", log_file.display());
                }
            }
            Err(e) => {
                eprintln!("Warning: Failed to create log file: {e}");
                // Fallback to stderr
                tracing_subscriber::fmt()
                    .with_writer(std::io::stderr)
                    .with_env_filter(
                        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(
                            |_| tracing_subscriber::EnvFilter::new("info,pact=info"),
                        ),
                    )
                    .init();
            }
        }
    } else if json_mode {
        // JSON mode: suppress console logging to avoid contaminating output
        tracing_subscriber::fmt()
            .with_writer(std::io::sink)
            .with_env_filter("off")
            .init();
    } else {
        // Normal mode: minimal logging to stderr
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(tracing_subscriber::EnvFilter::new("error"))
            .init();
    }
}
