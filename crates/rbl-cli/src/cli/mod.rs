//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;

use anyhow::Result;
use args::{Cli, Commands};
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::output::OutputFormat;

/// Run the CLI application.
pub async fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    init_logging(&cli);

    if cli.no_color {
        colored::control::set_override(false);
    }

    // Load configuration
    let config = Config::load()?;

    // Flags win over the config file
    let output_format = cli
        .output
        .or(config.output_format)
        .unwrap_or(OutputFormat::Pretty);

    // Create context for commands
    let ctx = commands::Context {
        output_format,
        explain: cli.explain || config.explain_by_default,
        verbose: cli.verbose,
        catalog: cli.catalog.or(config.catalog),
        engine: config.engine,
        overrides: commands::EngineOverrides {
            concurrency: cli.concurrency,
            timeout_ms: cli.timeout_ms,
        },
    };

    // Dispatch to appropriate command
    match cli.command {
        Commands::Check(args) => commands::check::execute(ctx, args).await,
        Commands::Providers(args) => commands::providers::execute(&ctx, &args),
        Commands::Serve(args) => commands::serve::execute(ctx, args).await,
    }
}

/// Logs go to stderr so machine-readable output stays clean.
fn init_logging(cli: &Cli) {
    let fallback = cli.log_level.clone().unwrap_or_else(|| {
        match (&cli.command, cli.verbose) {
            (_, true) => "debug",
            (Commands::Serve(_), false) => "info",
            _ => "warn",
        }
        .to_string()
    });

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(!cli.no_color)
        .with_writer(std::io::stderr)
        .init();
}
