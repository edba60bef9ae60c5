//! `warden` -- CLI binary for the warden request-mediation pipeline.
//!
//! Provides the following subcommands:
//!
//! - `warden serve` -- Serve the HTTP API (`POST /orchestrate`, `GET /health`).
//! - `warden run` -- Orchestrate a single request and print the result.
//! - `warden classify` -- Show the task category for a text.
//! - `warden check` -- Show the category and policy verdict without dispatching.
//! - `warden audit show` -- Display recent audit records.
//! - `warden config show` -- Display the resolved configuration.

use clap::{Parser, Subcommand};

mod commands;

/// warden request-mediation CLI.
#[derive(Parser)]
#[command(name = "warden", about = "Policy-aware request mediation for LLM backends", version)]
struct Cli {
    /// Enable verbose (debug-level) logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Serve the HTTP API.
    Serve(commands::serve::ServeArgs),

    /// Orchestrate a single request.
    Run(commands::run::RunArgs),

    /// Classify a request without evaluating policy.
    Classify {
        /// Request text.
        text: String,
    },

    /// Classify and evaluate policy without dispatching or auditing.
    Check {
        /// Request text.
        text: String,

        /// Print the verdict as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Inspect the audit trail.
    Audit {
        #[command(subcommand)]
        action: AuditCmd,
    },

    /// Show resolved configuration.
    Config {
        #[command(subcommand)]
        action: ConfigCmd,
    },
}

/// Subcommands for `warden audit`.
#[derive(Subcommand)]
enum AuditCmd {
    /// Show the most recent audit records.
    Show {
        /// Maximum number of records to show (most recent last).
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,

        /// Print records as JSON lines instead of a table.
        #[arg(long)]
        json: bool,

        /// Config file path (overrides auto-discovery).
        #[arg(short, long)]
        config: Option<String>,
    },
}

/// Subcommands for `warden config`.
#[derive(Subcommand)]
enum ConfigCmd {
    /// Show the full resolved configuration.
    Show {
        /// Config file path (overrides auto-discovery).
        #[arg(short, long)]
        config: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Serve(args) => commands::serve::run(args).await?,
        Commands::Run(args) => commands::run::run(args).await?,
        Commands::Classify { text } => commands::check::classify(&text),
        Commands::Check { text, json } => commands::check::check(&text, json)?,
        Commands::Audit { action } => match action {
            AuditCmd::Show {
                limit,
                json,
                config,
            } => {
                let cfg = commands::load_config(config.as_deref())?;
                commands::audit_cmd::audit_show(&cfg, limit, json).await?;
            }
        },
        Commands::Config { action } => match action {
            ConfigCmd::Show { config } => {
                let cfg = commands::load_config(config.as_deref())?;
                commands::config_cmd::config_show(&cfg);
            }
        },
    }

    Ok(())
}
