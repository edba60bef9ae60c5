//! `warden run` -- orchestrate one request from the command line.
//!
//! Prints the orchestration result as pretty JSON on stdout. The request
//! is audited exactly as if it had arrived over HTTP.
//!
//! # Examples
//!
//! ```text
//! warden run "Summarize the attached document for meeting notes."
//! warden run --user alice "What is the capital of France?"
//! ```

use clap::Args;

use warden_core::bootstrap::build_orchestrator;

/// Arguments for the `warden run` subcommand.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Request text.
    pub text: String,

    /// User id recorded in the audit trail.
    #[arg(short, long, default_value = "cli")]
    pub user: String,

    /// Config file path (overrides auto-discovery).
    #[arg(short, long)]
    pub config: Option<String>,
}

pub async fn run(args: RunArgs) -> anyhow::Result<()> {
    let config = super::load_config(args.config.as_deref())?;
    let orchestrator = build_orchestrator(&config)?;

    let result = orchestrator.orchestrate(&args.user, &args.text).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
