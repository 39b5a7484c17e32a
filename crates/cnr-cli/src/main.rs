//! # cnr CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.
//! Uses clap derive macros; verbosity flags drive the tracing filter.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cnr_cli::auth::{run_login, run_logout, run_register, LoginArgs, RegisterArgs};
use cnr_cli::pensions::{run_pensions, run_show, PensionsArgs, ShowArgs};
use cnr_cli::stats::{run_stats, StatsArgs};

/// CNR pension-risk dashboard client.
///
/// Connects to the CNR backend (`CNR_API_URL`, default
/// `http://localhost:8080/api/v1`) and renders the pension working set,
/// filter summaries, and risk statistics in the terminal.
#[derive(Parser, Debug)]
#[command(name = "cnr", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Log in and persist the session.
    Login(LoginArgs),

    /// Register a new account.
    Register(RegisterArgs),

    /// Clear the persisted session.
    Logout,

    /// List one page of pension records with filters and summary counts.
    Pensions(PensionsArgs),

    /// Show a single pension case in full.
    Show(ShowArgs),

    /// Risk-level clusters and the gender split for the current filter.
    Stats(StatsArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Login(args) => run_login(&args).await,
        Commands::Register(args) => run_register(&args).await,
        Commands::Logout => run_logout().await,
        Commands::Pensions(args) => run_pensions(&args).await,
        Commands::Show(args) => run_show(&args).await,
        Commands::Stats(args) => run_stats(&args).await,
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
