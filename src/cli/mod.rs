//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod config;
pub mod pick;
pub mod resolve;
pub mod serve;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Location picker: place search and coordinate entry
#[derive(Parser)]
#[command(name = "loc-picker")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a place name or "lat, lon" once
    Resolve(resolve::ResolveArgs),

    /// Interactive picker driven from stdin
    Pick(pick::PickArgs),

    /// Start web server (foreground)
    Serve(serve::ServeArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

/// Run the CLI
pub async fn run() -> crate::error::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve(args) => {
            init_logging("warn");
            resolve::run(args).await
        }
        Commands::Pick(args) => {
            init_logging("warn");
            pick::run(args).await
        }
        Commands::Serve(args) => {
            init_logging("info");
            serve::run(args).await
        }
        Commands::Config(args) => config::run(args),
    }
}

/// Install the tracing subscriber; RUST_LOG overrides `default`
fn init_logging(default: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}
