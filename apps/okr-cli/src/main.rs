//! # okr-cli
//!
//! Command-line surface for the OKR builder session:
//! - `okr shell` — interactive manual CRUD + commit workflow (the human actor)
//! - `okr bridge` — JSONL event loop for agent mutation payloads on stdin
//! - `okr demo` — scripted walkthrough over the sample session
//! - `okr schema` — print the JSON Schema for agent mutation requests
//!
//! Session state lives in memory for the lifetime of one invocation;
//! there is deliberately no durable store.

mod commands;
mod config;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::config::BuilderConfig;

/// OKR builder CLI — draft, track, and commit objectives.
#[derive(Parser)]
#[command(name = "okr", version, about)]
struct Cli {
    /// Project root directory (where okr.toml is looked up).
    #[arg(long, default_value = ".")]
    project_root: PathBuf,

    /// Start from the built-in sample objectives instead of an empty session.
    #[arg(long)]
    sample: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive session: manual CRUD and the commit confirmation prompt.
    Shell,
    /// Agent event loop: one JSON mutation request per stdin line,
    /// acks and context snapshots as JSONL on stdout.
    Bridge,
    /// Play a scripted session over the sample objectives.
    Demo,
    /// Print the JSON Schema for agent mutation requests.
    Schema,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = BuilderConfig::load(&cli.project_root)?;
    if cli.sample {
        config.sample_data = true;
    }

    match cli.command {
        Commands::Shell => commands::shell::execute(&config),
        Commands::Bridge => commands::bridge::execute(&config),
        Commands::Demo => commands::demo::execute(&config),
        Commands::Schema => commands::schema::execute(),
    }
}
