//! Command-line interface for repo-corpus
//!
//! `build` and `info` work on a local checkout; `sync` mirrors a repository
//! first; `analyze` builds a corpus and sends it to the analysis backend.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod analyze;
mod build;
mod info;
mod sync;
mod utils;

/// Turn repositories into prioritized Markdown corpora for AI review
#[derive(Parser)]
#[command(name = "repo-corpus")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit log records as JSON lines
    #[arg(long, global = true, env = "REPO_CORPUS_LOG_JSON")]
    log_json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a corpus document from a local checkout
    Build(build::BuildArgs),

    /// Show the prioritized file order without writing anything
    Info(info::InfoArgs),

    /// Mirror a repository and build its corpus
    Sync(sync::SyncArgs),

    /// Build a corpus and run a prompt against it
    Analyze(analyze::AnalyzeArgs),
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    match cli.command {
        Commands::Build(args) => build::run(args),
        Commands::Info(args) => info::run(args),
        Commands::Sync(args) => sync::run(args),
        Commands::Analyze(args) => analyze::run(args),
    }
}

// RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
fn init_tracing(verbose: bool, json: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    let fmt_layer = if json {
        fmt::layer().json().with_writer(std::io::stderr).boxed()
    } else {
        fmt::layer().with_writer(std::io::stderr).boxed()
    };

    let _ = tracing_subscriber::registry().with(fmt_layer).with(filter).try_init();
}
