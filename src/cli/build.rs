//! Build command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use super::utils::CorpusFlags;
use crate::corpus::{CorpusBuilder, CorpusRequest, MarkdownCorpusBuilder};
use crate::render::write_report;
use crate::utils::format_with_commas;

#[derive(Args)]
pub struct BuildArgs {
    /// Local repository checkout
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    #[command(flatten)]
    pub flags: CorpusFlags,

    /// Write the corpus here instead of `<repo>_corpus_<timestamp>.md`
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Directory for the derived corpus file name
    #[arg(long, value_name = "DIR", conflicts_with = "output")]
    pub output_dir: Option<PathBuf>,

    /// Also write a JSON report describing the build
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Leave the timestamp out of the JSON report
    #[arg(long, requires = "report")]
    pub no_timestamp: bool,
}

pub fn run(args: BuildArgs) -> Result<()> {
    let mut config = args.flags.resolve(&args.path)?;
    if let Some(dir) = &args.output_dir {
        config.output_dir = Some(dir.clone());
    }

    let mut request = CorpusRequest::from_config(&config);
    request.output_path = args.output.clone();

    let outcome = MarkdownCorpusBuilder::from_config(&config)
        .build_corpus(&args.path, &request)
        .with_context(|| format!("Failed to build corpus for {}", args.path.display()))?;

    if let Some(report_path) = &args.report {
        let repo_name = args
            .path
            .canonicalize()
            .ok()
            .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            .unwrap_or_default();
        write_report(report_path, &repo_name, &outcome, config.max_bytes, !args.no_timestamp)
            .with_context(|| format!("Failed writing report {}", report_path.display()))?;
    }

    println!("Corpus: {}", outcome.output_path.display());
    println!("  Files included: {}", outcome.file_count);
    println!(
        "  Size: {} of {} bytes",
        format_with_commas(outcome.total_bytes),
        format_with_commas(config.max_bytes)
    );
    println!("  Complete: {}", if outcome.is_complete { "yes" } else { "no (size limit reached)" });
    for skipped in &outcome.skipped {
        println!("  Skipped {}: {}", skipped.relative_path, skipped.reason);
    }

    Ok(())
}
