//! Info command implementation

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::utils::CorpusFlags;
use crate::rank::{classify_tier, prioritize_files, tier_counts};
use crate::scan::{render_tree, FileCollector};
use crate::utils::format_with_commas;

#[derive(Args)]
pub struct InfoArgs {
    /// Local directory path to analyze
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    #[command(flatten)]
    pub flags: CorpusFlags,

    /// Skip the directory tree
    #[arg(long)]
    pub no_tree: bool,
}

pub fn run(args: InfoArgs) -> Result<()> {
    let root = args.path.canonicalize()?;
    if !root.is_dir() {
        anyhow::bail!("Path is not a directory: {}", root.display());
    }
    let config = args.flags.resolve(&root)?;

    let mut collector = FileCollector::from_config(root.clone(), &config);
    let files = prioritize_files(collector.collect());
    let stats = collector.stats().clone();

    let repo_name = root.file_name().and_then(|n| n.to_str()).unwrap_or("");
    println!("Repository: {}", repo_name);

    println!("Tiers:");
    for (tier, count) in tier_counts(&files) {
        println!("  {}: {} files", tier, count);
    }

    let mut disk_bytes = 0u64;
    println!("Priority order:");
    for (index, file) in files.iter().enumerate() {
        disk_bytes += file.size_on_disk().unwrap_or(0);
        println!("  {:>4}. {} [{}]", index + 1, file.relative_path, classify_tier(file));
    }

    println!("Statistics:");
    println!("  Files seen: {}", stats.files_seen);
    println!("  Files included: {}", stats.files_included);
    println!("  Files skipped (excluded dir): {}", stats.files_skipped_excluded);
    println!("  Files skipped (extension): {}", stats.files_skipped_extension);
    println!("  Unreadable entries: {}", stats.entries_unreadable);
    println!(
        "  Bytes on disk: {} (budget {})",
        format_with_commas(disk_bytes),
        format_with_commas(config.max_bytes)
    );

    if !args.no_tree {
        println!("\n{}", render_tree(repo_name, &files));
    }

    Ok(())
}
