//! Shared CLI utilities.

use anyhow::Result;
use clap::Args;
use std::path::{Path, PathBuf};

use crate::config::load_config;
use crate::domain::Config;

/// Parse a comma-separated string into a `Vec<String>`, trimming whitespace and
/// discarding empty segments.  Returns `None` when `value` is `None`.
pub fn parse_csv(value: &Option<String>) -> Option<Vec<String>> {
    value.as_ref().map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| part.to_string())
            .collect::<Vec<_>>()
    })
}

/// Flags shared by every command that builds a corpus.
#[derive(Args, Debug, Clone, Default)]
pub struct CorpusFlags {
    /// Path to config file (repo-corpus.toml or .repo-corpus.yml)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Byte budget for the corpus document
    #[arg(long, value_name = "BYTES")]
    pub max_bytes: Option<u64>,

    /// Include only these extensions (comma-separated, e.g., '.py,.ts')
    #[arg(short = 'i', long, value_name = "EXTS")]
    pub include_ext: Option<String>,

    /// Exclude these directory names in addition to the defaults (comma-separated)
    #[arg(short = 'e', long, value_name = "DIRS")]
    pub exclude_dir: Option<String>,

    /// Maximum traversal depth
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,
}

impl CorpusFlags {
    /// Load config from `base_dir` (or `--config`) and apply the flags on top.
    pub fn resolve(&self, base_dir: &Path) -> Result<Config> {
        let mut config = load_config(base_dir, self.config.as_deref())?;
        self.apply(&mut config);
        Ok(config)
    }

    fn apply(&self, config: &mut Config) {
        if let Some(max_bytes) = self.max_bytes {
            config.max_bytes = max_bytes;
        }
        if let Some(extensions) = parse_csv(&self.include_ext) {
            config.include_extensions = extensions
                .iter()
                .map(|ext| crate::domain::config::normalize_extension(ext))
                .collect();
        }
        if let Some(dirs) = parse_csv(&self.exclude_dir) {
            config.exclude_dirs.extend(dirs);
        }
        if let Some(depth) = self.max_depth {
            config.max_depth = depth;
        }
    }
}
