//! Corpus building: collector → classifier → writer.

use crate::domain::{Config, CorpusOutcome, DEFAULT_MAX_BYTES};
use crate::error::{CorpusError, Result};
use crate::rank::prioritize_files;
use crate::render::{CancelFlag, CorpusWriter};
use crate::scan::FileCollector;
use chrono::{DateTime, Utc};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Parameters supplied per build by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusRequest {
    /// Directory names excluded on top of the baseline set.
    pub exclude_dirs: Vec<String>,
    pub max_bytes: u64,
    /// Explicit output file; derived from the repository name when `None`.
    pub output_path: Option<PathBuf>,
}

impl Default for CorpusRequest {
    fn default() -> Self {
        Self { exclude_dirs: Vec::new(), max_bytes: DEFAULT_MAX_BYTES, output_path: None }
    }
}

impl CorpusRequest {
    pub fn from_config(config: &Config) -> Self {
        Self { exclude_dirs: config.exclude_dirs.clone(), max_bytes: config.max_bytes, output_path: None }
    }
}

/// Port for anything that turns a repository checkout into a corpus document.
pub trait CorpusBuilder: Send + Sync {
    fn build_corpus(&self, repo_path: &Path, request: &CorpusRequest) -> Result<CorpusOutcome>;
}

/// Builds the prioritized Markdown corpus.
#[derive(Debug, Clone, Default)]
pub struct MarkdownCorpusBuilder {
    include_extensions: Option<Vec<String>>,
    max_depth: Option<usize>,
    output_dir: Option<PathBuf>,
    cancel: Option<CancelFlag>,
}

impl MarkdownCorpusBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            include_extensions: Some(config.include_extensions.clone()),
            max_depth: Some(config.max_depth),
            output_dir: config.output_dir.clone(),
            cancel: None,
        }
    }

    pub fn include_extensions(mut self, extensions: Vec<String>) -> Self {
        self.include_extensions = Some(extensions);
        self
    }

    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Directory for derived output paths instead of the repository root.
    pub fn output_dir(mut self, dir: PathBuf) -> Self {
        self.output_dir = Some(dir);
        self
    }

    pub fn cancel_flag(mut self, flag: CancelFlag) -> Self {
        self.cancel = Some(flag);
        self
    }

    fn collector(&self, root: PathBuf, request: &CorpusRequest) -> FileCollector {
        let mut collector = FileCollector::new(root).exclude_dirs(request.exclude_dirs.clone());
        if let Some(extensions) = &self.include_extensions {
            collector = collector.include_extensions(extensions.clone());
        }
        if let Some(depth) = self.max_depth {
            collector = collector.max_depth(depth);
        }
        collector
    }
}

impl CorpusBuilder for MarkdownCorpusBuilder {
    fn build_corpus(&self, repo_path: &Path, request: &CorpusRequest) -> Result<CorpusOutcome> {
        let root = resolve_root(repo_path)?;
        let repo_name = repo_name(&root);
        tracing::info!("Building markdown corpus for {}", root.display());

        let mut collector = self.collector(root.clone(), request);
        let files = collector.collect();
        tracing::info!("Found {} eligible files", files.len());

        let files = prioritize_files(files);
        tracing::debug!("Prioritized {} files", files.len());

        let now = Utc::now();
        let output_path = match &request.output_path {
            Some(path) => path.clone(),
            None => derive_output_path(self.output_dir.as_deref().unwrap_or(&root), &repo_name, now),
        };
        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut writer = CorpusWriter::new(repo_name.clone(), request.max_bytes).generated_at(now);
        if let Some(flag) = &self.cancel {
            writer = writer.cancel_flag(flag.clone());
        }

        let mut out = BufWriter::new(File::create(&output_path)?);
        let summary = match writer.write(&mut out, &files) {
            Ok(summary) => summary,
            Err(err) => {
                drop(out);
                let _ = std::fs::remove_file(&output_path);
                return Err(err);
            }
        };

        tracing::info!(
            "Markdown corpus generated: {} ({} files, {} bytes, complete={})",
            output_path.display(),
            summary.file_count,
            summary.total_bytes,
            summary.is_complete
        );
        if !summary.is_complete {
            tracing::warn!(
                "Corpus for {} hit the {} byte limit; not all files were included",
                repo_name,
                request.max_bytes
            );
        }

        Ok(CorpusOutcome {
            output_path,
            file_count: summary.file_count,
            total_bytes: summary.total_bytes,
            is_complete: summary.is_complete,
            included: summary.included,
            skipped: summary.skipped,
        })
    }
}

/// Build a corpus with the default builder.
pub fn build_corpus(repo_path: &Path, request: &CorpusRequest) -> Result<CorpusOutcome> {
    MarkdownCorpusBuilder::new().build_corpus(repo_path, request)
}

fn resolve_root(repo_path: &Path) -> Result<PathBuf> {
    match repo_path.canonicalize() {
        Ok(root) if root.is_dir() => Ok(root),
        _ => Err(CorpusError::SourceNotFound(repo_path.to_path_buf())),
    }
}

fn repo_name(root: &Path) -> String {
    root.file_name().and_then(|n| n.to_str()).unwrap_or("repository").to_string()
}

/// `<dir>/<repo>_corpus_<YYYYMMDDTHHMMSSZ>.md`
pub fn derive_output_path(dir: &Path, repo_name: &str, at: DateTime<Utc>) -> PathBuf {
    dir.join(format!("{}_corpus_{}.md", repo_name, at.format("%Y%m%dT%H%M%SZ")))
}
