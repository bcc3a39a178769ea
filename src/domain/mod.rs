//! Core domain types shared by the collector, classifier and writer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

pub mod config;
pub mod rules;

pub use config::{AnalysisConfig, Config, MirrorConfig, MirrorKind, ProviderKind};
pub use rules::{
    baseline_exclude_dirs, default_include_extensions, is_root_doc_name, DEFAULT_MAX_BYTES,
    DEFAULT_MAX_DEPTH,
};

pub const REPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Reference to one collected file on disk.
///
/// The byte size is not captured at collection time; call
/// [`FileRef::size_on_disk`] when it is needed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileRef {
    pub path: PathBuf,
    /// Root-relative path with forward slashes.
    pub relative_path: String,
    /// Extension as it appears on disk, without the leading dot.
    pub extension: String,
}

impl FileRef {
    /// Build a reference for `path` below `root`. Returns `None` when `path`
    /// is not inside `root` or is not valid UTF-8.
    pub fn new(root: &Path, path: PathBuf) -> Option<Self> {
        let rel = path.strip_prefix(root).ok()?.to_str()?;
        let relative_path = crate::utils::normalize_path(rel);
        if relative_path.is_empty() {
            return None;
        }
        let extension =
            path.extension().and_then(|e| e.to_str()).map(str::to_string).unwrap_or_default();
        Some(Self { path, relative_path, extension })
    }

    pub fn file_name(&self) -> &str {
        self.relative_path.rsplit('/').next().unwrap_or(&self.relative_path)
    }

    /// Root-relative parent directory, empty for files at the root.
    pub fn parent(&self) -> &str {
        match self.relative_path.rfind('/') {
            Some(idx) => &self.relative_path[..idx],
            None => "",
        }
    }

    /// Number of directories between the repository root and the file.
    pub fn depth(&self) -> usize {
        self.relative_path.matches('/').count()
    }

    /// Lowercase extension with a leading dot, or empty.
    pub fn extension_key(&self) -> String {
        if self.extension.is_empty() {
            String::new()
        } else {
            format!(".{}", self.extension.to_lowercase())
        }
    }

    pub fn size_on_disk(&self) -> std::io::Result<u64> {
        Ok(self.path.metadata()?.len())
    }
}

/// Priority tier of a collected file. Lower tiers are emitted first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityTier {
    RootDoc,
    Source,
    Config,
    Docs,
    Frontend,
    /// Whitelisted by the collector but matched by no tier rule.
    Unranked,
}

impl PriorityTier {
    pub const ALL: [PriorityTier; 6] = [
        PriorityTier::RootDoc,
        PriorityTier::Source,
        PriorityTier::Config,
        PriorityTier::Docs,
        PriorityTier::Frontend,
        PriorityTier::Unranked,
    ];

    /// Numeric rank 1..=5, `None` for the remainder bucket.
    pub fn rank(self) -> Option<u8> {
        match self {
            PriorityTier::RootDoc => Some(1),
            PriorityTier::Source => Some(2),
            PriorityTier::Config => Some(3),
            PriorityTier::Docs => Some(4),
            PriorityTier::Frontend => Some(5),
            PriorityTier::Unranked => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PriorityTier::RootDoc => "root docs",
            PriorityTier::Source => "application code",
            PriorityTier::Config => "configuration",
            PriorityTier::Docs => "docs/scripts",
            PriorityTier::Frontend => "frontend assets",
            PriorityTier::Unranked => "other",
        }
    }
}

impl fmt::Display for PriorityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rank() {
            Some(rank) => write!(f, "tier {} ({})", rank, self.label()),
            None => write!(f, "unranked ({})", self.label()),
        }
    }
}

/// A file left out of the corpus because it could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub relative_path: String,
    pub reason: String,
}

/// Result of one corpus build, handed to the caller for persistence.
#[derive(Debug, Clone, Serialize)]
pub struct CorpusOutcome {
    pub output_path: PathBuf,
    pub file_count: usize,
    pub total_bytes: u64,
    /// False iff at least one eligible file was omitted because of the budget.
    pub is_complete: bool,
    /// Relative paths of the written sections, in corpus order.
    pub included: Vec<String>,
    pub skipped: Vec<SkippedFile>,
}

/// Identity of a catalogued repository, as needed for mirroring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRef {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub namespace_path: String,
}

impl RepositoryRef {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self { name: name.into(), url: url.into(), namespace_path: String::new() }
    }

    pub fn with_namespace(mut self, namespace_path: impl Into<String>) -> Self {
        self.namespace_path = namespace_path.into();
        self
    }
}
