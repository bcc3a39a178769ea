//! File collector: walks a repository and returns every eligible file.

use crate::domain::rules::is_root_doc_name;
use crate::domain::{baseline_exclude_dirs, default_include_extensions, FileRef, DEFAULT_MAX_DEPTH};
use crate::utils::paths::components;
use ignore::WalkBuilder;
use regex::Regex;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Counters gathered during one collection pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectStats {
    pub files_seen: usize,
    pub files_included: usize,
    pub files_skipped_excluded: usize,
    pub files_skipped_extension: usize,
    pub entries_unreadable: usize,
}

/// Walks a repository tree and applies the whitelist and exclusion rules.
pub struct FileCollector {
    root_path: PathBuf,
    include_extensions: BTreeSet<String>,
    exclude_dirs: BTreeSet<String>,
    max_depth: usize,
    stats: CollectStats,
}

impl FileCollector {
    /// Collector with the built-in whitelist and baseline exclusions.
    pub fn new(root_path: PathBuf) -> Self {
        Self {
            root_path,
            include_extensions: default_include_extensions().into_iter().collect(),
            exclude_dirs: baseline_exclude_dirs().into_iter().collect(),
            max_depth: DEFAULT_MAX_DEPTH,
            stats: CollectStats::default(),
        }
    }

    /// Collector using the configured whitelist, extra exclusions and depth.
    pub fn from_config(root_path: PathBuf, config: &crate::domain::Config) -> Self {
        Self::new(root_path)
            .include_extensions(config.include_extensions.clone())
            .exclude_dirs(config.exclude_dirs.clone())
            .max_depth(config.max_depth)
    }

    /// Replace the extension whitelist (entries like ".py").
    pub fn include_extensions(mut self, extensions: Vec<String>) -> Self {
        self.include_extensions = extensions
            .iter()
            .map(|ext| crate::domain::config::normalize_extension(ext))
            .collect();
        self
    }

    /// Add directory names to the baseline exclusion set.
    pub fn exclude_dirs<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_dirs.extend(dirs.into_iter().map(Into::into));
        self
    }

    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    fn is_excluded(&self, relative_path: &str) -> bool {
        components(relative_path).iter().any(|part| self.exclude_dirs.contains(*part))
    }

    fn is_whitelisted(&self, file: &FileRef) -> bool {
        is_root_doc_name(file.file_name())
            || (!file.extension.is_empty() && self.include_extensions.contains(&file.extension_key()))
    }

    /// Walk the tree and return eligible files sorted by relative path.
    ///
    /// Unreadable entries are skipped silently. Symlinks are not followed and
    /// traversal stops at `max_depth`.
    pub fn collect(&mut self) -> Vec<FileRef> {
        self.stats = CollectStats::default();

        let excluded: Arc<BTreeSet<String>> = Arc::new(self.exclude_dirs.clone());
        let corpus_pattern = generated_corpus_pattern(&self.root_path);

        let mut builder = WalkBuilder::new(&self.root_path);
        builder
            .standard_filters(false)
            .follow_links(false)
            .max_depth(Some(self.max_depth))
            .filter_entry(move |entry| {
                if entry.depth() == 0 {
                    return true;
                }
                let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
                if !is_dir {
                    return true;
                }
                match entry.file_name().to_str() {
                    Some(name) => !excluded.contains(name),
                    None => true,
                }
            });

        let mut files = Vec::new();
        for entry_result in builder.build() {
            let entry = match entry_result {
                Ok(e) => e,
                Err(err) => {
                    tracing::debug!("skipping unreadable entry: {}", err);
                    self.stats.entries_unreadable += 1;
                    continue;
                }
            };

            if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                continue;
            }
            self.stats.files_seen += 1;

            let Some(file) = FileRef::new(&self.root_path, entry.into_path()) else {
                self.stats.entries_unreadable += 1;
                continue;
            };

            if self.is_excluded(&file.relative_path) {
                self.stats.files_skipped_excluded += 1;
                continue;
            }

            if let Some(pattern) = &corpus_pattern {
                if file.depth() == 0 && pattern.is_match(file.file_name()) {
                    tracing::debug!("skipping previously generated corpus {}", file.relative_path);
                    self.stats.files_skipped_excluded += 1;
                    continue;
                }
            }

            if !self.is_whitelisted(&file) {
                self.stats.files_skipped_extension += 1;
                continue;
            }

            files.push(file);
        }

        files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        self.stats.files_included = files.len();
        files
    }

    pub fn stats(&self) -> &CollectStats {
        &self.stats
    }
}

/// Matches `<repo>_corpus_<YYYYMMDDTHHMMSSZ>.md` for the repository at `root`.
fn generated_corpus_pattern(root: &Path) -> Option<Regex> {
    let name = root.file_name()?.to_str()?;
    Regex::new(&format!(r"^{}_corpus_\d{{8}}T\d{{6}}Z\.md$", regex::escape(name))).ok()
}
