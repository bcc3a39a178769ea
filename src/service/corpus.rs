//! Corpus generation for catalogued repositories, mirroring on demand.

use crate::corpus::{CorpusBuilder, CorpusRequest, MarkdownCorpusBuilder};
use crate::domain::{Config, CorpusOutcome, RepositoryRef};
use crate::error::ServiceError;
use crate::fetch::{build_mirror, RepositoryMirror};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// What a caller records about a generated corpus.
#[derive(Debug, Clone, Serialize)]
pub struct CorpusMetadata {
    pub repository: String,
    /// Checkout the corpus was built from.
    pub local_path: PathBuf,
    pub path: PathBuf,
    pub size_bytes: u64,
    pub file_count: usize,
    pub is_complete: bool,
    pub created_at: DateTime<Utc>,
    #[serde(skip)]
    pub outcome: CorpusOutcome,
}

/// Ensures a local mirror exists, then builds its corpus.
pub struct CorpusService {
    builder: Box<dyn CorpusBuilder>,
    mirror: Box<dyn RepositoryMirror>,
    download_root: PathBuf,
}

impl CorpusService {
    pub fn new(
        builder: Box<dyn CorpusBuilder>,
        mirror: Box<dyn RepositoryMirror>,
        download_root: PathBuf,
    ) -> Self {
        Self { builder, mirror, download_root }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Box::new(MarkdownCorpusBuilder::from_config(config)),
            build_mirror(config),
            config.download_root.clone(),
        )
    }

    /// Build the corpus for `repo`. When `local_path` is missing or does not
    /// exist the repository is mirrored below the download root first.
    pub fn generate_corpus(
        &self,
        repo: &RepositoryRef,
        local_path: Option<&Path>,
        request: &CorpusRequest,
    ) -> Result<CorpusMetadata, ServiceError> {
        tracing::info!("Generating markdown corpus for repository {}", repo.name);

        let checkout = match local_path.filter(|path| path.exists()) {
            Some(path) => path.to_path_buf(),
            None => {
                tracing::info!("Mirroring repository {}", repo.name);
                self.mirror.mirror_repository(repo, &self.download_root)?
            }
        };

        let outcome = self.builder.build_corpus(&checkout, request)?;
        Ok(CorpusMetadata {
            repository: repo.name.clone(),
            local_path: checkout,
            path: outcome.output_path.clone(),
            size_bytes: outcome.total_bytes,
            file_count: outcome.file_count,
            is_complete: outcome.is_complete,
            created_at: Utc::now(),
            outcome,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MirrorError;
    use std::fs;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tempfile::TempDir;

    /// Writes a one-file checkout and counts calls.
    struct FakeMirror {
        calls: Arc<AtomicUsize>,
    }

    impl RepositoryMirror for FakeMirror {
        fn mirror_repository(
            &self,
            repo: &RepositoryRef,
            target_dir: &Path,
        ) -> Result<PathBuf, MirrorError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let dest = target_dir.join(&repo.name);
            fs::create_dir_all(&dest)?;
            fs::write(dest.join("main.py"), "print('mirrored')\n")?;
            Ok(dest)
        }
    }

    fn service(download_root: PathBuf, calls: Arc<AtomicUsize>) -> CorpusService {
        CorpusService::new(
            Box::new(MarkdownCorpusBuilder::new()),
            Box::new(FakeMirror { calls }),
            download_root,
        )
    }

    #[test]
    fn test_mirrors_when_local_path_missing() {
        let tmp = TempDir::new().unwrap();
        let calls = Arc::new(AtomicUsize::new(0));
        let svc = service(tmp.path().join("repos"), calls.clone());

        let repo = RepositoryRef::new("demo", "https://example.invalid/demo.git");
        let meta = svc
            .generate_corpus(&repo, Some(&tmp.path().join("missing")), &CorpusRequest::default())
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(meta.file_count, 1);
        assert!(meta.is_complete);
        assert_eq!(meta.size_bytes, fs::metadata(&meta.path).unwrap().len());
        assert!(meta.local_path.ends_with("repos/demo"));
    }

    #[test]
    fn test_existing_checkout_is_used_directly() {
        let tmp = TempDir::new().unwrap();
        let checkout = tmp.path().join("local");
        fs::create_dir_all(&checkout).unwrap();
        fs::write(checkout.join("README.md"), "# local\n").unwrap();

        let calls = Arc::new(AtomicUsize::new(0));
        let svc = service(tmp.path().join("repos"), calls.clone());
        let repo = RepositoryRef::new("local", "");
        let meta = svc.generate_corpus(&repo, Some(&checkout), &CorpusRequest::default()).unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(meta.outcome.included, vec!["README.md".to_string()]);
    }

    #[test]
    fn test_mirror_failure_propagates() {
        struct FailingMirror;
        impl RepositoryMirror for FailingMirror {
            fn mirror_repository(&self, repo: &RepositoryRef, _: &Path) -> Result<PathBuf, MirrorError> {
                Err(MirrorError::InvalidName(repo.name.clone()))
            }
        }

        let tmp = TempDir::new().unwrap();
        let svc = CorpusService::new(
            Box::new(MarkdownCorpusBuilder::new()),
            Box::new(FailingMirror),
            tmp.path().to_path_buf(),
        );
        let err = svc
            .generate_corpus(&RepositoryRef::new("x", ""), None, &CorpusRequest::default())
            .unwrap_err();
        assert!(matches!(err, ServiceError::Mirror(MirrorError::InvalidName(_))));
    }
}
