//! Local mirrors of catalogued repositories.
//!
//! The corpus builder only ever reads a local checkout; how that checkout is
//! produced is a [`RepositoryMirror`] strategy chosen once from configuration.

use crate::domain::{Config, MirrorKind, RepositoryRef};
use crate::error::MirrorError;
use std::path::{Path, PathBuf};

pub mod fixture;
pub mod git;

pub use fixture::FixtureMirror;
pub use git::GitMirror;

/// Port for producing a local copy of a repository.
pub trait RepositoryMirror: Send + Sync {
    /// Mirror `repo` below `target_dir` and return the checkout path.
    fn mirror_repository(&self, repo: &RepositoryRef, target_dir: &Path)
        -> Result<PathBuf, MirrorError>;
}

/// Select the mirror implementation named by `config.mirror.kind`.
pub fn build_mirror(config: &Config) -> Box<dyn RepositoryMirror> {
    match config.mirror.kind {
        MirrorKind::Fixture => Box::new(FixtureMirror::new(config.mirror.fixture_root.clone())),
        MirrorKind::Git => {
            let mirror = GitMirror::new();
            match &config.mirror.reference {
                Some(reference) => Box::new(mirror.reference(reference.clone())),
                None => Box::new(mirror),
            }
        }
    }
}

/// `<target_dir>/<namespace>/<name>`, rejecting names that escape the target.
pub fn mirror_target(repo: &RepositoryRef, target_dir: &Path) -> Result<PathBuf, MirrorError> {
    if !is_safe_segment(&repo.name) {
        return Err(MirrorError::InvalidName(repo.name.clone()));
    }
    let mut path = target_dir.to_path_buf();
    for segment in repo.namespace_path.split('/').filter(|s| !s.is_empty()) {
        if !is_safe_segment(segment) {
            return Err(MirrorError::InvalidName(repo.namespace_path.clone()));
        }
        path.push(segment);
    }
    path.push(&repo.name);
    Ok(path)
}

fn is_safe_segment(segment: &str) -> bool {
    !segment.trim().is_empty()
        && segment != "."
        && segment != ".."
        && !segment.contains('/')
        && !segment.contains('\\')
}
