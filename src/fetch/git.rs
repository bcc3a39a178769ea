//! Git-backed mirror: shallow clone on first use, fetch + checkout afterwards.

use super::{mirror_target, RepositoryMirror};
use crate::domain::RepositoryRef;
use crate::error::MirrorError;
use git2::build::{CheckoutBuilder, RepoBuilder};
use git2::{FetchOptions, ObjectType, Repository};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default)]
pub struct GitMirror {
    reference: Option<String>,
}

impl GitMirror {
    pub fn new() -> Self {
        Self::default()
    }

    /// Branch, tag or SHA to check out instead of the remote default branch.
    pub fn reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    fn clone_fresh(&self, url: &str, dest: &Path) -> Result<Repository, MirrorError> {
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let repo = match shallow_clone(url, dest, self.reference.as_deref()) {
            Ok(repo) => repo,
            Err(err) => {
                tracing::debug!("shallow clone of {} failed ({}), retrying full clone", url, err);
                if dest.exists() {
                    std::fs::remove_dir_all(dest)?;
                }
                Repository::clone(url, dest)?
            }
        };
        if let Some(reference) = &self.reference {
            checkout_ref(&repo, reference)?;
        }
        Ok(repo)
    }

    fn update(&self, repo: &Repository) -> Result<(), MirrorError> {
        let refspec = self.reference.as_deref().unwrap_or("HEAD");
        let mut remote = repo.find_remote("origin")?;

        let mut shallow = FetchOptions::new();
        shallow.depth(1);
        if let Err(err) = remote.fetch(&[refspec], Some(&mut shallow), None) {
            tracing::debug!("shallow fetch failed ({}), retrying full fetch", err);
            // The failed handle keeps its depth; fetch through a fresh one.
            let mut full = repo.find_remote("origin")?;
            full.fetch(&[refspec], None, None)?;
        }

        let fetched = repo.find_reference("FETCH_HEAD")?.peel_to_commit()?;
        repo.checkout_tree(fetched.as_object(), Some(CheckoutBuilder::new().force()))?;
        repo.set_head_detached(fetched.id())?;
        Ok(())
    }
}

impl RepositoryMirror for GitMirror {
    fn mirror_repository(
        &self,
        repo: &RepositoryRef,
        target_dir: &Path,
    ) -> Result<PathBuf, MirrorError> {
        let target = mirror_target(repo, target_dir)?;

        if target.join(".git").exists() {
            tracing::info!("Updating existing repository {} at {}", repo.name, target.display());
            let existing = Repository::open(&target)?;
            self.update(&existing)?;
        } else {
            if target.exists() {
                std::fs::remove_dir_all(&target)?;
            }
            tracing::info!("Cloning repository {} from {}", repo.name, repo.url);
            self.clone_fresh(&repo.url, &target)?;
        }

        Ok(target)
    }
}

fn shallow_clone(url: &str, dest: &Path, branch: Option<&str>) -> Result<Repository, git2::Error> {
    let mut fo = FetchOptions::new();
    fo.depth(1);

    let mut builder = RepoBuilder::new();
    builder.fetch_options(fo);
    if let Some(branch) = branch {
        builder.branch(branch);
    }
    builder.clone(url, dest)
}

fn checkout_ref(repo: &Repository, reference: &str) -> Result<(), MirrorError> {
    let object = repo.revparse_single(reference)?;
    repo.checkout_tree(&object, None)?;
    if object.kind() == Some(ObjectType::Commit) {
        repo.set_head_detached(object.id())?;
    }
    Ok(())
}
