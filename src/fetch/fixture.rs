//! Mirror that copies repositories from a local fixture tree.
//!
//! Used for demos and tests where no git remote is reachable. When the
//! fixture is missing, a placeholder checkout with a README is created.

use super::{mirror_target, RepositoryMirror};
use crate::domain::RepositoryRef;
use crate::error::MirrorError;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const BRANCH_SUFFIXES: &[&str] = &["-main", "-develop", "-dev", "-master"];

pub struct FixtureMirror {
    fixture_root: PathBuf,
}

impl FixtureMirror {
    pub fn new(fixture_root: PathBuf) -> Self {
        Self { fixture_root }
    }

    /// First existing fixture directory for `name`: normalized name, then raw name.
    fn locate(&self, name: &str) -> Option<PathBuf> {
        [normalize_repo_name(name), name.to_string()]
            .into_iter()
            .map(|candidate| self.fixture_root.join(candidate))
            .find(|path| path.is_dir())
    }
}

impl RepositoryMirror for FixtureMirror {
    fn mirror_repository(
        &self,
        repo: &RepositoryRef,
        target_dir: &Path,
    ) -> Result<PathBuf, MirrorError> {
        let target = mirror_target(repo, target_dir)?;

        if target.exists() {
            tracing::info!("Removing existing mirror at {}", target.display());
            fs::remove_dir_all(&target)?;
        }

        match self.locate(&repo.name) {
            Some(source) => {
                tracing::info!(
                    "Copying repository {} from {} to {}",
                    repo.name,
                    source.display(),
                    target.display()
                );
                copy_tree(&source, &target)?;
            }
            None => {
                tracing::warn!(
                    "Repository {} not found under {}, creating placeholder",
                    repo.name,
                    self.fixture_root.display()
                );
                fs::create_dir_all(&target)?;
                fs::write(
                    target.join("README.md"),
                    format!(
                        "# {}\n\nThis is a placeholder directory. Repository source not available.\n",
                        repo.name
                    ),
                )?;
            }
        }

        Ok(target)
    }
}

/// Lowercase and strip a trailing branch suffix such as `-main`.
pub fn normalize_repo_name(name: &str) -> String {
    let lower = name.to_lowercase();
    for suffix in BRANCH_SUFFIXES {
        if let Some(stripped) = lower.strip_suffix(suffix) {
            return stripped.to_string();
        }
    }
    lower
}

fn copy_tree(source: &Path, target: &Path) -> Result<(), MirrorError> {
    for entry in WalkDir::new(source).follow_links(false) {
        let entry = entry?;
        let rel = match entry.path().strip_prefix(source) {
            Ok(rel) => rel,
            Err(_) => continue,
        };
        let dest = target.join(rel);
        let file_type = entry.file_type();
        if file_type.is_dir() {
            fs::create_dir_all(&dest)?;
        } else if file_type.is_file() {
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &dest)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_normalize_repo_name() {
        assert_eq!(normalize_repo_name("ArvenDatenKurier"), "arvendatenkurier");
        assert_eq!(normalize_repo_name("YepWebSvc-main"), "yepwebsvc");
        assert_eq!(normalize_repo_name("svc-develop"), "svc");
        assert_eq!(normalize_repo_name("plain"), "plain");
    }

    #[test]
    fn test_copies_fixture_and_replaces_previous_mirror() {
        let tmp = TempDir::new().unwrap();
        let fixtures = tmp.path().join("fixtures");
        fs::create_dir_all(fixtures.join("demo/src")).unwrap();
        fs::write(fixtures.join("demo/src/app.py"), "print('hi')").unwrap();
        fs::write(fixtures.join("demo/README.md"), "# Demo").unwrap();

        let target_dir = tmp.path().join("mirrors");
        let stale = target_dir.join("team/Demo-main/stale.txt");
        fs::create_dir_all(stale.parent().unwrap()).unwrap();
        fs::write(&stale, "old").unwrap();

        let mirror = FixtureMirror::new(fixtures);
        let repo = RepositoryRef::new("Demo-main", "https://git.example/demo.git")
            .with_namespace("team");
        let path = mirror.mirror_repository(&repo, &target_dir).unwrap();

        assert_eq!(path, target_dir.join("team/Demo-main"));
        assert_eq!(fs::read_to_string(path.join("src/app.py")).unwrap(), "print('hi')");
        assert!(path.join("README.md").exists());
        assert!(!stale.exists());
    }

    #[test]
    fn test_missing_fixture_creates_placeholder() {
        let tmp = TempDir::new().unwrap();
        let mirror = FixtureMirror::new(tmp.path().join("fixtures"));
        let repo = RepositoryRef::new("ghost", "https://git.example/ghost.git");

        let path = mirror.mirror_repository(&repo, &tmp.path().join("mirrors")).unwrap();
        let readme = fs::read_to_string(path.join("README.md")).unwrap();
        assert!(readme.starts_with("# ghost\n"));
        assert!(readme.contains("placeholder"));
    }
}
