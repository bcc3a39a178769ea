//! Config file loading

use crate::domain::Config;
use anyhow::{Context, Result};
use figment::providers::{Env, Serialized};
use figment::{Figment, Provider};
use std::fs;
use std::path::{Path, PathBuf};

/// Prefix for environment overrides. Nested keys use `__`, e.g.
/// `REPO_CORPUS_ANALYSIS__BASE_URL`.
pub const ENV_PREFIX: &str = "REPO_CORPUS_";

const CONFIG_CANDIDATES: [&str; 6] = [
    "repo-corpus.toml",
    ".repo-corpus.toml",
    "repo-corpus.yml",
    ".repo-corpus.yml",
    "repo-corpus.yaml",
    ".repo-corpus.yaml",
];

/// Load the config file (explicit or discovered under `base_dir`), then
/// apply environment overrides.
pub fn load_config(base_dir: &Path, config_path: Option<&Path>) -> Result<Config> {
    let file_config = load_file_config(base_dir, config_path)?;
    merge_overrides(file_config, Env::prefixed(ENV_PREFIX).split("__"))
}

/// Layer `provider` over `base`. Keys the provider does not set keep their
/// values from `base`.
pub fn merge_overrides<P: Provider>(base: Config, provider: P) -> Result<Config> {
    Figment::from(Serialized::defaults(base))
        .merge(provider)
        .extract()
        .context("Invalid configuration override")
}

fn load_file_config(base_dir: &Path, config_path: Option<&Path>) -> Result<Config> {
    let explicit = config_path.is_some();

    let discovered = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => discover_config(base_dir),
    };

    let Some(config_file) = discovered else {
        return Ok(Config::default());
    };
    tracing::debug!("Using config file {}", config_file.display());

    match parse_config_file(&config_file) {
        Ok(cfg) => Ok(cfg),
        Err(e) if explicit => Err(e),
        Err(e) => {
            tracing::warn!("Ignoring auto-discovered config {}: {:#}", config_file.display(), e);
            Ok(Config::default())
        }
    }
}

fn parse_config_file(config_file: &Path) -> Result<Config> {
    let content = fs::read_to_string(config_file)
        .with_context(|| format!("Failed reading config file: {}", config_file.display()))?;

    let ext = config_file.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();
    match ext.as_str() {
        "toml" => parse_toml_config(&content, config_file),
        "yaml" | "yml" => parse_yaml_config(&content, config_file),
        other => Err(anyhow::anyhow!(
            "Unsupported config extension '.{}' for file {}",
            other,
            config_file.display()
        )),
    }
}

/// Accepts either a flat document or one nested under `[repo-corpus]`.
fn parse_toml_config(content: &str, config_file: &Path) -> Result<Config> {
    let raw: toml::Value = toml::from_str(content)
        .with_context(|| format!("Invalid TOML syntax: {}", config_file.display()))?;

    let config_val = match raw.get("repo-corpus") {
        Some(nested) => nested.clone(),
        None => raw,
    };

    config_val.try_into().with_context(|| format!("Invalid TOML config: {}", config_file.display()))
}

fn parse_yaml_config(content: &str, config_file: &Path) -> Result<Config> {
    let raw: serde_yaml::Value = serde_yaml::from_str(content)
        .with_context(|| format!("Invalid YAML syntax: {}", config_file.display()))?;

    let config_val = match raw.get("repo-corpus") {
        Some(nested) => nested.clone(),
        None => raw,
    };

    serde_yaml::from_value(config_val)
        .with_context(|| format!("Invalid YAML config: {}", config_file.display()))
}

fn discover_config(base_dir: &Path) -> Option<PathBuf> {
    CONFIG_CANDIDATES.iter().map(|candidate| base_dir.join(candidate)).find(|path| path.exists())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::{MirrorKind, ProviderKind};
    use figment::providers::{Format, Toml};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_config_defaults_when_missing() {
        let tmp = TempDir::new().expect("tmp");
        let cfg = load_file_config(tmp.path(), None).expect("config");
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn test_load_toml_config() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(
            tmp.path().join("repo-corpus.toml"),
            "max_bytes = 999\nexclude_dirs = ['generated']\n[mirror]\nkind = 'git'\n",
        )
        .expect("write");

        let cfg = load_file_config(tmp.path(), None).expect("config");
        assert_eq!(cfg.max_bytes, 999);
        assert_eq!(cfg.exclude_dirs, vec!["generated".to_string()]);
        assert_eq!(cfg.mirror.kind, MirrorKind::Git);
        assert_eq!(cfg.max_depth, Config::default().max_depth);
    }

    #[test]
    fn test_nested_yaml_section() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(
            tmp.path().join(".repo-corpus.yaml"),
            "repo-corpus:\n  analysis:\n    provider: http\n    base_url: http://localhost:9000\n",
        )
        .expect("write");

        let cfg = load_file_config(tmp.path(), None).expect("config");
        assert_eq!(cfg.analysis.provider, ProviderKind::Http);
        assert_eq!(cfg.analysis.base_url, "http://localhost:9000");
    }

    #[test]
    fn test_explicit_config_invalid_type_returns_err() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("bad.toml");
        fs::write(&path, "include_extensions = 123\n").expect("write");

        assert!(load_file_config(tmp.path(), Some(&path)).is_err());
    }

    #[test]
    fn test_explicit_config_unsupported_extension_returns_err() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("config.json");
        fs::write(&path, "{}").expect("write");

        assert!(load_file_config(tmp.path(), Some(&path)).is_err());
    }

    #[test]
    fn test_auto_discovered_invalid_type_returns_default() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join("repo-corpus.toml"), "include_extensions = [\".py\", 123]\n")
            .expect("write");

        let cfg = load_file_config(tmp.path(), None).expect("should not error on auto-discovery");
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn test_comma_separated_extensions_are_normalized() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("custom.toml");
        fs::write(&path, "include_extensions = \"PY, js,  .ts\"\n").expect("write");

        let cfg = load_file_config(tmp.path(), Some(&path)).expect("config");
        assert_eq!(cfg.include_extensions, vec![".py", ".js", ".ts"]);
    }

    #[test]
    fn test_overrides_keep_unset_keys() {
        let mut base = Config::default();
        base.max_bytes = 1234;
        base.analysis.model_name = "from-file".to_string();

        let merged = merge_overrides(
            base,
            Toml::string("max_depth = 3\n[analysis]\nbase_url = 'http://example.test'\n"),
        )
        .expect("merge");

        assert_eq!(merged.max_bytes, 1234);
        assert_eq!(merged.max_depth, 3);
        assert_eq!(merged.analysis.base_url, "http://example.test");
        assert_eq!(merged.analysis.model_name, "from-file");
    }

    #[test]
    fn test_invalid_override_is_an_error() {
        let result = merge_overrides(Config::default(), Toml::string("max_bytes = 'lots'\n"));
        assert!(result.is_err());
    }
}
