//! Runtime configuration for corpus builds, mirroring and analysis.

use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;

use super::rules::{default_include_extensions, DEFAULT_MAX_BYTES, DEFAULT_MAX_DEPTH};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Byte budget for a single corpus document.
    pub max_bytes: u64,
    #[serde(deserialize_with = "deserialize_extensions")]
    pub include_extensions: Vec<String>,
    /// Directory names excluded in addition to the built-in baseline.
    #[serde(deserialize_with = "deserialize_list")]
    pub exclude_dirs: Vec<String>,
    pub max_depth: usize,
    /// Where corpus documents are written; the repository root when unset.
    pub output_dir: Option<PathBuf>,
    /// Root directory for mirrored repositories.
    pub download_root: PathBuf,
    pub mirror: MirrorConfig,
    pub analysis: AnalysisConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_BYTES,
            include_extensions: default_include_extensions(),
            exclude_dirs: Vec::new(),
            max_depth: DEFAULT_MAX_DEPTH,
            output_dir: None,
            download_root: PathBuf::from("repos"),
            mirror: MirrorConfig::default(),
            analysis: AnalysisConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MirrorKind {
    /// Copy from a local fixture tree, placeholder when missing.
    #[default]
    Fixture,
    /// Clone or update with git.
    Git,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MirrorConfig {
    pub kind: MirrorKind,
    pub fixture_root: PathBuf,
    /// Branch, tag or SHA for git mirrors; the remote default when unset.
    pub reference: Option<String>,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            kind: MirrorKind::Fixture,
            fixture_root: PathBuf::from("testdata/repos"),
            reference: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Mock,
    Http,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub provider: ProviderKind,
    pub base_url: String,
    pub model_name: String,
    /// Environment variable holding the bearer token.
    pub auth_token_env_var: String,
    pub timeout_s: u64,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Mock,
            base_url: String::new(),
            model_name: String::new(),
            auth_token_env_var: "KI_API_TOKEN".to_string(),
            timeout_s: 30,
            temperature: 0.7,
            max_tokens: 2000,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrList {
    One(String),
    Many(Vec<String>),
}

impl StringOrList {
    fn into_items(self) -> Vec<String> {
        let raw = match self {
            StringOrList::One(s) => s.split(',').map(str::to_string).collect(),
            StringOrList::Many(items) => items,
        };
        raw.into_iter().map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect()
    }
}

fn deserialize_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(StringOrList::deserialize(deserializer)?.into_items())
}

fn deserialize_extensions<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(StringOrList::deserialize(deserializer)?
        .into_items()
        .into_iter()
        .map(|ext| normalize_extension(&ext))
        .collect())
}

/// Lowercase an extension and make sure it carries a leading dot.
pub fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim().to_lowercase();
    if ext.starts_with('.') {
        ext
    } else {
        format!(".{ext}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_extension_adds_dot_and_lowercases() {
        assert_eq!(normalize_extension("PY"), ".py");
        assert_eq!(normalize_extension(" .Rs "), ".rs");
    }

    #[test]
    fn defaults_match_reference_deployment() {
        let cfg = Config::default();
        assert_eq!(cfg.max_bytes, 460_800);
        assert!(cfg.include_extensions.contains(&".gradle".to_string()));
        assert!(cfg.exclude_dirs.is_empty());
        assert_eq!(cfg.analysis.auth_token_env_var, "KI_API_TOKEN");
        assert_eq!(cfg.mirror.kind, MirrorKind::Fixture);
    }
}
