//! Static classification tables for corpus building.
//!
//! These are pure configuration data: the collector whitelist, the baseline
//! directory exclusions and the five priority tiers.

/// Extensions eligible for collection (lowercase, leading dot).
pub const SOURCE_EXTENSIONS: &[&str] = &[
    ".py", ".js", ".ts", ".tsx", ".jsx", ".java", ".kt", ".scala", ".go", ".rb", ".php", ".rs",
    ".c", ".cpp", ".h", ".hpp", ".cs", ".xml", ".json", ".yml", ".yaml", ".ini", ".tf", ".sql",
    ".sh", ".bat", ".ps1", ".gradle", ".mk", ".md", ".html", ".css", ".toml", ".txt",
];

/// Directory names pruned wherever they appear in a path.
pub const BASELINE_EXCLUDE_DIRS: &[&str] = &[
    ".git",
    "node_modules",
    "dist",
    "build",
    "target",
    "venv",
    ".venv",
    "__pycache__",
    ".pytest_cache",
    ".idea",
    ".vscode",
    "vendor",
    "coverage",
    ".coverage",
    "htmlcov",
    ".tox",
    "eggs",
    ".eggs",
];

/// Tier 1: exact file names, matched case-sensitively.
pub const ROOT_DOC_NAMES: &[&str] =
    &["README.md", "README.MD", "readme.md", "LICENSE", "CHANGELOG.md", "CONTRIBUTING.md"];

pub const SOURCE_TIER_EXTENSIONS: &[&str] =
    &[".py", ".js", ".ts", ".tsx", ".jsx", ".java", ".kt", ".go", ".rs"];

pub const CONFIG_TIER_EXTENSIONS: &[&str] = &[".yml", ".yaml", ".json", ".toml", ".xml"];

pub const DOCS_TIER_EXTENSIONS: &[&str] = &[".md", ".txt", ".sh", ".sql"];

pub const FRONTEND_TIER_EXTENSIONS: &[&str] = &[".html", ".css"];

/// Default corpus byte budget (450 KiB).
pub const DEFAULT_MAX_BYTES: u64 = 460_800;

/// Traversal depth guard for the collector.
pub const DEFAULT_MAX_DEPTH: usize = 64;

pub fn is_root_doc_name(name: &str) -> bool {
    ROOT_DOC_NAMES.contains(&name)
}

pub fn default_include_extensions() -> Vec<String> {
    SOURCE_EXTENSIONS.iter().map(|s| s.to_string()).collect()
}

pub fn baseline_exclude_dirs() -> Vec<String> {
    BASELINE_EXCLUDE_DIRS.iter().map(|s| s.to_string()).collect()
}
