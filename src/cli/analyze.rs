//! Analyze command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};

use super::utils::CorpusFlags;
use crate::corpus::CorpusRequest;
use crate::domain::RepositoryRef;
use crate::service::{CorpusService, Prompt, PromptService};

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Local repository checkout
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Prompt text, or @FILE to read it from a file
    #[arg(short, long, value_name = "TEXT|@FILE")]
    pub prompt: String,

    /// Title recorded with the run
    #[arg(long, value_name = "TITLE", default_value = "ad-hoc")]
    pub title: String,

    #[command(flatten)]
    pub flags: CorpusFlags,
}

fn read_prompt(value: &str) -> Result<String> {
    match value.strip_prefix('@') {
        Some(file) => std::fs::read_to_string(Path::new(file))
            .with_context(|| format!("Failed reading prompt file: {}", file)),
        None => Ok(value.to_string()),
    }
}

pub fn run(args: AnalyzeArgs) -> Result<()> {
    let prompt = Prompt::new(args.title.clone(), read_prompt(&args.prompt)?);
    let root = args
        .path
        .canonicalize()
        .with_context(|| format!("Repository source not found: {}", args.path.display()))?;
    let config = args.flags.resolve(&root)?;

    let repo_name = root.file_name().and_then(|n| n.to_str()).unwrap_or("repository").to_string();
    let repo = RepositoryRef::new(repo_name.clone(), "");

    let metadata = CorpusService::from_config(&config).generate_corpus(
        &repo,
        Some(&root),
        &CorpusRequest::from_config(&config),
    )?;

    let run = PromptService::from_config(&config)?.execute_prompt(
        &repo_name,
        &prompt,
        Some(&metadata.path),
    )?;

    println!("{}", serde_json::to_string_pretty(&run)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_prompt_inline_and_file() {
        assert_eq!(read_prompt("Check tests").unwrap(), "Check tests");

        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("prompt.txt");
        std::fs::write(&file, "From file").unwrap();
        assert_eq!(read_prompt(&format!("@{}", file.display())).unwrap(), "From file");
        assert!(read_prompt("@/nonexistent/prompt.txt").is_err());
    }
}
