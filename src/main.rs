//! repo-corpus: turn repositories into prioritized Markdown corpora for AI review

use anyhow::Result;

fn main() -> Result<()> {
    repo_corpus::cli::run()
}
