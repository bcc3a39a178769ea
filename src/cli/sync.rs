//! Sync command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use super::utils::CorpusFlags;
use crate::corpus::CorpusRequest;
use crate::domain::RepositoryRef;
use crate::service::CorpusService;

#[derive(Args)]
pub struct SyncArgs {
    /// Repository name
    #[arg(long, value_name = "NAME")]
    pub name: String,

    /// Clone URL
    #[arg(long, value_name = "URL", default_value = "")]
    pub url: String,

    /// Namespace path used to nest the mirror (e.g. 'group/subgroup')
    #[arg(long, value_name = "PATH", default_value = "")]
    pub namespace: String,

    /// Existing checkout; mirrored when missing
    #[arg(long, value_name = "DIR")]
    pub local_path: Option<PathBuf>,

    /// Root directory for mirrored repositories
    #[arg(long, value_name = "DIR")]
    pub download_root: Option<PathBuf>,

    #[command(flatten)]
    pub flags: CorpusFlags,
}

pub fn run(args: SyncArgs) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let mut config = args.flags.resolve(&cwd)?;
    if let Some(root) = &args.download_root {
        config.download_root = root.clone();
    }

    let repo = RepositoryRef::new(args.name.clone(), args.url.clone()).with_namespace(args.namespace);
    let service = CorpusService::from_config(&config);
    let metadata = service
        .generate_corpus(&repo, args.local_path.as_deref(), &CorpusRequest::from_config(&config))
        .with_context(|| format!("Failed to sync repository {}", repo.name))?;

    println!("{}", serde_json::to_string_pretty(&metadata)?);
    Ok(())
}
