//! repo-corpus: build size-bounded Markdown corpora from source repositories
//!
//! A corpus is one Markdown document holding a directory overview and the
//! contents of a repository's files, emitted in priority order until a byte
//! budget is reached. The document is meant as context for AI-driven code
//! analysis.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod domain;
pub mod error;
pub mod fetch;
pub mod rank;
pub mod render;
pub mod scan;
pub mod service;
pub mod utils;

pub use corpus::{build_corpus, CorpusBuilder, CorpusRequest, MarkdownCorpusBuilder};
pub use domain::{Config, CorpusOutcome, FileRef, PriorityTier};
pub use error::{CorpusError, Result};
