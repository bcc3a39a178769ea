//! Application services wiring the ports together.

pub mod corpus;
pub mod prompt;

pub use corpus::{CorpusMetadata, CorpusService};
pub use prompt::{Prompt, PromptRun, PromptService};
