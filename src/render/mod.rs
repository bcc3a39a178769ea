//! Output rendering (Markdown corpus, JSON report)

pub mod markdown;
pub mod report;

pub use markdown::{render_section, CancelFlag, CorpusWriter, WriteSummary, INCOMPLETE_NOTE};
pub use report::write_report;
