//! Streaming Markdown corpus writer with a hard byte budget.

use crate::domain::{FileRef, SkippedFile};
use crate::error::{CorpusError, Result};
use crate::scan::render_tree;
use crate::utils::{min_decoded_len, read_text_lossy};
use chrono::{DateTime, SecondsFormat, Utc};
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Appended when the budget stopped the build early. It is written even if
/// it pushes the document past the budget.
pub const INCOMPLETE_NOTE: &str = "\n\n---\n**Note**: Size limit reached. Not all files included.\n";

const FILE_CONTENTS_TITLE: &str = "## File Contents\n\n";

/// Cooperative cancellation, checked once per file.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// What a single write pass produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteSummary {
    pub file_count: usize,
    /// Every byte written, including header, tree and any trailing note.
    pub total_bytes: u64,
    pub is_complete: bool,
    pub included: Vec<String>,
    pub skipped: Vec<SkippedFile>,
}

pub struct CorpusWriter {
    repo_name: String,
    max_bytes: u64,
    generated_at: DateTime<Utc>,
    cancel: Option<CancelFlag>,
}

impl CorpusWriter {
    pub fn new(repo_name: impl Into<String>, max_bytes: u64) -> Self {
        Self { repo_name: repo_name.into(), max_bytes, generated_at: Utc::now(), cancel: None }
    }

    /// Pin the header timestamp.
    pub fn generated_at(mut self, at: DateTime<Utc>) -> Self {
        self.generated_at = at;
        self
    }

    pub fn cancel_flag(mut self, flag: CancelFlag) -> Self {
        self.cancel = Some(flag);
        self
    }

    fn header(&self) -> String {
        format!(
            "# Repository: {}\n\nGenerated: {}\n\n## Directory Structure\n\n",
            self.repo_name,
            self.generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
        )
    }

    /// Stream `files`, already in priority order, into `out`.
    pub fn write<W: Write>(&self, out: &mut W, files: &[FileRef]) -> Result<WriteSummary> {
        let mut out = CountingWriter { inner: out, written: 0 };

        out.emit(&self.header())?;
        out.emit(&format!("```\n{}\n```\n\n", render_tree(&self.repo_name, files)))?;
        out.emit(FILE_CONTENTS_TITLE)?;

        let mut summary = WriteSummary {
            file_count: 0,
            total_bytes: 0,
            is_complete: self.max_bytes > 0,
            included: Vec::new(),
            skipped: Vec::new(),
        };

        if summary.is_complete {
            for file in files {
                if self.cancel.as_ref().is_some_and(CancelFlag::is_cancelled) {
                    return Err(CorpusError::Cancelled);
                }

                if out.written >= self.max_bytes {
                    summary.is_complete = false;
                    break;
                }

                let raw_len = match file.size_on_disk() {
                    Ok(len) => len,
                    Err(err) => {
                        skip(&mut summary, file, err.to_string());
                        continue;
                    }
                };
                let lower_bound = section_framing_len(file) + min_decoded_len(raw_len);
                if out.written + lower_bound > self.max_bytes {
                    tracing::debug!(
                        "{} ({} bytes) cannot fit in the remaining budget",
                        file.relative_path,
                        raw_len
                    );
                    summary.is_complete = false;
                    break;
                }

                let decoded = match read_text_lossy(&file.path) {
                    Ok(decoded) => decoded,
                    Err(err) => {
                        skip(&mut summary, file, err.to_string());
                        continue;
                    }
                };
                if decoded.had_errors {
                    tracing::debug!("replaced malformed UTF-8 in {}", file.relative_path);
                }

                let section = render_section(file, &decoded.content);
                if out.written + section.len() as u64 > self.max_bytes {
                    summary.is_complete = false;
                    break;
                }

                out.emit(&section)?;
                summary.file_count += 1;
                summary.included.push(file.relative_path.clone());
            }
        }

        if !summary.is_complete {
            out.emit(INCOMPLETE_NOTE)?;
        }
        out.inner.flush()?;

        summary.total_bytes = out.written;
        Ok(summary)
    }
}

struct CountingWriter<'a, W: Write> {
    inner: &'a mut W,
    written: u64,
}

impl<W: Write> CountingWriter<'_, W> {
    fn emit(&mut self, text: &str) -> Result<()> {
        self.inner.write_all(text.as_bytes())?;
        self.written += text.len() as u64;
        Ok(())
    }
}

fn skip(summary: &mut WriteSummary, file: &FileRef, reason: String) {
    tracing::warn!("Could not read file {}: {}", file.relative_path, reason);
    summary.skipped.push(SkippedFile { relative_path: file.relative_path.clone(), reason });
}

/// One fenced section for `file`.
pub fn render_section(file: &FileRef, content: &str) -> String {
    format!("### {}\n\n```{}\n{}\n```\n\n", file.relative_path, file.extension, content)
}

fn section_framing_len(file: &FileRef) -> u64 {
    render_section(file, "").len() as u64
}
