//! Lossy UTF-8 file reading for corpus sections.
//!
//! Corpus files are always decoded as UTF-8. A leading UTF-8 BOM is removed
//! and malformed sequences become U+FFFD, so decoding itself never fails;
//! only I/O errors surface to the caller.

use encoding_rs::UTF_8;
use std::path::Path;

const UTF8_BOM_LEN: u64 = 3;

/// Decoded file content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    pub content: String,
    /// True when at least one malformed sequence was replaced.
    pub had_errors: bool,
}

/// Read `path` and decode it as UTF-8 with replacement.
pub fn read_text_lossy(path: &Path) -> std::io::Result<DecodedText> {
    let bytes = std::fs::read(path)?;
    let (decoded, had_errors) = UTF_8.decode_with_bom_removal(&bytes);
    Ok(DecodedText { content: decoded.into_owned(), had_errors })
}

/// Smallest possible decoded length, in bytes, of a file of `raw_len` bytes.
///
/// Replacement never shrinks the text (U+FFFD is three bytes and replaces at
/// least one byte); only BOM removal does.
pub fn min_decoded_len(raw_len: u64) -> u64 {
    raw_len.saturating_sub(UTF8_BOM_LEN)
}
