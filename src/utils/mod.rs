//! Shared helpers.

pub mod encoding;
pub mod paths;

pub use encoding::{min_decoded_len, read_text_lossy, DecodedText};
pub use paths::normalize_path;

/// Format an integer with thousands separators, e.g. `460800` -> `460,800`.
pub fn format_with_commas(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_with_commas() {
        assert_eq!(format_with_commas(0), "0");
        assert_eq!(format_with_commas(999), "999");
        assert_eq!(format_with_commas(460_800), "460,800");
        assert_eq!(format_with_commas(1_000_000), "1,000,000");
    }
}
