//! Path normalization

/// Use forward slashes regardless of platform so relative paths compare and
/// render identically everywhere.
pub fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}

/// Split a normalized relative path into its components.
pub fn components(path: &str) -> Vec<&str> {
    path.split('/').filter(|part| !part.is_empty()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_and_split() {
        assert_eq!(normalize_path("src\\lib\\mod.rs"), "src/lib/mod.rs");
        assert_eq!(components("a/b/c.py"), vec!["a", "b", "c.py"]);
        assert!(components("").is_empty());
    }
}
