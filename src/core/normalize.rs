use std::fmt;

/// Search box text after trimming and lower-casing
///
/// Every stage downstream of the input box works on this form, so the
/// extractor and the fallback see exactly the same text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NormalizedQuery(String);

impl NormalizedQuery {
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for NormalizedQuery {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl AsRef<str> for NormalizedQuery {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Case-insensitive containment; `needle` must already be lower case
#[inline]
pub fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_and_lowercases() {
        let query = NormalizedQuery::new("  Apartment BANGALORE \t");
        assert_eq!(query.as_str(), "apartment bangalore");
        assert!(!query.is_empty());
    }

    #[test]
    fn test_whitespace_only_is_empty() {
        assert!(NormalizedQuery::new(" \n\t ").is_empty());
    }

    #[test]
    fn test_contains_folded() {
        assert!(contains_folded("Whitefield, Bangalore", "bangalore"));
        assert!(!contains_folded("Pune", "bangalore"));
    }
}
