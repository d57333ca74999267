use serde::Serialize;

use super::domain::Property;

/// Tiered partition of a candidate set
///
/// A candidate appears in at most one tier. `partial` is ordered by
/// descending matched-field count, ties kept in candidate order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchResult<'a> {
    pub exact: Vec<&'a Property>,
    pub partial: Vec<&'a Property>,
}

/// Which tier the caller ended up showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Selection {
    Exact,
    All,
    Partial,
}

impl<'a> MatchResult<'a> {
    /// Tier-ordered concatenation: exact first, then partial
    pub fn all(&self) -> Vec<&'a Property> {
        self.exact.iter().chain(self.partial.iter()).copied().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.exact.is_empty() && self.partial.is_empty()
    }

    pub fn len(&self) -> usize {
        self.exact.len() + self.partial.len()
    }

    /// Caller-side selection: exact if non-empty, else all, else partial
    pub fn select(&self) -> (Selection, Vec<&'a Property>) {
        if !self.exact.is_empty() {
            return (Selection::Exact, self.exact.clone());
        }

        let all = self.all();
        if !all.is_empty() {
            return (Selection::All, all);
        }

        (Selection::Partial, self.partial.clone())
    }
}

/// Why the substring fallback produced the displayed result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum FallbackReason {
    /// Structured matching selected nothing
    NoStructuredMatch,
    /// The extractor rejected the query
    ExtractionFailed(String),
}

/// How the displayed result was produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "path", rename_all = "snake_case")]
pub enum SearchOutcome {
    /// Blank query: the full candidate set in candidate order
    EmptyQuery,
    Structured { selection: Selection },
    Fallback { cause: FallbackReason },
}

/// Final result sequence handed to the render surface
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutput<'a> {
    pub properties: Vec<&'a Property>,
    pub outcome: SearchOutcome,
}

impl<'a> SearchOutput<'a> {
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Nothing matched; the "no matches" state
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn ids(&self) -> Vec<&'a str> {
        self.properties.iter().map(|p| p.property_id.as_str()).collect()
    }

    pub fn used_fallback(&self) -> bool {
        matches!(self.outcome, SearchOutcome::Fallback { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_prefers_exact() {
        let a = Property::new("A");
        let b = Property::new("B");
        let result = MatchResult { exact: vec![&a], partial: vec![&b] };

        let (selection, list) = result.select();
        assert_eq!(selection, Selection::Exact);
        assert_eq!(list, vec![&a]);
        assert_eq!(result.all(), vec![&a, &b]);
    }

    #[test]
    fn test_select_falls_back_to_all() {
        let b = Property::new("B");
        let c = Property::new("C");
        let result = MatchResult { exact: vec![], partial: vec![&b, &c] };

        let (selection, list) = result.select();
        assert_eq!(selection, Selection::All);
        assert_eq!(list, vec![&b, &c]);
    }

    #[test]
    fn test_select_empty() {
        let result = MatchResult::default();
        let (selection, list) = result.select();
        assert_eq!(selection, Selection::Partial);
        assert!(list.is_empty());
        assert!(result.is_empty());
    }
}
