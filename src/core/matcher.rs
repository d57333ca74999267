use std::cmp::Reverse;

use crate::core::filters::{
    matches_category, matches_furnishing, matches_keywords, matches_listing_type, matches_locations,
    matches_price, matches_property_type, matches_sharing,
};
use crate::models::{MatchResult, Property, SearchCriteria};

/// How a single candidate fared against the criteria
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Failed a hard constraint (strict price)
    Excluded,
    /// Number of present fields the candidate satisfied
    Matched(usize),
}

/// Evaluate every present criteria field against one candidate
pub fn evaluate(property: &Property, criteria: &SearchCriteria) -> Verdict {
    let mut matched = 0;

    if let Some(range) = criteria.price_range.filter(|r| r.is_bounded()) {
        if matches_price(property, &range) {
            matched += 1;
        } else if range.strict {
            return Verdict::Excluded;
        }
    }

    if !criteria.listing_types.is_empty() && matches_listing_type(property, &criteria.listing_types)
    {
        matched += 1;
    }
    if !criteria.property_types.is_empty()
        && matches_property_type(property, &criteria.property_types)
    {
        matched += 1;
    }
    if let Some(furnishing) = &criteria.furnishing {
        if matches_furnishing(property, furnishing) {
            matched += 1;
        }
    }
    if let Some(sharing) = &criteria.sharing {
        if matches_sharing(property, sharing) {
            matched += 1;
        }
    }
    if !criteria.locations.is_empty() && matches_locations(property, &criteria.locations) {
        matched += 1;
    }
    if !criteria.categories.is_empty() && matches_category(property, &criteria.categories) {
        matched += 1;
    }
    if !criteria.keywords.is_empty() && matches_keywords(property, &criteria.keywords) {
        matched += 1;
    }

    Verdict::Matched(matched)
}

/// Partition candidates into exact and partial tiers
///
/// # Tiering
/// 1. No present fields: every candidate is exact, in candidate order
/// 2. All present fields satisfied: exact, in candidate order
/// 3. Some but not all satisfied: partial, by descending matched count,
///    ties in candidate order
/// 4. None satisfied, or a strict price miss: excluded
pub fn find_matches<'a>(candidates: &'a [Property], criteria: &SearchCriteria) -> MatchResult<'a> {
    let present = criteria.present_fields();
    if present == 0 {
        return MatchResult {
            exact: candidates.iter().collect(),
            partial: Vec::new(),
        };
    }

    let mut exact = Vec::new();
    let mut partial: Vec<(usize, &'a Property)> = Vec::new();

    for property in candidates {
        match evaluate(property, criteria) {
            Verdict::Matched(n) if n == present => exact.push(property),
            Verdict::Matched(n) if n > 0 => partial.push((n, property)),
            _ => {}
        }
    }

    // sort_by_key is stable, so equal counts keep candidate order
    partial.sort_by_key(|(n, _)| Reverse(*n));

    tracing::debug!(
        "Matched {} candidates against {} fields: {} exact, {} partial",
        candidates.len(),
        present,
        exact.len(),
        partial.len()
    );

    MatchResult {
        exact,
        partial: partial.into_iter().map(|(_, p)| p).collect(),
    }
}
