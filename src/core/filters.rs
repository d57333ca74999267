use crate::core::fallback::search_blob;
use crate::core::normalize::contains_folded;
use crate::core::vocabulary::{
    canonicalize, Term, CATEGORIES, FURNISHING_TYPES, LISTING_TYPES, PROPERTY_TYPES,
    SHARING_TYPES,
};
use crate::models::{PriceRange, Property};

/// Compare a record attribute against a wanted value from one vocabulary
///
/// When both sides are known terms they must canonicalise to the same
/// term; otherwise fall back to case-insensitive substring containment.
#[inline]
pub fn matches_term(table: &[Term], attribute: Option<&str>, wanted: &str) -> bool {
    let Some(attribute) = attribute else {
        return false;
    };

    let wanted_lower = wanted.trim().to_lowercase();
    if wanted_lower.is_empty() {
        return false;
    }

    match (canonicalize(table, attribute), canonicalize(table, &wanted_lower)) {
        (Some(have), Some(want)) => have == want,
        _ => contains_folded(attribute, &wanted_lower),
    }
}

#[inline]
pub fn matches_listing_type(property: &Property, wanted: &[String]) -> bool {
    wanted
        .iter()
        .any(|w| matches_term(LISTING_TYPES, property.listing_type.as_deref(), w))
}

#[inline]
pub fn matches_property_type(property: &Property, wanted: &[String]) -> bool {
    wanted
        .iter()
        .any(|w| matches_term(PROPERTY_TYPES, property.property_type.as_deref(), w))
}

#[inline]
pub fn matches_furnishing(property: &Property, wanted: &str) -> bool {
    matches_term(FURNISHING_TYPES, property.furnishing.as_deref(), wanted)
}

#[inline]
pub fn matches_sharing(property: &Property, wanted: &str) -> bool {
    matches_term(SHARING_TYPES, property.sharing.as_deref(), wanted)
}

#[inline]
pub fn matches_category(property: &Property, wanted: &[String]) -> bool {
    wanted
        .iter()
        .any(|w| matches_term(CATEGORIES, property.category.as_deref(), w))
}

/// Price interval intersection; records without a usable price never match
#[inline]
pub fn matches_price(property: &Property, range: &PriceRange) -> bool {
    match property.price_bounds() {
        Some((lo, hi)) => range.overlaps(lo, hi),
        None => false,
    }
}

/// Every location token must appear somewhere in the record's names or address
pub fn matches_locations(property: &Property, tokens: &[String]) -> bool {
    let place = property.place_fields().join(" ").to_lowercase();
    tokens
        .iter()
        .all(|token| place.contains(&token.to_lowercase()))
}

/// Every keyword must appear somewhere in the record's searchable text
pub fn matches_keywords(property: &Property, keywords: &[String]) -> bool {
    let blob = search_blob(property);
    keywords
        .iter()
        .all(|keyword| blob.contains(&keyword.to_lowercase()))
}
