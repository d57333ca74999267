//! Criteria extraction from free-text queries
//!
//! Best-effort pattern recognition over a normalized query: price phrases
//! are lifted out first, then the remaining tokens are matched against the
//! keyword tables in [`vocabulary`](super::vocabulary). Whatever is left
//! and looks like a word becomes a location hint; leftovers carrying
//! digits become free keywords.

use regex::{Captures, Regex};
use std::sync::LazyLock;
use thiserror::Error;

use crate::config::SearchSettings;
use crate::core::normalize::NormalizedQuery;
use crate::core::vocabulary::{
    self, scale_amount, strip_digit_groups, Term, CATEGORIES, FURNISHING_TYPES, LISTING_TYPES,
    PROPERTY_TYPES, SHARING_TYPES, STOP_WORDS, UNIT_PATTERN,
};
use crate::models::{PriceRange, SearchCriteria};

/// Amounts below this are counts (bedrooms, sharing) rather than prices
const MIN_PLAUSIBLE_PRICE: f64 = 1_000.0;

/// Longest keyword phrase in the vocabulary, in tokens
const MAX_PHRASE_TOKENS: usize = 3;

/// Comparator words left behind when a price phrase is rejected
const PRICE_WORDS: &[&str] = &[
    "above", "atleast", "below", "between", "budget", "least", "less", "max", "maximum", "min",
    "minimum", "more", "over", "price", "starting", "than", "under", "upto", "within", "rs",
    "inr",
];

/// Errors that can occur while extracting criteria
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("Query too long: {tokens} tokens (limit {limit})")]
    QueryTooLong { tokens: usize, limit: usize },
}

/// Turns a normalized query into structured criteria
pub trait CriteriaExtractor {
    fn extract(&self, query: &NormalizedQuery) -> Result<SearchCriteria, ExtractionError>;
}

/// Keyword and price-phrase extractor
///
/// Deterministic and side-effect free. The only rejection is the token
/// limit, which bounds work on pathological input.
#[derive(Debug, Clone, Copy)]
pub struct KeywordExtractor {
    max_query_tokens: usize,
    min_location_token_len: usize,
}

impl KeywordExtractor {
    pub fn new(max_query_tokens: usize, min_location_token_len: usize) -> Self {
        Self {
            max_query_tokens,
            min_location_token_len,
        }
    }

    pub fn from_settings(settings: &SearchSettings) -> Self {
        Self::new(settings.max_query_tokens, settings.min_location_token_len)
    }

    fn is_location_hint(&self, token: &str) -> bool {
        token.chars().count() >= self.min_location_token_len
            && token.chars().all(char::is_alphabetic)
            && !STOP_WORDS.contains(&token)
            && !PRICE_WORDS.contains(&token)
            && vocabulary::unit_multiplier(token).is_none()
    }

    /// Ids, pin codes and other tokens with digits
    fn is_keyword(&self, token: &str) -> bool {
        token.chars().count() >= self.min_location_token_len
            && token.chars().any(|c| c.is_ascii_digit())
    }
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::from_settings(&SearchSettings::default())
    }
}

impl CriteriaExtractor for KeywordExtractor {
    fn extract(&self, query: &NormalizedQuery) -> Result<SearchCriteria, ExtractionError> {
        let mut criteria = SearchCriteria::default();
        if query.is_empty() {
            return Ok(criteria);
        }

        let token_count = tokenize(query.as_str()).len();
        if token_count > self.max_query_tokens {
            return Err(ExtractionError::QueryTooLong {
                tokens: token_count,
                limit: self.max_query_tokens,
            });
        }

        let (remaining, price_range) = extract_price(query.as_str());
        criteria.price_range = price_range;

        let tokens = tokenize(&remaining);
        let mut i = 0;
        while i < tokens.len() {
            let consumed = match_phrase(&tokens[i..], &mut criteria);
            if consumed > 0 {
                i += consumed;
                continue;
            }

            let token = tokens[i];
            if self.is_location_hint(token) {
                push_unique(&mut criteria.locations, token);
            } else if self.is_keyword(token) {
                push_unique(&mut criteria.keywords, token);
            }
            i += 1;
        }

        tracing::trace!("Extracted criteria for {:?}: {:?}", query.as_str(), criteria);
        Ok(criteria)
    }
}

/// Split on anything that is not a letter or digit
fn tokenize(text: &str) -> Vec<&str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Try the longest keyword phrase starting at `tokens[0]`
///
/// Returns how many tokens were consumed (0 when nothing matched).
fn match_phrase(tokens: &[&str], criteria: &mut SearchCriteria) -> usize {
    for len in (1..=MAX_PHRASE_TOKENS.min(tokens.len())).rev() {
        let phrase = tokens[..len].join(" ");
        let mut matched = false;

        if let Some(value) = lookup(LISTING_TYPES, &phrase) {
            push_unique(&mut criteria.listing_types, value);
            matched = true;
        }
        if let Some(value) = lookup(PROPERTY_TYPES, &phrase) {
            push_unique(&mut criteria.property_types, value);
            matched = true;
        }
        if let Some(value) = lookup(FURNISHING_TYPES, &phrase) {
            criteria.furnishing.get_or_insert_with(|| value.to_string());
            matched = true;
        }
        if let Some(value) = lookup(SHARING_TYPES, &phrase) {
            criteria.sharing.get_or_insert_with(|| value.to_string());
            matched = true;
        }
        if let Some(value) = lookup(CATEGORIES, &phrase) {
            push_unique(&mut criteria.categories, value);
            matched = true;
        }

        if matched {
            return len;
        }
    }
    0
}

/// Query phrases only; record short codes are not query keywords
fn lookup(table: &[Term], phrase: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|term| term.phrases.contains(&phrase))
        .map(|term| term.canonical)
}

fn push_unique(values: &mut Vec<String>, value: &str) {
    if !values.iter().any(|v| v == value) {
        values.push(value.to_string());
    }
}

const CURRENCY: &str = r"(?:₹\s*|\brs\b\.?\s*|\binr\s+)?";

static BETWEEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?:\bbetween\s+)?{CURRENCY}(\d+(?:\.\d+)?)\s*({UNIT_PATTERN})?\s*(?:-|\bto\b|\band\b)\s*{CURRENCY}(\d+(?:\.\d+)?)\s*({UNIT_PATTERN})?\b"
    ))
    .unwrap()
});

static UPPER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"\b(?:under|below|less than|not more than|upto|up to|within|max|maximum|budget)\s+{CURRENCY}(\d+(?:\.\d+)?)\s*({UNIT_PATTERN})?\b"
    ))
    .unwrap()
});

static LOWER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"\b(?:above|over|more than|from|min|minimum|starting at|starting|at least|atleast)\s+{CURRENCY}(\d+(?:\.\d+)?)\s*({UNIT_PATTERN})?\b"
    ))
    .unwrap()
});

static BARE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?P<cur>₹|\brs\b\.?|\binr\b)?\s*\b(?P<num>\d+(?:\.\d+)?)\s*(?P<unit>{UNIT_PATTERN})?\b"
    ))
    .unwrap()
});

fn plausible(amount: Option<f64>) -> Option<f64> {
    amount.filter(|a| *a >= MIN_PLAUSIBLE_PRICE)
}

/// Lift price phrases out of the query
///
/// Returns the query with accepted price phrases blanked and the price
/// hint, which is never strict.
fn extract_price(query: &str) -> (String, Option<PriceRange>) {
    let mut min: Option<f64> = None;
    let mut max: Option<f64> = None;

    let text = strip_digit_groups(query);

    let text = blank_matches(&text, &BETWEEN, |caps| {
        let unit_hi = caps.get(4).map(|m| m.as_str());
        let unit_lo = caps.get(2).map(|m| m.as_str()).or(unit_hi);
        let lo = plausible(scale_amount(&caps[1], unit_lo));
        let hi = plausible(scale_amount(&caps[3], unit_hi));
        match (lo, hi) {
            (Some(lo), Some(hi)) => {
                min = Some(lo.min(hi));
                max = Some(lo.max(hi));
                true
            }
            _ => false,
        }
    });

    let text = blank_matches(&text, &UPPER, |caps| {
        match plausible(scale_amount(&caps[1], caps.get(2).map(|m| m.as_str()))) {
            Some(amount) => {
                max = Some(amount);
                true
            }
            None => false,
        }
    });

    let text = blank_matches(&text, &LOWER, |caps| {
        match plausible(scale_amount(&caps[1], caps.get(2).map(|m| m.as_str()))) {
            Some(amount) => {
                min = Some(amount);
                true
            }
            None => false,
        }
    });

    let text = blank_matches(&text, &BARE, |caps| {
        // A bare number is only a price when marked by currency or unit
        if caps.name("cur").is_none() && caps.name("unit").is_none() {
            return false;
        }
        let unit = caps.name("unit").map(|m| m.as_str());
        match plausible(scale_amount(&caps["num"], unit)) {
            Some(amount) => {
                if max.is_none() {
                    max = Some(amount);
                }
                true
            }
            None => false,
        }
    });

    if let (Some(lo), Some(hi)) = (min, max) {
        if lo > hi {
            min = Some(hi);
            max = Some(lo);
        }
    }

    let range = (min.is_some() || max.is_some()).then_some(PriceRange {
        min,
        max,
        strict: false,
    });
    (text, range)
}

/// Replace every match accepted by `accept` with a single space
fn blank_matches(text: &str, re: &Regex, mut accept: impl FnMut(&Captures) -> bool) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for caps in re.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        if accept(&caps) {
            out.push_str(&text[last..whole.start()]);
            out.push(' ');
            last = whole.end();
        }
    }

    out.push_str(&text[last..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(query: &str) -> SearchCriteria {
        KeywordExtractor::default()
            .extract(&NormalizedQuery::new(query))
            .unwrap()
    }

    #[test]
    fn test_empty_query() {
        assert_eq!(extract(""), SearchCriteria::default());
        assert_eq!(extract("   "), SearchCriteria::default());
    }

    #[test]
    fn test_punctuation_only() {
        assert_eq!(extract("?!... ,,, --"), SearchCriteria::default());
    }

    #[test]
    fn test_property_type_and_location() {
        let criteria = extract("apartment bangalore");
        assert_eq!(criteria.property_types, vec!["apartment"]);
        assert_eq!(criteria.locations, vec!["bangalore"]);
        assert!(criteria.listing_types.is_empty());
    }

    #[test]
    fn test_listing_type_synonyms() {
        let criteria = extract("rent flat");
        assert_eq!(criteria.listing_types, vec!["rent"]);
        assert_eq!(criteria.property_types, vec!["apartment"]);

        assert_eq!(extract("buy villa").listing_types, vec!["sale"]);
        assert_eq!(extract("paying guest koramangala").listing_types, vec!["pg"]);
    }

    #[test]
    fn test_multi_word_furnishing() {
        assert_eq!(extract("semi-furnished flat").furnishing.as_deref(), Some("semi-furnished"));
        assert_eq!(extract("fully furnished").furnishing.as_deref(), Some("furnished"));
        assert_eq!(extract("unfurnished house").furnishing.as_deref(), Some("unfurnished"));
    }

    #[test]
    fn test_first_furnishing_wins() {
        let criteria = extract("furnished or unfurnished");
        assert_eq!(criteria.furnishing.as_deref(), Some("furnished"));
    }

    #[test]
    fn test_sharing() {
        assert_eq!(extract("pg 2 sharing").sharing.as_deref(), Some("double"));
        assert_eq!(extract("single sharing pg").sharing.as_deref(), Some("single"));
    }

    #[test]
    fn test_price_upper_bound() {
        let criteria = extract("flat under 50 lakh in pune");
        let range = criteria.price_range.unwrap();
        assert_eq!(range.max, Some(5_000_000.0));
        assert_eq!(range.min, None);
        assert!(!range.strict);
        assert_eq!(criteria.locations, vec!["pune"]);
    }

    #[test]
    fn test_price_between() {
        let range = extract("villa between 1 cr and 2 cr").price_range.unwrap();
        assert_eq!(range.min, Some(10_000_000.0));
        assert_eq!(range.max, Some(20_000_000.0));

        let range = extract("20-40 lakh").price_range.unwrap();
        assert_eq!(range.min, Some(2_000_000.0));
        assert_eq!(range.max, Some(4_000_000.0));
    }

    #[test]
    fn test_price_lower_bound_with_currency() {
        let range = extract("office above ₹ 1,00,000").price_range.unwrap();
        assert_eq!(range.min, Some(100_000.0));
        assert_eq!(range.max, None);
    }

    #[test]
    fn test_bare_amount_is_budget() {
        let range = extract("2 bhk 25k whitefield").price_range.unwrap();
        assert_eq!(range.max, Some(25_000.0));
    }

    #[test]
    fn test_small_numbers_are_not_prices() {
        let criteria = extract("3 bhk within 5 km");
        assert!(criteria.price_range.is_none());
        assert_eq!(criteria.property_types, vec!["apartment"]);
    }

    #[test]
    fn test_stop_words_dropped() {
        let criteria = extract("properties for sale in the hsr layout");
        assert_eq!(criteria.listing_types, vec!["sale"]);
        assert_eq!(criteria.locations, vec!["hsr", "layout"]);
    }

    #[test]
    fn test_digit_tokens_become_keywords() {
        let criteria = extract("pa2024rn0001");
        assert_eq!(criteria.keywords, vec!["pa2024rn0001"]);
        assert!(criteria.locations.is_empty());

        let criteria = extract("flat near 560066 koramangala");
        assert_eq!(criteria.keywords, vec!["560066"]);
        assert_eq!(criteria.locations, vec!["koramangala"]);

        // Price phrases are lifted out before keywords are collected
        assert!(extract("villa under 50 lakh").keywords.is_empty());
        assert!(extract("3 bhk").keywords.is_empty());
    }

    #[test]
    fn test_category() {
        assert_eq!(extract("commercial shop").categories, vec!["commercial"]);
    }

    #[test]
    fn test_too_many_tokens() {
        let extractor = KeywordExtractor::new(4, 2);
        let result = extractor.extract(&NormalizedQuery::new("a b c d e"));
        assert_eq!(
            result,
            Err(ExtractionError::QueryTooLong { tokens: 5, limit: 4 })
        );
    }

    #[test]
    fn test_deterministic() {
        let query = "semi furnished 2 bhk for rent under 30k indiranagar";
        assert_eq!(extract(query), extract(query));
    }
}
