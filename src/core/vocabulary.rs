//! Keyword tables shared by the criteria extractor and the matcher
//!
//! Each [`Term`] has a canonical value (what ends up in `SearchCriteria`),
//! the query phrases that imply it, and the short codes that records use
//! for it. Phrases are written in folded form: lower case, single spaces,
//! no hyphens.

use regex::Regex;
use std::sync::LazyLock;

#[derive(Debug, Clone, Copy)]
pub struct Term {
    pub canonical: &'static str,
    pub phrases: &'static [&'static str],
    pub codes: &'static [&'static str],
}

pub const LISTING_TYPES: &[Term] = &[
    Term {
        canonical: "sale",
        phrases: &["sale", "for sale", "buy", "purchase", "resale", "sell"],
        codes: &["sl", "sa", "s"],
    },
    Term {
        canonical: "rent",
        phrases: &["rent", "for rent", "rental", "lease", "to let", "rented"],
        codes: &["rn", "re", "r"],
    },
    Term {
        canonical: "pg",
        phrases: &["pg", "paying guest", "hostel", "co living", "coliving"],
        codes: &["pg"],
    },
    Term {
        canonical: "agricultural",
        phrases: &["agricultural", "agriculture", "agri", "farm", "farmland", "farm land"],
        codes: &["ag"],
    },
    Term {
        canonical: "plot",
        phrases: &[],
        codes: &["pl"],
    },
];

pub const PROPERTY_TYPES: &[Term] = &[
    Term {
        canonical: "apartment",
        phrases: &["apartment", "apartments", "flat", "flats", "bhk", "condo", "studio"],
        codes: &["apt"],
    },
    Term {
        canonical: "villa",
        phrases: &["villa", "villas", "bungalow", "row house"],
        codes: &[],
    },
    Term {
        canonical: "house",
        phrases: &["house", "independent house", "home", "duplex"],
        codes: &[],
    },
    Term {
        canonical: "plot",
        phrases: &["plot", "plots", "land", "site"],
        codes: &[],
    },
    Term {
        canonical: "office",
        phrases: &["office", "office space", "coworking"],
        codes: &[],
    },
    Term {
        canonical: "shop",
        phrases: &["shop", "showroom", "retail"],
        codes: &[],
    },
    Term {
        canonical: "warehouse",
        phrases: &["warehouse", "godown"],
        codes: &[],
    },
];

pub const FURNISHING_TYPES: &[Term] = &[
    Term {
        canonical: "semi-furnished",
        phrases: &["semi furnished", "semifurnished", "semi"],
        codes: &["sf"],
    },
    Term {
        canonical: "unfurnished",
        phrases: &["unfurnished", "un furnished", "not furnished", "bare"],
        codes: &["uf"],
    },
    Term {
        canonical: "furnished",
        phrases: &["furnished", "fully furnished", "full furnished"],
        codes: &["ff"],
    },
];

pub const SHARING_TYPES: &[Term] = &[
    Term {
        canonical: "single",
        phrases: &["single", "single sharing", "1 sharing", "private room", "single room"],
        codes: &[],
    },
    Term {
        canonical: "double",
        phrases: &["double", "double sharing", "2 sharing", "twin sharing"],
        codes: &[],
    },
    Term {
        canonical: "triple",
        phrases: &["triple", "triple sharing", "3 sharing"],
        codes: &[],
    },
];

pub const CATEGORIES: &[Term] = &[
    Term {
        canonical: "residential",
        phrases: &["residential"],
        codes: &[],
    },
    Term {
        canonical: "commercial",
        phrases: &["commercial"],
        codes: &[],
    },
    Term {
        canonical: "industrial",
        phrases: &["industrial"],
        codes: &[],
    },
];

/// Words that never become location hints
pub const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "any", "are", "around", "at", "available", "best", "by", "for", "from",
    "ft", "good", "i", "in", "is", "km", "kms", "listing", "listings", "looking", "me", "my",
    "near", "need", "new", "of", "on", "or", "properties", "property", "room", "rooms",
    "sharing", "show", "sq", "sqft", "the", "to", "want", "with",
];

/// Lower-case, turn `-`/`_` into spaces and collapse whitespace
pub fn fold(value: &str) -> String {
    value
        .to_lowercase()
        .replace(['-', '_'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Map a record value or facet value onto a canonical term
///
/// Accepts the canonical value itself, any phrase, or any short code.
/// Canonicals containing a hyphen are reached through their folded phrase.
pub fn canonicalize(table: &[Term], value: &str) -> Option<&'static str> {
    let folded = fold(value);
    if folded.is_empty() {
        return None;
    }

    table
        .iter()
        .find(|term| {
            term.canonical == folded
                || term.phrases.contains(&folded.as_str())
                || term.codes.contains(&folded.as_str())
        })
        .map(|term| term.canonical)
}

/// Multiplier for an Indian-numbering unit suffix
pub fn unit_multiplier(unit: &str) -> Option<f64> {
    match unit {
        "k" | "thousand" => Some(1_000.0),
        "l" | "lac" | "lacs" | "lakh" | "lakhs" => Some(100_000.0),
        "cr" | "crore" | "crores" => Some(10_000_000.0),
        _ => None,
    }
}

/// Regex fragment matching any unit accepted by [`unit_multiplier`]
pub const UNIT_PATTERN: &str = r"k|thousand|lakhs|lakh|lacs|lac|l|crores|crore|cr";

static DIGIT_GROUP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d),(\d)").unwrap());

static AMOUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?P<cur>₹|\brs\b\.?|\binr\b)?\s*(?P<num>\d+(?:\.\d+)?)\s*(?P<unit>{UNIT_PATTERN})?\b"
    ))
    .unwrap()
});

/// Remove thousands separators between digits ("1,50,000" → "150000")
pub fn strip_digit_groups(text: &str) -> String {
    let mut current = text.to_string();
    while DIGIT_GROUP.is_match(&current) {
        current = DIGIT_GROUP.replace_all(&current, "$1$2").into_owned();
    }
    current
}

/// Convert a number and optional unit into an absolute amount
pub fn scale_amount(number: &str, unit: Option<&str>) -> Option<f64> {
    let value: f64 = number.parse().ok()?;
    let multiplier = match unit {
        Some(unit) => unit_multiplier(unit)?,
        None => 1.0,
    };
    let amount = value * multiplier;
    amount.is_finite().then_some(amount)
}

/// Amount in free-form price text such as "₹ 1.2 Cr" or "25,000/month"
///
/// The first amount marked by a currency or unit wins, so "2 BHK ₹ 45 Lakh"
/// reads as 45 lakh. Without any marked amount the first number is used.
pub fn amount_from_text(text: &str) -> Option<f64> {
    let cleaned = strip_digit_groups(&text.to_lowercase());
    let mut first = None;

    for caps in AMOUNT.captures_iter(&cleaned) {
        let unit = caps.name("unit").map(|m| m.as_str());
        if caps.name("cur").is_some() || unit.is_some() {
            return scale_amount(&caps["num"], unit);
        }
        if first.is_none() {
            first = scale_amount(&caps["num"], None);
        }
    }

    first
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold() {
        assert_eq!(fold("  Semi-Furnished "), "semi furnished");
        assert_eq!(fold("Paying_Guest"), "paying guest");
        assert_eq!(fold(""), "");
    }

    #[test]
    fn test_canonicalize_codes_and_phrases() {
        assert_eq!(canonicalize(LISTING_TYPES, "RN"), Some("rent"));
        assert_eq!(canonicalize(LISTING_TYPES, "Rental"), Some("rent"));
        assert_eq!(canonicalize(LISTING_TYPES, "AG"), Some("agricultural"));
        assert_eq!(canonicalize(PROPERTY_TYPES, "Flat"), Some("apartment"));
        assert_eq!(canonicalize(FURNISHING_TYPES, "Semi-Furnished"), Some("semi-furnished"));
        assert_eq!(canonicalize(FURNISHING_TYPES, "Fully Furnished"), Some("furnished"));
        assert_eq!(canonicalize(PROPERTY_TYPES, "castle"), None);
        assert_eq!(canonicalize(PROPERTY_TYPES, "   "), None);
    }

    #[test]
    fn test_every_canonical_maps_to_itself() {
        for table in [LISTING_TYPES, PROPERTY_TYPES, FURNISHING_TYPES, SHARING_TYPES, CATEGORIES] {
            for term in table {
                assert_eq!(canonicalize(table, term.canonical), Some(term.canonical));
            }
        }
    }

    #[test]
    fn test_amount_from_text() {
        assert_eq!(amount_from_text("₹ 25,000"), Some(25_000.0));
        assert_eq!(amount_from_text("Rs. 1,50,000 / month"), Some(150_000.0));
        assert_eq!(amount_from_text("1.2 Cr"), Some(12_000_000.0));
        assert_eq!(amount_from_text("45 lakh"), Some(4_500_000.0));
        assert_eq!(amount_from_text("50k"), Some(50_000.0));
        assert_eq!(amount_from_text("price on request"), None);

        // Marked amounts beat leading counts
        assert_eq!(amount_from_text("2 BHK ₹ 45 Lakh"), Some(4_500_000.0));
        assert_eq!(amount_from_text("3 bed, 1,200 sqft, 85 lakh"), Some(8_500_000.0));
    }

    #[test]
    fn test_tables_have_unique_canonicals() {
        for table in [LISTING_TYPES, PROPERTY_TYPES, FURNISHING_TYPES, SHARING_TYPES, CATEGORIES] {
            let mut seen: Vec<&str> = table.iter().map(|t| t.canonical).collect();
            seen.sort_unstable();
            seen.dedup();
            assert_eq!(seen.len(), table.len());
        }
    }
}
