use serde::{Deserialize, Serialize};

/// Structured, partial filter description
///
/// Every field is optional; an empty value matches every candidate. The
/// criteria never references the candidate set and can be reused freely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchCriteria {
    #[serde(rename = "listingTypes", default, skip_serializing_if = "Vec::is_empty")]
    pub listing_types: Vec<String>,
    #[serde(rename = "propertyTypes", default, skip_serializing_if = "Vec::is_empty")]
    pub property_types: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub furnishing: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sharing: Option<String>,
    #[serde(rename = "priceRange", default, skip_serializing_if = "Option::is_none")]
    pub price_range: Option<PriceRange>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
    /// Leftover tokens carrying digits (ids, pin codes, project numbers)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
}

impl SearchCriteria {
    /// Number of fields that constrain the match
    pub fn present_fields(&self) -> usize {
        [
            !self.listing_types.is_empty(),
            !self.property_types.is_empty(),
            self.furnishing.is_some(),
            self.sharing.is_some(),
            self.price_range.is_some_and(|r| r.is_bounded()),
            !self.locations.is_empty(),
            !self.categories.is_empty(),
            !self.keywords.is_empty(),
        ]
        .into_iter()
        .filter(|present| *present)
        .count()
    }

    pub fn is_empty(&self) -> bool {
        self.present_fields() == 0
    }
}

/// Price interval; `strict` turns it from a ranking hint into a hard constraint
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub strict: bool,
}

impl PriceRange {
    pub fn is_bounded(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }

    /// Whether the closed interval `[lo, hi]` intersects this range
    #[inline]
    pub fn overlaps(&self, lo: f64, hi: f64) -> bool {
        let min = self.min.unwrap_or(f64::NEG_INFINITY);
        let max = self.max.unwrap_or(f64::INFINITY);
        hi >= min && lo <= max
    }
}

/// Facet panel selection
///
/// Lists are as emitted by the panel; an empty list means "not set".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FacetSelection {
    #[serde(rename = "listingTypes", default)]
    pub listing_types: Vec<String>,
    #[serde(rename = "propertyTypes", default)]
    pub property_types: Vec<String>,
    #[serde(rename = "furnishingTypes", default)]
    pub furnishing_types: Vec<String>,
    #[serde(rename = "sharingTypes", default)]
    pub sharing_types: Vec<String>,
    #[serde(rename = "priceRange", default)]
    pub price_range: PriceBounds,
    #[serde(default)]
    pub category: Vec<String>,
}

impl FacetSelection {
    pub fn is_empty(&self) -> bool {
        self.listing_types.is_empty()
            && self.property_types.is_empty()
            && self.furnishing_types.is_empty()
            && self.sharing_types.is_empty()
            && !self.price_range.is_set()
            && self.category.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceBounds {
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}

impl PriceBounds {
    pub fn is_set(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }
}
