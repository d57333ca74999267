use crate::models::{FacetSelection, PriceRange, SearchCriteria};

/// Overlay explicit facet selections on extracted criteria
///
/// Any facet the user set replaces the inferred field outright; unset
/// facets leave the inferred field alone. A facet price bound makes the
/// price range strict.
///
/// Furnishing and sharing stay single-valued: only the first selected
/// value is applied even though the panel allows several. This is a
/// product rule awaiting confirmation, not an oversight.
pub fn merge_facets(extracted: SearchCriteria, facets: &FacetSelection) -> SearchCriteria {
    let mut criteria = extracted;

    if !facets.listing_types.is_empty() {
        criteria.listing_types = facets.listing_types.clone();
    }
    if !facets.property_types.is_empty() {
        criteria.property_types = facets.property_types.clone();
    }
    if let Some(furnishing) = facets.furnishing_types.first() {
        criteria.furnishing = Some(furnishing.clone());
    }
    if let Some(sharing) = facets.sharing_types.first() {
        criteria.sharing = Some(sharing.clone());
    }
    if facets.price_range.is_set() {
        criteria.price_range = Some(PriceRange {
            min: facets.price_range.min,
            max: facets.price_range.max,
            strict: true,
        });
    }
    if !facets.category.is_empty() {
        criteria.categories = facets.category.clone();
    }

    criteria
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PriceBounds;

    fn extracted() -> SearchCriteria {
        SearchCriteria {
            listing_types: vec!["rent".into()],
            property_types: vec!["apartment".into()],
            furnishing: Some("unfurnished".into()),
            price_range: Some(PriceRange { min: None, max: Some(30_000.0), strict: false }),
            locations: vec!["indiranagar".into()],
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_facets_keep_extracted() {
        let merged = merge_facets(extracted(), &FacetSelection::default());
        assert_eq!(merged, extracted());
    }

    #[test]
    fn test_facet_overrides_listing_type() {
        let facets = FacetSelection {
            listing_types: vec!["sale".into()],
            ..Default::default()
        };
        let merged = merge_facets(extracted(), &facets);

        assert_eq!(merged.listing_types, vec!["sale"]);
        assert_eq!(merged.property_types, vec!["apartment"]);
        assert_eq!(merged.locations, vec!["indiranagar"]);
    }

    #[test]
    fn test_first_furnishing_and_sharing_win() {
        let facets = FacetSelection {
            furnishing_types: vec!["furnished".into(), "semi-furnished".into()],
            sharing_types: vec!["triple".into(), "single".into()],
            ..Default::default()
        };
        let merged = merge_facets(extracted(), &facets);

        assert_eq!(merged.furnishing.as_deref(), Some("furnished"));
        assert_eq!(merged.sharing.as_deref(), Some("triple"));
    }

    #[test]
    fn test_price_facet_is_strict() {
        let facets = FacetSelection {
            price_range: PriceBounds { min: Some(10_000.0), max: None },
            ..Default::default()
        };
        let merged = merge_facets(extracted(), &facets);

        assert_eq!(
            merged.price_range,
            Some(PriceRange { min: Some(10_000.0), max: None, strict: true })
        );
    }

    #[test]
    fn test_category_facet() {
        let facets = FacetSelection {
            category: vec!["commercial".into()],
            ..Default::default()
        };
        assert_eq!(merge_facets(SearchCriteria::default(), &facets).categories, vec!["commercial"]);
    }
}
