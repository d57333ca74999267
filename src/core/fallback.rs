use crate::core::normalize::NormalizedQuery;
use crate::models::Property;

/// Lower-cased, space-joined searchable text of a record
pub fn search_blob(property: &Property) -> String {
    property.searchable_fields().join(" ").to_lowercase()
}

/// Naive substring search used when structured matching selects nothing
///
/// Keeps every candidate whose search blob contains the whole query, in
/// candidate order. An empty query keeps everything.
pub fn fallback_search<'a>(candidates: &'a [Property], query: &NormalizedQuery) -> Vec<&'a Property> {
    if query.is_empty() {
        return candidates.iter().collect();
    }

    candidates
        .iter()
        .filter(|property| search_blob(property).contains(query.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Address, AddressParts};

    fn create_property(id: &str, title: &str, city: &str) -> Property {
        let mut property = Property::new(id);
        property.title = Some(title.to_string());
        property.address = Some(Address::Structured(AddressParts {
            city: Some(city.to_string()),
            ..Default::default()
        }));
        property
    }

    #[test]
    fn test_matches_across_fields() {
        let candidates = vec![
            create_property("PA01", "Lake View Towers", "Mysore"),
            create_property("PA02", "Hill Crest", "Ooty"),
        ];

        let found = fallback_search(&candidates, &NormalizedQuery::new("towers mysore"));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].property_id, "PA01");

        let found = fallback_search(&candidates, &NormalizedQuery::new("pa0"));
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_no_match() {
        let candidates = vec![create_property("PA01", "Lake View", "Mysore")];
        assert!(fallback_search(&candidates, &NormalizedQuery::new("delhi")).is_empty());
    }

    #[test]
    fn test_blob_is_lowercase() {
        let property = create_property("PA01", "Lake VIEW", "Mysore");
        assert_eq!(search_blob(&property), "pa01 lake view mysore");
    }
}
