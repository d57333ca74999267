use parking_lot::RwLock;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use std::fmt::Display;
use std::io::Read;
use std::sync::Arc;
use thiserror::Error;
use validator::Validate;

use crate::models::Property;

/// Errors that can occur while populating the candidate set
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Population failed: {0}")]
    Population(String),

    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Lifecycle of the candidate set as seen by the render surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogState {
    Loading,
    Ready(usize),
    Failed,
}

/// Flatten a category → subtype → records payload into one ordered list
///
/// Payload order is preserved. Non-array leaves are ignored; records that
/// fail to parse or validate, and repeated ids, are skipped.
pub fn flatten_grouped(grouped: Value) -> Vec<Property> {
    let Value::Object(categories) = grouped else {
        tracing::warn!("Listings payload is not an object, treating as empty");
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut properties = Vec::new();

    for (category, subtypes) in categories {
        let Value::Object(subtypes) = subtypes else {
            continue;
        };

        for (subtype, items) in subtypes {
            let Value::Array(items) = items else {
                continue;
            };

            for item in items {
                let property: Property = match serde_json::from_value(item) {
                    Ok(p) => p,
                    Err(e) => {
                        tracing::warn!("Skipping unreadable record in {}/{}: {}", category, subtype, e);
                        continue;
                    }
                };

                if let Err(e) = property.validate() {
                    tracing::warn!("Skipping invalid record in {}/{}: {}", category, subtype, e);
                    continue;
                }

                if !seen.insert(property.property_id.clone()) {
                    tracing::warn!("Skipping duplicate record {}", property.property_id);
                    continue;
                }

                properties.push(property);
            }
        }
    }

    properties
}

/// Keep only records whose id is in the eligible set, preserving order
pub fn retain_eligible(properties: Vec<Property>, eligible: &HashSet<String>) -> Vec<Property> {
    properties
        .into_iter()
        .filter(|p| eligible.contains(&p.property_id))
        .collect()
}

/// Listings payload and eligible ids captured together
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogSnapshot {
    #[serde(default)]
    pub listings: Value,
    #[serde(default)]
    pub eligible: Vec<String>,
}

impl CatalogSnapshot {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        Ok(serde_json::from_reader(reader)?)
    }
}

struct Published {
    snapshot: Arc<[Property]>,
    state: CatalogState,
}

/// Holder of the current candidate snapshot
///
/// Every change publishes a whole new snapshot; a snapshot handed out by
/// [`Catalog::snapshot`] is never modified afterwards, so an in-flight
/// search keeps a consistent view while a deletion lands.
pub struct Catalog {
    published: RwLock<Published>,
}

impl Catalog {
    pub fn new() -> Self {
        Self {
            published: RwLock::new(Published {
                snapshot: Arc::from(Vec::new()),
                state: CatalogState::Loading,
            }),
        }
    }

    /// Publish a candidate set from both upstream halves
    ///
    /// Both must have succeeded; otherwise the catalog moves to
    /// [`CatalogState::Failed`] with an empty set and nothing partial is
    /// ever published.
    pub fn populate<E1, E2>(
        &self,
        listings: Result<Value, E1>,
        eligible: Result<HashSet<String>, E2>,
    ) -> Result<usize, CatalogError>
    where
        E1: Display,
        E2: Display,
    {
        let (listings, eligible) = match (listings, eligible) {
            (Ok(listings), Ok(eligible)) => (listings, eligible),
            (Err(e), _) => return Err(self.fail(format!("listings: {}", e))),
            (_, Err(e)) => return Err(self.fail(format!("eligibility: {}", e))),
        };

        let all = flatten_grouped(listings);
        let total = all.len();
        let candidates = retain_eligible(all, &eligible);

        tracing::info!(
            "Catalog populated: {} eligible of {} listings",
            candidates.len(),
            total
        );

        Ok(self.replace(candidates))
    }

    /// Populate from a snapshot file payload
    pub fn load_snapshot(&self, snapshot: CatalogSnapshot) -> usize {
        let eligible: HashSet<String> = snapshot.eligible.into_iter().collect();
        let candidates = retain_eligible(flatten_grouped(snapshot.listings), &eligible);
        self.replace(candidates)
    }

    fn fail(&self, reason: String) -> CatalogError {
        tracing::error!("Catalog population failed: {}", reason);
        let mut published = self.published.write();
        published.snapshot = Arc::from(Vec::new());
        published.state = CatalogState::Failed;
        CatalogError::Population(reason)
    }

    /// Publish a new candidate set wholesale
    pub fn replace(&self, properties: Vec<Property>) -> usize {
        let count = properties.len();
        let mut published = self.published.write();
        published.snapshot = Arc::from(properties);
        published.state = CatalogState::Ready(count);
        count
    }

    /// Publish a snapshot without `property_id`; false if it was not present
    pub fn remove(&self, property_id: &str) -> bool {
        let mut published = self.published.write();
        if !published.snapshot.iter().any(|p| p.property_id == property_id) {
            return false;
        }

        let remaining: Vec<Property> = published
            .snapshot
            .iter()
            .filter(|p| p.property_id != property_id)
            .cloned()
            .collect();

        tracing::debug!("Removed {} from catalog, {} remain", property_id, remaining.len());
        published.state = CatalogState::Ready(remaining.len());
        published.snapshot = Arc::from(remaining);
        true
    }

    /// Latest committed candidate set
    pub fn snapshot(&self) -> Arc<[Property]> {
        Arc::clone(&self.published.read().snapshot)
    }

    pub fn state(&self) -> CatalogState {
        self.published.read().state
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn grouped() -> Value {
        json!({
            "residential": {
                "rent": [
                    {"propertyId": "P1", "listingType": "rent", "propertyType": "apartment"},
                    {"propertyId": "P2", "listingType": "rent", "propertyType": "house"}
                ],
                "meta": {"count": 2}
            },
            "commercial": {
                "sale": [
                    {"propertyId": "P3", "listingType": "sale", "propertyType": "office"},
                    {"propertyId": "", "listingType": "sale"},
                    {"listingType": "sale"},
                    {"propertyId": "P1", "listingType": "sale"}
                ]
            }
        })
    }

    fn eligible(ids: &[&str]) -> HashSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    fn ids(snapshot: &[Property]) -> Vec<&str> {
        snapshot.iter().map(|p| p.property_id.as_str()).collect()
    }

    #[test]
    fn test_flatten_preserves_order_and_skips_bad_records() {
        let properties = flatten_grouped(grouped());
        assert_eq!(ids(&properties), vec!["P1", "P2", "P3"]);
        assert_eq!(properties[0].listing_type.as_deref(), Some("rent"));
    }

    #[test]
    fn test_flatten_keeps_records_with_odd_fields() {
        let properties = flatten_grouped(json!({
            "a": {
                "b": [
                    {"propertyId": "P1", "name": 12345},
                    {"propertyId": "P2", "price": true},
                    {"propertyId": "P3", "price": ["n/a"], "address": 7}
                ]
            }
        }));

        assert_eq!(ids(&properties), vec!["P1", "P2", "P3"]);
        assert_eq!(properties[0].name.as_deref(), Some("12345"));
        assert!(properties[1].price.is_none());
        assert!(properties[2].address.is_none());
    }

    #[test]
    fn test_flatten_non_object() {
        assert!(flatten_grouped(json!([1, 2, 3])).is_empty());
        assert!(flatten_grouped(Value::Null).is_empty());
    }

    #[test]
    fn test_populate_filters_eligible() {
        let catalog = Catalog::new();
        assert_eq!(catalog.state(), CatalogState::Loading);

        let count = catalog
            .populate::<String, String>(Ok(grouped()), Ok(eligible(&["P3", "P1"])))
            .unwrap();

        assert_eq!(count, 2);
        assert_eq!(catalog.state(), CatalogState::Ready(2));
        assert_eq!(ids(&catalog.snapshot()), vec!["P1", "P3"]);
    }

    #[test]
    fn test_populate_is_all_or_nothing() {
        let catalog = Catalog::new();
        let result = catalog.populate::<&str, &str>(Ok(grouped()), Err("token service unavailable"));

        assert!(matches!(result, Err(CatalogError::Population(_))));
        assert_eq!(catalog.state(), CatalogState::Failed);
        assert!(catalog.snapshot().is_empty());

        let result = catalog.populate::<&str, &str>(Err("timeout"), Ok(eligible(&["P1"])));
        assert!(result.is_err());
        assert!(catalog.snapshot().is_empty());
    }

    #[test]
    fn test_remove_publishes_new_snapshot() {
        let catalog = Catalog::new();
        catalog.replace(flatten_grouped(grouped()));

        let before = catalog.snapshot();
        assert!(catalog.remove("P2"));
        assert!(!catalog.remove("P2"));

        // The earlier snapshot is untouched
        assert_eq!(ids(&before), vec!["P1", "P2", "P3"]);
        assert_eq!(ids(&catalog.snapshot()), vec!["P1", "P3"]);
        assert_eq!(catalog.state(), CatalogState::Ready(2));
    }

    #[test]
    fn test_snapshot_from_reader() {
        let payload = r#"{"listings": {"a": {"b": [{"propertyId": "X1"}]}}, "eligible": ["X1"]}"#;
        let snapshot = CatalogSnapshot::from_reader(payload.as_bytes()).unwrap();

        let catalog = Catalog::new();
        assert_eq!(catalog.load_snapshot(snapshot), 1);
        assert_eq!(ids(&catalog.snapshot()), vec!["X1"]);
    }
}
