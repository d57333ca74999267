// Service exports
pub mod catalog;
pub mod recent;

pub use catalog::{flatten_grouped, retain_eligible, Catalog, CatalogError, CatalogSnapshot, CatalogState};
pub use recent::{LocationStore, MemoryLocationStore, RecentLocations, StoreError};
