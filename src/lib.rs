//! Prop Search - Live search and filtering over property listings
//!
//! This library turns a free-text query plus facet selections into a
//! ranked subset of eligible listings. It implements a two-stage pipeline:
//! structured criteria matching with exact and partial tiers, and a naive
//! substring fallback when structured matching yields nothing.

pub mod config;
pub mod core;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use core::{
    fallback_search, find_matches, merge_facets, CriteriaExtractor, ExtractionError,
    KeywordExtractor, NormalizedQuery, SearchEngine,
};
pub use models::{
    FacetSelection, MatchResult, PriceRange, Property, SearchCriteria, SearchOutcome, SearchOutput,
    Selection,
};
pub use services::{Catalog, CatalogSnapshot, RecentLocations};
