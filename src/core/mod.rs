// Core algorithm exports
pub mod extractor;
pub mod fallback;
pub mod filters;
pub mod matcher;
pub mod merge;
pub mod normalize;
pub mod pipeline;
pub mod vocabulary;


pub use extractor::{CriteriaExtractor, ExtractionError, KeywordExtractor};
pub use fallback::{fallback_search, search_blob};
pub use matcher::{evaluate, find_matches, Verdict};
pub use merge::merge_facets;
pub use normalize::NormalizedQuery;
pub use pipeline::SearchEngine;
