// Model exports
pub mod criteria;
pub mod domain;
pub mod results;

pub use criteria::{FacetSelection, PriceBounds, PriceRange, SearchCriteria};
pub use domain::{Address, AddressParts, Price, Property};
pub use results::{FallbackReason, MatchResult, SearchOutcome, SearchOutput, Selection};
