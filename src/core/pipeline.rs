use crate::config::SearchSettings;
use crate::core::extractor::{CriteriaExtractor, ExtractionError, KeywordExtractor};
use crate::core::fallback::fallback_search;
use crate::core::matcher::find_matches;
use crate::core::merge::merge_facets;
use crate::core::normalize::NormalizedQuery;
use crate::models::{FacetSelection, FallbackReason, Property, SearchCriteria, SearchOutcome, SearchOutput};

/// Live search pipeline, re-run on every keystroke or facet change
///
/// # Stages
/// 1. Normalize the raw input
/// 2. Extract criteria from the text
/// 3. Overlay facet selections
/// 4. Tiered matching and selection
/// 5. Substring fallback when stage 2 failed or stage 4 selected nothing
///
/// Runs synchronously to completion; each call reads only the candidate
/// slice it is given, so a fresh snapshot is picked up on the next call.
#[derive(Debug, Clone)]
pub struct SearchEngine<E = KeywordExtractor> {
    extractor: E,
}

impl SearchEngine<KeywordExtractor> {
    pub fn new(settings: &SearchSettings) -> Self {
        Self {
            extractor: KeywordExtractor::from_settings(settings),
        }
    }
}

impl Default for SearchEngine<KeywordExtractor> {
    fn default() -> Self {
        Self::new(&SearchSettings::default())
    }
}

impl<E: CriteriaExtractor> SearchEngine<E> {
    pub fn with_extractor(extractor: E) -> Self {
        Self { extractor }
    }

    /// Stages 2 and 3: the criteria the matcher will see
    pub fn criteria(
        &self,
        query: &NormalizedQuery,
        facets: &FacetSelection,
    ) -> Result<SearchCriteria, ExtractionError> {
        let extracted = self.extractor.extract(query)?;
        Ok(merge_facets(extracted, facets))
    }

    /// Run the full pipeline over the current candidate set
    pub fn search<'a>(
        &self,
        candidates: &'a [Property],
        raw_query: &str,
        facets: &FacetSelection,
    ) -> SearchOutput<'a> {
        let query = NormalizedQuery::new(raw_query);

        // Blank query shows the whole set in candidate order
        if query.is_empty() {
            return SearchOutput {
                properties: candidates.iter().collect(),
                outcome: SearchOutcome::EmptyQuery,
            };
        }

        let cause = match self.criteria(&query, facets) {
            Ok(criteria) => {
                let result = find_matches(candidates, &criteria);
                let (selection, properties) = result.select();
                if !properties.is_empty() {
                    tracing::debug!(
                        "Query {:?} selected {} candidates ({:?})",
                        query.as_str(),
                        properties.len(),
                        selection
                    );
                    return SearchOutput {
                        properties,
                        outcome: SearchOutcome::Structured { selection },
                    };
                }
                FallbackReason::NoStructuredMatch
            }
            Err(e) => {
                tracing::warn!("Criteria extraction failed, using text fallback: {}", e);
                FallbackReason::ExtractionFailed(e.to_string())
            }
        };

        let properties = fallback_search(candidates, &query);
        tracing::debug!(
            "Fallback for {:?} found {} candidates ({:?})",
            query.as_str(),
            properties.len(),
            cause
        );

        SearchOutput {
            properties,
            outcome: SearchOutcome::Fallback { cause },
        }
    }
}
