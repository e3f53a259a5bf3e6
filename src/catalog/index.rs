use crate::core::port::PortRecord;
use crate::matching::scoring::similarity;
use crate::parsing::normalize::normalize;

use super::store::PortCatalog;

/// A catalog record with its similarity to a query
#[derive(Debug, Clone, Copy)]
pub struct ScoredCandidate<'a> {
    pub record: &'a PortRecord,
    pub score: f64,
}

/// Finds candidate ports for names that have no exact index hit
pub struct CandidateFinder<'a> {
    catalog: &'a PortCatalog,
}

impl<'a> CandidateFinder<'a> {
    pub fn new(catalog: &'a PortCatalog) -> Self {
        Self { catalog }
    }

    /// First port whose name contains the text or is contained in it.
    ///
    /// Port names are scanned in first-seen order and the first record filed
    /// under the matching name is returned.
    pub fn find_containing(&self, text: &str) -> Option<&'a PortRecord> {
        let text = normalize(text);
        if text.is_empty() {
            return None;
        }

        self.catalog
            .port_names()
            .find(|(name, _)| name.contains(text.as_str()) || text.contains(name))
            .map(|(_, index)| self.catalog.record(index))
    }

    /// Rank ports by similarity to `name`, keeping those at or above `threshold`.
    ///
    /// With a country code only that country's ports are considered. Results
    /// are sorted by score descending; equal scores keep catalog load order.
    pub fn rank_by_similarity(
        &self,
        name: &str,
        country_code: Option<&str>,
        threshold: f64,
        containment_floor: f64,
    ) -> Vec<ScoredCandidate<'a>> {
        let query = normalize(name);

        let score = |index: usize| ScoredCandidate {
            record: self.catalog.record(index),
            score: similarity(&query, self.catalog.port_key(index), containment_floor),
        };

        let mut candidates: Vec<ScoredCandidate<'a>> = match country_code {
            Some(code) => self
                .catalog
                .indices_by_country_code(code)
                .iter()
                .map(|&index| score(index))
                .filter(|c| c.score >= threshold)
                .collect(),
            None => (0..self.catalog.len())
                .map(score)
                .filter(|c| c.score >= threshold)
                .collect(),
        };

        // Stable sort keeps load order among equal scores
        candidates.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        candidates
    }

    /// Best-ranked port at or above `threshold`, if any
    pub fn best_by_similarity(
        &self,
        name: &str,
        country_code: Option<&str>,
        threshold: f64,
        containment_floor: f64,
    ) -> Option<ScoredCandidate<'a>> {
        self.rank_by_similarity(name, country_code, threshold, containment_floor)
            .into_iter()
            .next()
    }
}
