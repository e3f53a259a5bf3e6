use tracing::{debug, trace};

use crate::catalog::index::{CandidateFinder, ScoredCandidate};
use crate::catalog::store::PortCatalog;
use crate::core::port::PortRecord;
use crate::core::types::MatchStage;
use crate::matching::result::{MatchResult, Resolution};
use crate::matching::scoring::DEFAULT_CONTAINMENT_FLOOR;
use crate::parsing::country::CountryExtractor;
use crate::parsing::normalize::{normalize, TextNormalizer};
use crate::utils::validation::{
    compact_code, is_locode_shape, is_port_code_shape, validate_relaxation, validate_threshold,
    ValidationError,
};

/// Default strict threshold for fuzzy matching within a named country
pub const DEFAULT_COUNTRY_THRESHOLD: f64 = 0.75;

/// Default relaxed threshold for fuzzy matching within a named country
pub const DEFAULT_COUNTRY_FALLBACK_THRESHOLD: f64 = 0.65;

/// Default strict threshold for fuzzy matching over all ports
pub const DEFAULT_GLOBAL_THRESHOLD: f64 = 0.80;

/// Default relaxed threshold for fuzzy matching over all ports
pub const DEFAULT_GLOBAL_FALLBACK_THRESHOLD: f64 = 0.70;

/// Configuration for the matching engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchingConfig {
    pub country_threshold: f64,
    pub country_fallback_threshold: f64,
    pub global_threshold: f64,
    pub global_fallback_threshold: f64,
    /// Minimum score for a query found verbatim inside a port name
    pub containment_floor: f64,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            country_threshold: DEFAULT_COUNTRY_THRESHOLD,
            country_fallback_threshold: DEFAULT_COUNTRY_FALLBACK_THRESHOLD,
            global_threshold: DEFAULT_GLOBAL_THRESHOLD,
            global_fallback_threshold: DEFAULT_GLOBAL_FALLBACK_THRESHOLD,
            containment_floor: DEFAULT_CONTAINMENT_FLOOR,
        }
    }
}

impl MatchingConfig {
    /// Check every threshold is in `[0, 1]` and each fallback relaxes its primary.
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_threshold("country_threshold", self.country_threshold)?;
        validate_threshold("country_fallback_threshold", self.country_fallback_threshold)?;
        validate_threshold("global_threshold", self.global_threshold)?;
        validate_threshold("global_fallback_threshold", self.global_fallback_threshold)?;
        validate_threshold("containment_floor", self.containment_floor)?;

        validate_relaxation(
            ("country_threshold", self.country_threshold),
            ("country_fallback_threshold", self.country_fallback_threshold),
        )?;
        validate_relaxation(
            ("global_threshold", self.global_threshold),
            ("global_fallback_threshold", self.global_fallback_threshold),
        )
    }
}

/// Resolves free-text AIS destinations against a port catalog
///
/// The engine borrows the catalog and holds no mutable state, so one engine
/// can serve any number of threads.
pub struct MatchingEngine<'a> {
    catalog: &'a PortCatalog,
    normalizer: TextNormalizer,
    config: MatchingConfig,
}

impl<'a> MatchingEngine<'a> {
    /// Create a new matching engine with default thresholds
    pub fn new(catalog: &'a PortCatalog) -> Self {
        Self::with_config(catalog, MatchingConfig::default())
    }

    /// Create a new matching engine with custom thresholds
    ///
    /// The configuration is used as given; call [`MatchingConfig::validate`]
    /// first when it comes from user input.
    pub fn with_config(catalog: &'a PortCatalog, config: MatchingConfig) -> Self {
        Self {
            catalog,
            normalizer: TextNormalizer::new(),
            config,
        }
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// Resolve a destination to a port, discarding which stage matched
    pub fn match_destination(&self, destination: &str) -> MatchResult {
        self.resolve(destination).result
    }

    /// Resolve a destination and report the stage that produced the result.
    ///
    /// Never fails: any input, including empty or garbage text, yields a
    /// result. The raw input is echoed unchanged as `reportedDestination`.
    pub fn resolve(&self, destination: &str) -> Resolution {
        let resolution = self.run_pipeline(destination);
        match resolution.stage {
            Some(stage) => debug!(
                destination,
                stage = %stage,
                matches = resolution.result.matches().len(),
                "Resolved destination"
            ),
            None => debug!(destination, "No port matched destination"),
        }
        resolution
    }

    /// Rank ports by similarity to `name`, optionally within one country.
    ///
    /// `country_code` may also be a country name; an unknown country yields
    /// no candidates.
    pub fn rank_candidates(
        &self,
        name: &str,
        country_code: Option<&str>,
        threshold: f64,
    ) -> Vec<ScoredCandidate<'a>> {
        let finder = CandidateFinder::new(self.catalog);
        match country_code {
            Some(qualifier) => match self.catalog.resolve_country_code(&normalize(qualifier)) {
                Some(code) => {
                    finder.rank_by_similarity(name, Some(code), threshold, self.config.containment_floor)
                }
                None => Vec::new(),
            },
            None => finder.rank_by_similarity(name, None, threshold, self.config.containment_floor),
        }
    }

    fn run_pipeline(&self, original: &str) -> Resolution {
        let catalog = self.catalog;
        let finder = CandidateFinder::new(catalog);
        let found = |record: &'a PortRecord, stage: MatchStage| {
            Resolution::found(MatchResult::matched(record, original), stage)
        };

        let trimmed = original.trim();
        if trimmed.is_empty() || self.normalizer.is_pure_noise(trimmed) {
            return Resolution::not_found(original);
        }

        let leg = self.normalizer.extract_route_destination(trimmed);
        let cleaned = self.normalizer.remove_noise(leg);
        if cleaned.is_empty() {
            return Resolution::not_found(original);
        }
        trace!(original, leg, cleaned = %cleaned, "Cleaned destination");

        let cleaned_upper = normalize(&cleaned);
        if let Some(record) = catalog.find_by_port_name(&cleaned_upper) {
            return found(record, MatchStage::ExactPortName);
        }

        let split = CountryExtractor::new(catalog).extract(&cleaned);
        let country_code = split
            .qualifier
            .as_deref()
            .and_then(|qualifier| catalog.resolve_country_code(qualifier));

        if let Some(code) = country_code {
            let remainder = normalize(&split.remainder);
            if let Some(&index) = catalog
                .indices_by_country_code(code)
                .iter()
                .find(|&&index| catalog.port_key(index) == remainder)
            {
                return found(catalog.record(index), MatchStage::CountryExactPortName);
            }
        }

        let code = compact_code(&cleaned);
        if is_locode_shape(&code) {
            if let Some(record) = catalog.get(&code) {
                return found(record, MatchStage::Locode);
            }
        }

        if let Some(code) = country_code {
            let tiers = [
                (self.config.country_threshold, MatchStage::CountryFuzzy),
                (self.config.country_fallback_threshold, MatchStage::CountryFuzzyFallback),
            ];
            for (threshold, stage) in tiers {
                if let Some(best) = finder.best_by_similarity(
                    &split.remainder,
                    Some(code),
                    threshold,
                    self.config.containment_floor,
                ) {
                    return found(best.record, stage);
                }
            }
        }

        if let Some(record) = catalog.find_by_port_name(&cleaned_upper) {
            return found(record, MatchStage::GlobalExactPortName);
        }

        if let Some(record) = finder.find_containing(&cleaned_upper) {
            return found(record, MatchStage::Containment);
        }

        if let Some(best) = finder.best_by_similarity(
            &cleaned,
            None,
            self.config.global_threshold,
            self.config.containment_floor,
        ) {
            return found(best.record, MatchStage::GlobalFuzzy);
        }

        if is_port_code_shape(&code) {
            match catalog.find_by_port_code(&code).as_slice() {
                [] => {}
                [record] => return found(*record, MatchStage::PortCode),
                records => {
                    return Resolution::found(
                        MatchResult::many(records.iter().copied(), original),
                        MatchStage::PortCode,
                    )
                }
            }
        }

        if let Some(best) = finder.best_by_similarity(
            &cleaned,
            None,
            self.config.global_fallback_threshold,
            self.config.containment_floor,
        ) {
            return found(best.record, MatchStage::GlobalFuzzyFallback);
        }

        Resolution::not_found(original)
    }
}
