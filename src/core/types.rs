use serde::{Deserialize, Serialize};

/// The resolution pipeline step that produced a match
///
/// Variants are listed in pipeline order. Exact identity stages always run
/// before fuzzy stages, and country-scoped stages before global ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStage {
    /// Cleaned text is exactly a known port name
    ExactPortName,
    /// Port name matched exactly within a country named in the text
    CountryExactPortName,
    /// Cleaned text is a known five-letter LOCODE
    Locode,
    /// Fuzzy match within the named country at the strict threshold
    CountryFuzzy,
    /// Fuzzy match within the named country at the relaxed threshold
    CountryFuzzyFallback,
    /// Exact port name, re-checked after country handling
    GlobalExactPortName,
    /// Cleaned text contains, or is contained in, a known port name
    Containment,
    /// Fuzzy match over all ports at the strict threshold
    GlobalFuzzy,
    /// Cleaned text is a bare three-letter port code
    PortCode,
    /// Fuzzy match over all ports at the relaxed threshold
    GlobalFuzzyFallback,
}

impl MatchStage {
    /// Whether the stage relies on string similarity rather than identity
    #[must_use]
    pub fn is_fuzzy(self) -> bool {
        matches!(
            self,
            Self::CountryFuzzy | Self::CountryFuzzyFallback | Self::GlobalFuzzy | Self::GlobalFuzzyFallback
        )
    }
}

impl std::fmt::Display for MatchStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ExactPortName => write!(f, "exact port name"),
            Self::CountryExactPortName => write!(f, "exact port name in country"),
            Self::Locode => write!(f, "LOCODE"),
            Self::CountryFuzzy => write!(f, "fuzzy in country"),
            Self::CountryFuzzyFallback => write!(f, "fuzzy in country (relaxed)"),
            Self::GlobalExactPortName => write!(f, "exact port name (global)"),
            Self::Containment => write!(f, "partial name"),
            Self::GlobalFuzzy => write!(f, "fuzzy"),
            Self::PortCode => write!(f, "port code"),
            Self::GlobalFuzzyFallback => write!(f, "fuzzy (relaxed)"),
        }
    }
}
