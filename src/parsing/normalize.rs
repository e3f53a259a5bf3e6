use regex::Regex;

/// Route separators between legs of a voyage, most specific first.
///
/// Order matters: `-->` must be tried before `->` and `>`, otherwise the
/// longer arrows would leave stray dashes in the destination leg.
pub const ROUTE_SEPARATORS: &[&str] = &["<>", ">>", "-->", "=>", "===", "->", ">"];

/// Words that carry no geographic meaning and are stripped from a destination.
///
/// Removal is applied in this order; `FOR ORDER` precedes `ORDER` so that the
/// longer phrase is removed as a whole.
pub const NOISE_WORDS: &[&str] = &[
    "TBA",
    "ANCH",
    "ANCHORING",
    "BUNKERING",
    "OPL",
    "OPEN",
    "IN ORDER",
    "FOR ORDER",
    "FOR ORDERS",
    "ORDERS",
    "ORDER",
    "UNKNOWN",
    "N/A",
    "NONE",
    "EAST",
    "WEST",
    "NORTH",
    "SOUTH",
    "ANCHORAGE",
    "AWAITING",
];

/// Destinations that, on their own, mean "no destination reported".
pub const PURE_NOISE: &[&str] = &[
    "TBA",
    "ANCH",
    "UNKNOWN",
    "N/A",
    "NONE",
    "IN ORDER",
    "FOR ORDER",
    "FOR ORDERS",
    "ORDERS",
    "ORDER",
    "ANCHORAGE",
];

/// Symbols replaced by a space before noise words are removed.
///
/// The comma is deliberately absent: it survives cleaning and acts as a
/// separator for country extraction ("DAMPIER, AUSTRALIA").
const SYMBOLS: &str = "<>=|/\\._-\"'`~!@#$%^&*()[]{}:;";

/// Uppercase and trim a string. All catalog index keys use this form.
#[must_use]
pub fn normalize(text: &str) -> String {
    text.trim().to_uppercase()
}

/// Cleans raw AIS destination text before it is matched against the catalog
///
/// Holds the compiled patterns so they are built once per engine rather than
/// once per destination.
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    bracketed: Regex,
    route_word: Regex,
    noise_words: Vec<Regex>,
}

impl TextNormalizer {
    pub fn new() -> Self {
        let noise_words = NOISE_WORDS
            .iter()
            .map(|word| {
                Regex::new(&format!(r"\b{}\b", regex::escape(word)))
                    .expect("escaped noise word is a valid pattern")
            })
            .collect();

        Self {
            bracketed: Regex::new(r"\([^)]*\)").expect("bracket pattern is valid"),
            route_word: Regex::new(r"(?i)\bTO\b").expect("route word pattern is valid"),
            noise_words,
        }
    }

    /// Whether the whole destination is a placeholder such as "TBA" or "FOR ORDERS"
    pub fn is_pure_noise(&self, text: &str) -> bool {
        let upper = normalize(text);
        PURE_NOISE.contains(&upper.as_str())
    }

    /// Strip bracketed remarks, symbols and noise words.
    ///
    /// The result is uppercase with single spaces, and empty if nothing
    /// meaningful remains.
    pub fn remove_noise(&self, text: &str) -> String {
        let upper = text.to_uppercase();
        let unbracketed = self.bracketed.replace_all(&upper, "");

        let mut cleaned: String = unbracketed
            .chars()
            .map(|c| if SYMBOLS.contains(c) { ' ' } else { c })
            .collect();

        for pattern in &self.noise_words {
            if pattern.is_match(&cleaned) {
                cleaned = pattern.replace_all(&cleaned, "").into_owned();
            }
        }

        cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Keep only the final leg of a route such as `"EGSUZ -> TRTUZ"`.
    ///
    /// The first separator from [`ROUTE_SEPARATORS`] found in the text wins,
    /// then the standalone word `TO`. Text without a separator is returned
    /// unchanged.
    pub fn extract_route_destination<'t>(&self, text: &'t str) -> &'t str {
        for separator in ROUTE_SEPARATORS {
            if text.contains(separator) {
                return last_leg(text.split(separator));
            }
        }

        if self.route_word.is_match(text) {
            return last_leg(self.route_word.split(text));
        }

        text
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Last non-empty route leg, trimmed
fn last_leg<'t>(legs: impl Iterator<Item = &'t str>) -> &'t str {
    legs.map(str::trim).filter(|leg| !leg.is_empty()).last().unwrap_or("")
}
