use crate::catalog::store::PortCatalog;
use crate::utils::validation::is_country_code_shape;

/// A destination split into an optional country qualifier and a port-name part
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountrySplit {
    /// Uppercased country name or two-letter code, if one was recognised
    pub qualifier: Option<String>,

    /// The rest of the text, which should name the port
    pub remainder: String,
}

impl CountrySplit {
    fn unqualified(text: &str) -> Self {
        Self {
            qualifier: None,
            remainder: text.to_string(),
        }
    }
}

/// Splits "PORT, COUNTRY" style destinations using the catalog's known countries
pub struct CountryExtractor<'a> {
    catalog: &'a PortCatalog,
}

impl<'a> CountryExtractor<'a> {
    pub fn new(catalog: &'a PortCatalog) -> Self {
        Self { catalog }
    }

    /// Look for a country at either end of the text.
    ///
    /// Checked in order: the last token as a country name, the last token as
    /// a two-letter country code, then the first token as a country name
    /// ("INDIA, KOCHI"). Multi-word country names are not recognised since
    /// each test looks at a single token.
    pub fn extract(&self, text: &str) -> CountrySplit {
        let text = text.trim();
        let tokens: Vec<&str> = text
            .split(is_separator)
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect();

        let (first, last) = match tokens.as_slice() {
            [first, .., last] => (*first, *last),
            _ => return CountrySplit::unqualified(text),
        };

        if self.catalog.is_country_name(last)
            || (is_country_code_shape(last) && self.catalog.is_country_code(last))
        {
            return CountrySplit {
                qualifier: Some(last.to_uppercase()),
                remainder: tokens[..tokens.len() - 1].join(" "),
            };
        }

        if self.catalog.is_country_name(first) {
            return CountrySplit {
                qualifier: Some(first.to_uppercase()),
                remainder: tokens[1..].join(" "),
            };
        }

        CountrySplit::unqualified(text)
    }
}

fn is_separator(c: char) -> bool {
    matches!(c, ',' | '-' | '.' | '/') || c.is_whitespace()
}
