use serde::{Deserialize, Serialize};

/// A single port in the UN/LOCODE reference table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortRecord {
    /// Five-character UN/LOCODE (country code + port code)
    pub locode: String,

    /// Three-letter location code. Not unique across countries.
    pub port_code: String,

    /// Canonical port name
    pub port: String,

    /// Two-letter ISO 3166 country code
    pub country_code: String,

    /// Canonical country name
    pub country: String,

    /// Latitude in decimal degrees, absent when the source coordinates were unparsable
    #[serde(default)]
    pub lat: Option<f64>,

    /// Longitude in decimal degrees
    #[serde(default)]
    pub lon: Option<f64>,
}

impl PortRecord {
    pub fn new(
        country_code: impl Into<String>,
        port_code: impl Into<String>,
        port: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        let country_code = country_code.into();
        let port_code = port_code.into();
        Self {
            locode: format!("{country_code}{port_code}"),
            port_code,
            port: port.into(),
            country_code,
            country: country.into(),
            lat: None,
            lon: None,
        }
    }

    #[must_use]
    pub fn with_coordinates(mut self, lat: Option<f64>, lon: Option<f64>) -> Self {
        self.lat = lat;
        self.lon = lon;
        self
    }

    /// Name of the first required field that is blank, if any.
    ///
    /// `country` may be blank: dataset builders leave it empty when a country
    /// code has no entry in their country table.
    pub fn blank_required_field(&self) -> Option<&'static str> {
        [
            ("locode", &self.locode),
            ("portCode", &self.port_code),
            ("port", &self.port),
            ("countryCode", &self.country_code),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
    }

    /// Format coordinates for display, or "-" when unknown
    pub fn coordinates_display(&self) -> String {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => format!("{lat:.4}, {lon:.4}"),
            _ => "-".to_string(),
        }
    }
}
