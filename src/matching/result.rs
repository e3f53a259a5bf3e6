use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::core::port::PortRecord;
use crate::core::types::MatchStage;

/// A single resolved port, echoing the destination string it was resolved from
#[derive(Debug, Clone, PartialEq)]
pub struct PortMatch {
    /// The raw input, untouched
    pub reported_destination: String,
    pub locode: String,
    pub port: String,
    pub country: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

impl PortMatch {
    pub fn new(record: &PortRecord, reported_destination: &str) -> Self {
        Self {
            reported_destination: reported_destination.to_string(),
            locode: record.locode.clone(),
            port: record.port.clone(),
            country: record.country.clone(),
            lat: record.lat,
            lon: record.lon,
        }
    }
}

impl Serialize for PortMatch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(7))?;
        map.serialize_entry("reportedDestination", &self.reported_destination)?;
        map.serialize_entry("locode", &self.locode)?;
        map.serialize_entry("port", &self.port)?;
        map.serialize_entry("country", &self.country)?;
        map.serialize_entry("lat", &self.lat)?;
        map.serialize_entry("lon", &self.lon)?;
        map.serialize_entry("matched", &true)?;
        map.end()
    }
}

/// Outcome of resolving one destination string
///
/// Serializes to the response body shapes consumers expect: a single object
/// with `"matched": true`, an array of such objects, or an object carrying
/// only `reportedDestination` and `"matched": false`.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchResult {
    /// Exactly one port
    Matched(PortMatch),
    /// A bare port code shared by ports in several countries
    MatchedMany(Vec<PortMatch>),
    /// Nothing in the catalog fits
    Unmatched { reported_destination: String },
}

impl MatchResult {
    pub fn matched(record: &PortRecord, reported_destination: &str) -> Self {
        Self::Matched(PortMatch::new(record, reported_destination))
    }

    pub fn many<'r>(
        records: impl IntoIterator<Item = &'r PortRecord>,
        reported_destination: &str,
    ) -> Self {
        Self::MatchedMany(
            records
                .into_iter()
                .map(|record| PortMatch::new(record, reported_destination))
                .collect(),
        )
    }

    pub fn unmatched(reported_destination: &str) -> Self {
        Self::Unmatched {
            reported_destination: reported_destination.to_string(),
        }
    }

    #[must_use]
    pub fn is_matched(&self) -> bool {
        !matches!(self, Self::Unmatched { .. })
    }

    /// The input string this result was produced from
    #[must_use]
    pub fn reported_destination(&self) -> &str {
        match self {
            Self::Matched(m) => &m.reported_destination,
            Self::MatchedMany(list) => list
                .first()
                .map_or("", |m| m.reported_destination.as_str()),
            Self::Unmatched {
                reported_destination,
            } => reported_destination,
        }
    }

    /// All matched ports, empty when unmatched
    #[must_use]
    pub fn matches(&self) -> &[PortMatch] {
        match self {
            Self::Matched(m) => std::slice::from_ref(m),
            Self::MatchedMany(list) => list,
            Self::Unmatched { .. } => &[],
        }
    }

    /// The single matched port, if the result is `Matched`
    #[must_use]
    pub fn single(&self) -> Option<&PortMatch> {
        match self {
            Self::Matched(m) => Some(m),
            _ => None,
        }
    }
}

impl Serialize for MatchResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Matched(m) => m.serialize(serializer),
            Self::MatchedMany(list) => {
                let mut seq = serializer.serialize_seq(Some(list.len()))?;
                for m in list {
                    seq.serialize_element(m)?;
                }
                seq.end()
            }
            Self::Unmatched {
                reported_destination,
            } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("reportedDestination", reported_destination)?;
                map.serialize_entry("matched", &false)?;
                map.end()
            }
        }
    }
}

/// A match result together with the pipeline stage that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub result: MatchResult,
    /// `None` when unmatched
    pub stage: Option<MatchStage>,
}

impl Resolution {
    pub(crate) fn found(result: MatchResult, stage: MatchStage) -> Self {
        Self {
            result,
            stage: Some(stage),
        }
    }

    pub(crate) fn not_found(reported_destination: &str) -> Self {
        Self {
            result: MatchResult::unmatched(reported_destination),
            stage: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tuzla() -> PortRecord {
        PortRecord::new("TR", "TUZ", "Tuzla", "Turkey").with_coordinates(Some(40.82), Some(29.3))
    }

    #[test]
    fn test_matched_json_shape() {
        let result = MatchResult::matched(&tuzla(), " trtuz ");
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            json!({
                "reportedDestination": " trtuz ",
                "locode": "TRTUZ",
                "port": "Tuzla",
                "country": "Turkey",
                "lat": 40.82,
                "lon": 29.3,
                "matched": true
            })
        );
    }

    #[test]
    fn test_missing_coordinates_serialize_as_null() {
        let record = PortRecord::new("PG", "MAA", "Manam", "Papua New Guinea");
        let value = serde_json::to_value(MatchResult::matched(&record, "MAA")).unwrap();
        assert!(value["lat"].is_null());
        assert!(value["lon"].is_null());
    }

    #[test]
    fn test_many_is_array_sharing_destination() {
        let other = PortRecord::new("IN", "MAA", "Chennai", "India");
        let manam = PortRecord::new("PG", "MAA", "Manam", "Papua New Guinea");
        let result = MatchResult::many([&other, &manam], "MAA");

        let value = serde_json::to_value(&result).unwrap();
        let list = value.as_array().unwrap();
        assert_eq!(list.len(), 2);
        assert!(list.iter().all(|m| m["reportedDestination"] == "MAA"));
        assert!(list.iter().all(|m| m["matched"] == true));
        assert_eq!(result.matches().len(), 2);
        assert_eq!(result.reported_destination(), "MAA");
    }

    #[test]
    fn test_unmatched_json_shape() {
        let result = MatchResult::unmatched("TBA");
        assert!(!result.is_matched());
        assert!(result.matches().is_empty());
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({"reportedDestination": "TBA", "matched": false})
        );
    }
}
