use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::port::PortRecord;
use crate::parsing::normalize::normalize;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Failed to read port catalog: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse port catalog: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Port record at index {index} has an empty '{field}' field")]
    InvalidRecord { index: usize, field: &'static str },

    #[error("Port catalog contains no records")]
    Empty,
}

/// The port reference table with lookup indexes
///
/// Records live in a single flat vector; every index maps an uppercased,
/// trimmed key to positions in that vector, in insertion order. The catalog is
/// never mutated after construction, so it can be shared freely across threads.
#[derive(Debug)]
pub struct PortCatalog {
    /// All port records, in load order
    records: Vec<PortRecord>,

    /// Uppercased port name of each record, parallel to `records`
    port_keys: Vec<String>,

    /// Index: LOCODE -> record index (first-seen wins)
    locode_to_index: HashMap<String, usize>,

    /// Index: port name -> indices of records sharing that name
    port_name_to_records: HashMap<String, Vec<usize>>,

    /// Distinct port names in first-seen order, for deterministic scans
    port_names: Vec<String>,

    /// Index: country code -> indices of records in that country
    country_code_to_records: HashMap<String, Vec<usize>>,

    /// Index: country name -> indices of records in that country
    country_name_to_records: HashMap<String, Vec<usize>>,

    /// Index: three-letter port code -> indices of records sharing the code
    port_code_to_records: HashMap<String, Vec<usize>>,
}

impl PortCatalog {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
            port_keys: Vec::with_capacity(capacity),
            locode_to_index: HashMap::with_capacity(capacity),
            port_name_to_records: HashMap::new(),
            port_names: Vec::new(),
            country_code_to_records: HashMap::new(),
            country_name_to_records: HashMap::new(),
            port_code_to_records: HashMap::new(),
        }
    }

    /// Load the embedded sample catalog
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded catalog fails validation.
    pub fn load_embedded() -> Result<Self, DatasetError> {
        // Validated at compile time by build.rs
        const EMBEDDED_CATALOG: &str = include_str!("../../catalogs/ports.json");
        Self::from_json(EMBEDDED_CATALOG)
    }

    /// Load catalog from a JSON file
    ///
    /// # Errors
    ///
    /// Returns `DatasetError::ReadError` if the file cannot be read, or any
    /// error from [`PortCatalog::from_json`].
    pub fn load_from_file(path: &Path) -> Result<Self, DatasetError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse catalog from a JSON array of port records
    ///
    /// # Errors
    ///
    /// Returns `DatasetError::ParseError` if the JSON is malformed or a record
    /// lacks a required field, and the errors of [`PortCatalog::from_records`].
    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        let records: Vec<PortRecord> = serde_json::from_str(json)?;
        Self::from_records(records)
    }

    /// Build the catalog and its indexes from records
    ///
    /// Either every record is accepted or construction fails; there is no
    /// partially loaded catalog. A repeated LOCODE resolves to its first record,
    /// while later records sharing it stay reachable by name and code.
    ///
    /// # Errors
    ///
    /// Returns `DatasetError::Empty` for an empty record list and
    /// `DatasetError::InvalidRecord` if a required field is blank.
    pub fn from_records(records: Vec<PortRecord>) -> Result<Self, DatasetError> {
        if records.is_empty() {
            return Err(DatasetError::Empty);
        }

        if let Some((index, field)) = records
            .iter()
            .enumerate()
            .find_map(|(i, r)| r.blank_required_field().map(|field| (i, field)))
        {
            return Err(DatasetError::InvalidRecord { index, field });
        }

        let mut catalog = Self::with_capacity(records.len());
        let mut duplicates = 0usize;
        for record in records {
            if !catalog.add_record(record) {
                duplicates += 1;
            }
        }

        debug!(records = catalog.len(), duplicates, "Loaded port catalog");

        Ok(catalog)
    }

    /// Add a record to every index. Returns false if its LOCODE was already present.
    ///
    /// A repeated LOCODE keeps pointing at the first record, but the new record
    /// is still filed under its port name, country and port code.
    fn add_record(&mut self, record: PortRecord) -> bool {
        let index = self.records.len();
        let locode = normalize(&record.locode);
        let first_seen = !self.locode_to_index.contains_key(&locode);
        if first_seen {
            self.locode_to_index.insert(locode, index);
        } else {
            warn!(locode = %locode, port = %record.port, "Duplicate LOCODE, keeping first record for code lookups");
        }

        let port_key = normalize(&record.port);
        match self.port_name_to_records.get_mut(&port_key) {
            Some(indices) => indices.push(index),
            None => {
                self.port_names.push(port_key.clone());
                self.port_name_to_records.insert(port_key.clone(), vec![index]);
            }
        }

        self.country_code_to_records
            .entry(normalize(&record.country_code))
            .or_default()
            .push(index);

        let country_key = normalize(&record.country);
        if !country_key.is_empty() {
            self.country_name_to_records
                .entry(country_key)
                .or_default()
                .push(index);
        }

        self.port_code_to_records
            .entry(normalize(&record.port_code))
            .or_default()
            .push(index);

        self.port_keys.push(port_key);
        self.records.push(record);
        first_seen
    }

    /// All records, in load order
    pub fn records(&self) -> &[PortRecord] {
        &self.records
    }

    /// Record at a position in load order
    pub fn record(&self, index: usize) -> &PortRecord {
        &self.records[index]
    }

    /// Uppercased port name of the record at `index`
    pub fn port_key(&self, index: usize) -> &str {
        &self.port_keys[index]
    }

    /// Get a record by LOCODE (case-insensitive)
    pub fn get(&self, locode: &str) -> Option<&PortRecord> {
        self.locode_to_index
            .get(&normalize(locode))
            .map(|&idx| &self.records[idx])
    }

    /// Indices of records with this exact port name (case-insensitive)
    pub fn indices_by_port_name(&self, name: &str) -> &[usize] {
        lookup(&self.port_name_to_records, name)
    }

    /// Indices of records in the country with this two-letter code
    pub fn indices_by_country_code(&self, code: &str) -> &[usize] {
        lookup(&self.country_code_to_records, code)
    }

    /// Indices of records in the country with this name
    pub fn indices_by_country_name(&self, name: &str) -> &[usize] {
        lookup(&self.country_name_to_records, name)
    }

    /// Indices of records sharing a three-letter port code
    pub fn indices_by_port_code(&self, code: &str) -> &[usize] {
        lookup(&self.port_code_to_records, code)
    }

    /// First record with this exact port name, in load order
    pub fn find_by_port_name(&self, name: &str) -> Option<&PortRecord> {
        self.indices_by_port_name(name)
            .first()
            .map(|&idx| &self.records[idx])
    }

    /// Records sharing a three-letter port code, in load order
    pub fn find_by_port_code(&self, code: &str) -> Vec<&PortRecord> {
        self.indices_by_port_code(code)
            .iter()
            .map(|&idx| &self.records[idx])
            .collect()
    }

    /// Records in a country, by code, in load order
    pub fn find_by_country_code(&self, code: &str) -> Vec<&PortRecord> {
        self.indices_by_country_code(code)
            .iter()
            .map(|&idx| &self.records[idx])
            .collect()
    }

    /// Distinct port names in first-seen order, each with its first record's index
    pub fn port_names(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.port_names.iter().map(|name| {
            let first = self.port_name_to_records[name][0];
            (name.as_str(), first)
        })
    }

    pub fn is_country_name(&self, name: &str) -> bool {
        self.country_name_to_records.contains_key(&normalize(name))
    }

    pub fn is_country_code(&self, code: &str) -> bool {
        self.country_code_to_records.contains_key(&normalize(code))
    }

    /// Resolve a country qualifier (a name or a two-letter code) to a country code
    ///
    /// Names take precedence: the code of the first record filed under that
    /// country name is returned.
    pub fn resolve_country_code(&self, qualifier: &str) -> Option<&str> {
        if let Some(&first) = self.indices_by_country_name(qualifier).first() {
            return Some(self.records[first].country_code.as_str());
        }
        let key = normalize(qualifier);
        self.country_code_to_records
            .get_key_value(&key)
            .map(|(code, _)| code.as_str())
    }

    /// Export catalog to JSON in the same format it is loaded from
    ///
    /// # Errors
    ///
    /// Returns `DatasetError::ParseError` if serialization fails.
    pub fn to_json(&self) -> Result<String, DatasetError> {
        Ok(serde_json::to_string_pretty(&self.records)?)
    }

    /// Number of records in catalog
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if catalog is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn lookup<'a>(index: &'a HashMap<String, Vec<usize>>, key: &str) -> &'a [usize] {
    index
        .get(&normalize(key))
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(cc: &str, pc: &str, port: &str, country: &str) -> PortRecord {
        PortRecord::new(cc, pc, port, country)
    }

    #[test]
    fn test_load_embedded_catalog() {
        let catalog = PortCatalog::load_embedded().unwrap();
        assert!(!catalog.is_empty());
        assert!(catalog.get("TRTUZ").is_some());
    }

    #[test]
    fn test_catalog_get_by_locode() {
        let catalog = PortCatalog::load_embedded().unwrap();

        let tuzla = catalog.get("trtuz").unwrap();
        assert_eq!(tuzla.port, "Tuzla");
        assert_eq!(tuzla.country, "Turkey");
        assert!(catalog.get("XXXXX").is_none());
    }

    #[test]
    fn test_port_name_index_preserves_insertion_order() {
        let catalog = PortCatalog::load_embedded().unwrap();

        let portlands: Vec<&str> = catalog
            .indices_by_port_name("portland")
            .iter()
            .map(|&i| catalog.record(i).locode.as_str())
            .collect();
        assert_eq!(portlands, vec!["USPDX", "AUPTJ"]);
        assert_eq!(catalog.find_by_port_name("PORTLAND").unwrap().locode, "USPDX");
    }

    #[test]
    fn test_port_code_index() {
        let catalog = PortCatalog::load_embedded().unwrap();

        let locodes: Vec<&str> = catalog
            .find_by_port_code("MAA")
            .iter()
            .map(|r| r.locode.as_str())
            .collect();
        assert_eq!(locodes, vec!["INMAA", "PGMAA"]);
        assert!(catalog.find_by_port_code("ZZZ").is_empty());
    }

    #[test]
    fn test_resolve_country_code() {
        let catalog = PortCatalog::load_embedded().unwrap();

        assert_eq!(catalog.resolve_country_code("Nigeria"), Some("NG"));
        assert_eq!(catalog.resolve_country_code("br"), Some("BR"));
        assert_eq!(catalog.resolve_country_code("ATLANTIS"), None);
        assert!(catalog.is_country_name("NETHERLANDS"));
        assert!(catalog.is_country_code("de"));
        assert!(!catalog.is_country_code("XX"));
    }

    #[test]
    fn test_port_names_first_seen_order() {
        let catalog = PortCatalog::from_records(vec![
            record("US", "PDX", "Portland", "United States"),
            record("NL", "RTM", "Rotterdam", "Netherlands"),
            record("AU", "PTJ", "Portland", "Australia"),
        ])
        .unwrap();

        let names: Vec<(&str, usize)> = catalog.port_names().collect();
        assert_eq!(names, vec![("PORTLAND", 0), ("ROTTERDAM", 1)]);
    }

    #[test]
    fn test_duplicate_locode_keeps_first() {
        let catalog = PortCatalog::from_records(vec![
            record("TR", "TUZ", "Tuzla", "Turkey"),
            record("TR", "TUZ", "Tuzla Shipyard", "Turkey"),
        ])
        .unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("TRTUZ").unwrap().port, "Tuzla");

        let shipyard = catalog.find_by_port_name("TUZLA SHIPYARD").unwrap();
        assert_eq!(shipyard.locode, "TRTUZ");
        assert_eq!(catalog.find_by_port_code("TUZ").len(), 2);
        assert_eq!(catalog.find_by_country_code("TR").len(), 2);
    }

    #[test]
    fn test_empty_catalog_is_an_error() {
        assert!(matches!(
            PortCatalog::from_records(Vec::new()),
            Err(DatasetError::Empty)
        ));
        assert!(matches!(
            PortCatalog::from_json("[]"),
            Err(DatasetError::Empty)
        ));
    }

    #[test]
    fn test_blank_required_field_is_an_error() {
        let result = PortCatalog::from_records(vec![
            record("TR", "TUZ", "Tuzla", "Turkey"),
            record("EG", "SUZ", "", "Egypt"),
        ]);
        assert!(matches!(
            result,
            Err(DatasetError::InvalidRecord {
                index: 1,
                field: "port"
            })
        ));
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(matches!(
            PortCatalog::from_json("{not json"),
            Err(DatasetError::ParseError(_))
        ));
        // Missing required field
        assert!(matches!(
            PortCatalog::from_json(r#"[{"locode":"TRTUZ","port":"Tuzla"}]"#),
            Err(DatasetError::ParseError(_))
        ));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = PortCatalog::load_from_file(Path::new("/nonexistent/ports.json"));
        assert!(matches!(result, Err(DatasetError::ReadError(_))));
    }

    #[test]
    fn test_catalog_to_json_round_trip() {
        let catalog = PortCatalog::load_embedded().unwrap();
        let json = catalog.to_json().unwrap();

        assert!(json.contains("\"locode\": \"TRTUZ\""));
        let reloaded = PortCatalog::from_json(&json).unwrap();
        assert_eq!(reloaded.len(), catalog.len());
        for (a, b) in reloaded.records().iter().zip(catalog.records()) {
            assert_eq!(a.locode, b.locode);
            assert_eq!(a.port, b.port);
            assert_eq!(a.lat.is_some(), b.lat.is_some());
        }
    }
}
