//! Builds a port catalog from the UN/LOCODE code list.
//!
//! The code list is published as CSV with one row per location. Only rows
//! marked as sea ports (a `1` in the `Function` column, when that column is
//! present) are kept. Country names come from a separate country-code table.
//!
//! Records carry only the catalog fields. No folded `port_norm` search key is
//! written, since the loader rebuilds its own normalized indexes.

use std::collections::{HashMap, HashSet};
use std::io::Read;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::core::port::PortRecord;
use crate::parsing::coordinates::parse_coordinates;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required column '{column}' in {input}")]
    MissingColumn { input: &'static str, column: &'static str },
}

/// A code-list row that could not become a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
    pub country: String,
    pub location: String,
    pub name: String,
}

/// Column positions within a header row
struct Columns {
    positions: HashMap<String, usize>,
}

impl Columns {
    fn new(headers: &csv::StringRecord) -> Self {
        let positions = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.trim().to_string(), i))
            .collect();
        Self { positions }
    }

    fn require(&self, input: &'static str, column: &'static str) -> Result<usize, BuildError> {
        self.positions
            .get(column)
            .copied()
            .ok_or(BuildError::MissingColumn { input, column })
    }

    fn optional(&self, column: &str) -> Option<usize> {
        self.positions.get(column).copied()
    }
}

fn field(row: &csv::StringRecord, position: usize) -> &str {
    row.get(position).map_or("", str::trim)
}

/// Collects port records from code-list CSV input
///
/// Records keep first-seen order; a LOCODE seen again is ignored.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    country_names: HashMap<String, String>,
    records: Vec<PortRecord>,
    seen: HashSet<String>,
    skipped: Vec<SkippedRow>,
    non_seaports: usize,
    duplicates: usize,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the country-code table (`CountryCode`, `CountryName`)
    ///
    /// # Errors
    ///
    /// Returns an error if the CSV is malformed or a column is missing.
    pub fn add_country_codes<R: Read>(&mut self, reader: R) -> Result<usize, BuildError> {
        const INPUT: &str = "country codes";

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);
        let columns = Columns::new(reader.headers()?);
        let code_col = columns.require(INPUT, "CountryCode")?;
        let name_col = columns.require(INPUT, "CountryName")?;

        let mut added = 0;
        for row in reader.records() {
            let row = row?;
            let code = field(&row, code_col).to_uppercase();
            if code.is_empty() {
                continue;
            }
            self.country_names
                .insert(code, field(&row, name_col).to_string());
            added += 1;
        }

        debug!(countries = added, "Loaded country codes");
        Ok(added)
    }

    /// Add rows from a UN/LOCODE code list
    ///
    /// Requires `Country`, `Location`, `Name` and `Coordinates` columns. A
    /// `Function` column, when present, restricts the rows to sea ports.
    ///
    /// # Errors
    ///
    /// Returns an error if the CSV is malformed or a column is missing.
    pub fn add_code_list<R: Read>(&mut self, reader: R) -> Result<usize, BuildError> {
        const INPUT: &str = "code list";

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);
        let columns = Columns::new(reader.headers()?);
        let country_col = columns.require(INPUT, "Country")?;
        let location_col = columns.require(INPUT, "Location")?;
        let name_col = columns.require(INPUT, "Name")?;
        let coordinates_col = columns.require(INPUT, "Coordinates")?;
        let function_col = columns.optional("Function");

        let before = self.records.len();
        for row in reader.records() {
            let row = row?;

            if let Some(col) = function_col {
                if !field(&row, col).contains('1') {
                    self.non_seaports += 1;
                    continue;
                }
            }

            let country_code = field(&row, country_col).to_uppercase();
            let port_code = field(&row, location_col).to_uppercase();
            let name = field(&row, name_col);

            if country_code.is_empty() || port_code.is_empty() || name.is_empty() {
                self.skipped.push(SkippedRow {
                    country: country_code,
                    location: port_code,
                    name: name.to_string(),
                });
                continue;
            }

            let locode = format!("{country_code}{port_code}");
            if !self.seen.insert(locode) {
                self.duplicates += 1;
                continue;
            }

            let country = self
                .country_names
                .get(&country_code)
                .cloned()
                .unwrap_or_default();
            let (lat, lon) = parse_coordinates(field(&row, coordinates_col));

            // No `port_norm`: search keys are derived at load time.
            self.records.push(
                PortRecord::new(country_code, port_code, name, country).with_coordinates(lat, lon),
            );
        }

        let added = self.records.len() - before;
        debug!(added, total = self.records.len(), "Processed code list");
        Ok(added)
    }

    /// Convenience wrapper reading both inputs from disk
    ///
    /// # Errors
    ///
    /// Returns an error if either file cannot be read or parsed.
    pub fn from_files(code_list: &Path, country_codes: &Path) -> Result<Self, BuildError> {
        let mut builder = Self::new();
        builder.add_country_codes(std::fs::File::open(country_codes)?)?;
        builder.add_code_list(std::fs::File::open(code_list)?)?;
        Ok(builder)
    }

    #[must_use]
    pub fn summary(&self) -> BuildSummary {
        BuildSummary {
            records: self.records.len(),
            with_coordinates: self
                .records
                .iter()
                .filter(|r| r.lat.is_some() && r.lon.is_some())
                .count(),
            without_country_name: self.records.iter().filter(|r| r.country.is_empty()).count(),
            skipped: self.skipped.len(),
            non_seaports: self.non_seaports,
            duplicates: self.duplicates,
        }
    }

    /// Finish building, returning the records and the skipped rows
    #[must_use]
    pub fn finish(self) -> (Vec<PortRecord>, Vec<SkippedRow>) {
        (self.records, self.skipped)
    }
}

/// Counts describing a finished build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildSummary {
    pub records: usize,
    pub with_coordinates: usize,
    pub without_country_name: usize,
    pub skipped: usize,
    pub non_seaports: usize,
    pub duplicates: usize,
}

impl std::fmt::Display for BuildSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Catalog Build Summary")?;
        writeln!(f, "=====================")?;
        writeln!(f, "Port records:        {}", self.records)?;
        writeln!(f, "  - with coordinates:   {}", self.with_coordinates)?;
        writeln!(f, "  - no country name:    {}", self.without_country_name)?;
        writeln!(f, "Skipped (no code):   {}", self.skipped)?;
        writeln!(f, "Not a sea port:      {}", self.non_seaports)?;
        write!(f, "Duplicate LOCODEs:   {}", self.duplicates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COUNTRIES: &str = "CountryCode,CountryName\nTR,Turkey\nEG,Egypt\n";

    fn builder() -> CatalogBuilder {
        let mut builder = CatalogBuilder::new();
        builder.add_country_codes(COUNTRIES.as_bytes()).unwrap();
        builder
    }

    #[test]
    fn test_build_records() {
        let mut builder = builder();
        let code_list = "\
Country,Location,Name,Coordinates
TR,TUZ,Tuzla,4049N 02918E
eg,suz, Suez ,2958N 03233E
";
        assert_eq!(builder.add_code_list(code_list.as_bytes()).unwrap(), 2);

        let (records, skipped) = builder.finish();
        assert!(skipped.is_empty());
        assert_eq!(records[0].locode, "TRTUZ");
        assert_eq!(records[0].country, "Turkey");
        assert_eq!(records[1].locode, "EGSUZ");
        assert_eq!(records[1].port, "Suez");
        assert_eq!(records[1].port_code, "SUZ");
        assert!((records[0].lat.unwrap() - (40.0 + 49.0 / 60.0)).abs() < 1e-9);
    }

    #[test]
    fn test_skips_and_duplicates() {
        let mut builder = builder();
        let code_list = "\
Country,Location,Name,Coordinates
TR,TUZ,Tuzla,4049N 02918E
TR,,Nowhere,
TR,TUZ,Tuzla again,
XX,ABC,Unknown country,bad
TR,IST,,4100N 02858E
";
        builder.add_code_list(code_list.as_bytes()).unwrap();

        let summary = builder.summary();
        assert_eq!(summary.records, 2);
        assert_eq!(summary.skipped, 2);
        assert_eq!(summary.duplicates, 1);
        assert_eq!(summary.without_country_name, 1);
        assert_eq!(summary.with_coordinates, 1);

        let (records, skipped) = builder.finish();
        assert_eq!(records[0].port, "Tuzla");
        assert_eq!(records[1].country, "");
        assert_eq!(records[1].lat, None);
        assert_eq!(skipped[0].name, "Nowhere");
        assert_eq!(skipped[1].location, "IST");
    }

    #[test]
    fn test_function_column_keeps_sea_ports() {
        let mut builder = builder();
        let code_list = "\
Country,Location,Name,Function,Coordinates
TR,TUZ,Tuzla,1-3-----,4049N 02918E
TR,ANK,Ankara,--3-----,3955N 03250E
";
        builder.add_code_list(code_list.as_bytes()).unwrap();

        assert_eq!(builder.summary().non_seaports, 1);
        let (records, _) = builder.finish();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].locode, "TRTUZ");
    }

    #[test]
    fn test_records_hold_catalog_fields_only() {
        let mut builder = builder();
        builder
            .add_code_list("Country,Location,Name,Coordinates
TR,TUZ,Tuzla,4049N 02918E
".as_bytes())
            .unwrap();
        let (records, _) = builder.finish();

        let json = serde_json::to_value(&records).unwrap();
        let fields: Vec<&str> = json[0]
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert!(!fields.contains(&"port_norm"));
        assert!(!fields.contains(&"portNorm"));
        for expected in ["locode", "portCode", "port", "countryCode", "country", "lat", "lon"] {
            assert!(fields.contains(&expected), "missing {expected}");
        }
    }

    #[test]
    fn test_missing_column() {
        let mut builder = builder();
        let err = builder
            .add_code_list("Country,Name\nTR,Tuzla\n".as_bytes())
            .unwrap_err();
        assert!(matches!(
            err,
            BuildError::MissingColumn { column: "Location", .. }
        ));
    }
}
