//! # port-resolver
//!
//! A library for resolving free-text AIS vessel destinations to UN/LOCODE ports.
//!
//! The destination field broadcast by AIS transponders is typed by hand on the
//! bridge. It may hold a LOCODE ("TRTUZ"), a port name with or without a
//! country ("LAGOS NIGERIA"), a whole route ("EGSUZ -> TRTUZ"), a misspelling
//! ("SINGAPROE"), or a placeholder such as "TBA" or "FOR ORDERS".
//!
//! `port-resolver` cleans the text and works through exact lookups before
//! falling back to fuzzy name matching with descending thresholds.
//!
//! ## Example
//!
//! ```rust
//! use port_resolver::{MatchResult, MatchingEngine, PortCatalog};
//!
//! // Load the embedded sample catalog
//! let catalog = PortCatalog::load_embedded().unwrap();
//! let engine = MatchingEngine::new(&catalog);
//!
//! let result = engine.match_destination("LAGOS NIGERIA");
//! if let MatchResult::Matched(port) = &result {
//!     assert_eq!(port.locode, "NGLOS");
//! }
//!
//! // Results serialize to the JSON response body
//! let json = serde_json::to_string(&engine.match_destination("TBA")).unwrap();
//! assert_eq!(json, r#"{"reportedDestination":"TBA","matched":false}"#);
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: Port catalog storage, indexing and dataset building
//! - [`core`]: Core data types for port records and match stages
//! - [`matching`]: Resolution pipeline and similarity scoring
//! - [`parsing`]: Destination text cleanup, country extraction, coordinates
//! - [`cli`]: Command-line interface implementation

pub mod catalog;
pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use crate::catalog::store::{DatasetError, PortCatalog};
pub use crate::core::port::PortRecord;
pub use crate::core::types::*;
pub use crate::matching::engine::{MatchingConfig, MatchingEngine};
pub use crate::matching::result::{MatchResult, PortMatch, Resolution};
