//! Destination resolution pipeline and similarity scoring.
//!
//! - [`MatchingEngine`]: resolves a raw destination string to a port
//! - [`MatchResult`]: one port, several ports sharing a code, or no match
//! - [`scoring`]: the Ratcliff/Obershelp ratio behind every fuzzy tier
//!
//! ## Resolution order
//!
//! Exact identity always outranks similarity:
//!
//! 1. Placeholder destinations ("TBA", "FOR ORDERS") are rejected
//! 2. Routes keep only their last leg, then noise words and symbols are removed
//! 3. Exact port name
//! 4. Exact port name within a country named in the text
//! 5. LOCODE
//! 6. Fuzzy match within that country, strict then relaxed threshold
//! 7. Partial name (either string contains the other)
//! 8. Fuzzy match over all ports, strict threshold
//! 9. Bare three-letter port code, possibly matching several countries
//! 10. Fuzzy match over all ports, relaxed threshold
//!
//! ## Example
//!
//! ```rust
//! use port_resolver::{MatchResult, MatchingEngine, PortCatalog};
//!
//! let catalog = PortCatalog::load_embedded().unwrap();
//! let engine = MatchingEngine::new(&catalog);
//!
//! match engine.match_destination("EGSUZ -> TRTUZ") {
//!     MatchResult::Matched(m) => assert_eq!(m.locode, "TRTUZ"),
//!     other => panic!("unexpected {other:?}"),
//! }
//! ```

pub mod engine;
pub mod result;
pub mod scoring;

pub use engine::{MatchingConfig, MatchingEngine};
pub use result::{MatchResult, PortMatch, Resolution};
