//! Core data types for destination resolution.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`PortRecord`]: A single UN/LOCODE port entry from the reference table
//! - [`MatchStage`]: Which step of the resolution pipeline produced a match
//!
//! ## LOCODE structure
//!
//! A UN/LOCODE is five letters: a two-letter ISO 3166 country code followed by
//! a three-letter location code.
//!
//! | LOCODE | Country code | Port code | Port      |
//! |--------|--------------|-----------|-----------|
//! | TRTUZ  | TR           | TUZ       | Tuzla     |
//! | SGSIN  | SG           | SIN       | Singapore |
//! | INMAA  | IN           | MAA       | Chennai   |
//!
//! Port codes are only unique within a country, so a bare three-letter code may
//! refer to several ports.
//!
//! [`PortRecord`]: port::PortRecord
//! [`MatchStage`]: types::MatchStage

pub mod port;
pub mod types;
