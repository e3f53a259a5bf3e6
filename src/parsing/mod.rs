//! Text processing for raw AIS destination strings.
//!
//! This module provides:
//!
//! - **Normalization**: case folding, bracket and symbol stripping, noise-word removal
//! - **Route extraction**: picking the final leg out of `"FROM -> TO"` style routes
//! - **Country extraction**: splitting `"PORT, COUNTRY"` into its two parts
//! - **Coordinates**: decoding UN/LOCODE `DDMMH DDDMMH` positions
//!
//! ## Example
//!
//! ```rust
//! use port_resolver::parsing::normalize::TextNormalizer;
//!
//! let normalizer = TextNormalizer::new();
//! let leg = normalizer.extract_route_destination("EGSUZ -> TRTUZ (ANCHORAGE)");
//! assert_eq!(normalizer.remove_noise(leg), "TRTUZ");
//! ```
//!
//! ## Noise handling
//!
//! | Input                  | Cleaned      |
//! |------------------------|--------------|
//! | `GIBRALTAR EAST ANCH`  | `GIBRALTAR`  |
//! | `SG SIN (ANCHORAGE)`   | `SG SIN`     |
//! | `HOUSTON_USA`          | `HOUSTON USA`|
//! | `AEFJR FOR ORDERS`     | `AEFJR`      |

pub mod coordinates;
pub mod country;
pub mod normalize;
