//! Port reference data: storage, lookup indexes and dataset building.
//!
//! A [`store::PortCatalog`] holds UN/LOCODE port records in load order with
//! side indexes by LOCODE, port name, country and port code. A small sample
//! catalog is compiled into the binary; full catalogs can be loaded from JSON
//! files in the same format, or built from the UN/LOCODE CSV code list with
//! [`builder::CatalogBuilder`].
//!
//! ## Example
//!
//! ```rust
//! use port_resolver::PortCatalog;
//!
//! let catalog = PortCatalog::load_embedded().unwrap();
//!
//! let tuzla = catalog.get("TRTUZ").unwrap();
//! assert_eq!(tuzla.port, "Tuzla");
//!
//! // Port codes are not unique across countries
//! assert_eq!(catalog.find_by_port_code("MAA").len(), 2);
//! ```
//!
//! ## Custom Catalogs
//!
//! ```rust,no_run
//! use port_resolver::PortCatalog;
//! use std::path::Path;
//!
//! let catalog = PortCatalog::load_embedded().unwrap();
//! let json = catalog.to_json().unwrap();
//!
//! let custom = PortCatalog::load_from_file(Path::new("my_ports.json")).unwrap();
//! ```

pub mod builder;
pub mod index;
pub mod store;
