//! Command-line interface for port-resolver.
//!
//! Available commands:
//!
//! - **resolve**: Resolve AIS destination strings to UN/LOCODE ports
//! - **catalog**: List, show, export or build port catalogs
//!
//! ## Usage
//!
//! ```text
//! # Resolve a single destination
//! port-resolver resolve "EGSUZ -> TRTUZ"
//!
//! # Resolve one destination per line from stdin, as JSON
//! cat destinations.txt | port-resolver --format json resolve --input -
//!
//! # Build a catalog from the UN/LOCODE code list
//! port-resolver catalog build --code-list code-list.csv --country-codes country-codes.csv -o ports.json
//! ```

use std::path::Path;

use clap::{Parser, Subcommand};

use crate::catalog::store::PortCatalog;

pub mod catalog;
pub mod resolve;

#[derive(Parser)]
#[command(name = "port-resolver")]
#[command(version)]
#[command(about = "Resolve free-text AIS vessel destinations to UN/LOCODE ports")]
#[command(
    long_about = "port-resolver interprets the free-text destination field broadcast by AIS transponders.\n\nIt strips route legs, placeholders and noise words, then matches what remains against a UN/LOCODE port catalog by port name, LOCODE, country-qualified name, or fuzzy similarity."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve destination strings to ports
    Resolve(resolve::ResolveArgs),

    /// Manage the port catalog
    Catalog(catalog::CatalogArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Load a catalog from `path`, or the embedded sample catalog
pub(crate) fn load_catalog(path: Option<&Path>, verbose: bool) -> anyhow::Result<PortCatalog> {
    let catalog = match path {
        Some(path) => PortCatalog::load_from_file(path)?,
        None => PortCatalog::load_embedded()?,
    };

    if verbose {
        eprintln!("Loaded catalog with {} ports", catalog.len());
    }

    Ok(catalog)
}
