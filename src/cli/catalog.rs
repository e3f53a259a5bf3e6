use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::catalog::builder::CatalogBuilder;
use crate::catalog::store::PortCatalog;
use crate::cli::{load_catalog, OutputFormat};
use crate::core::port::PortRecord;

#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommands,
}

#[derive(Subcommand)]
pub enum CatalogCommands {
    /// List ports in the catalog
    List {
        /// Path to custom catalog file
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Only list ports in this country (two-letter code)
        #[arg(long)]
        country: Option<String>,
    },

    /// Show details of a specific port
    Show {
        /// UN/LOCODE, e.g. "TRTUZ"
        #[arg(required = true)]
        locode: String,

        /// Path to custom catalog file
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Export the catalog to a file
    Export {
        /// Output file path
        #[arg(required = true)]
        output: PathBuf,

        /// Path to custom catalog file to export (defaults to embedded)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Build a catalog from the UN/LOCODE code list
    Build {
        /// UN/LOCODE code list CSV (Country, Location, Name, Coordinates, optional Function)
        #[arg(long, required = true)]
        code_list: PathBuf,

        /// Country code CSV (CountryCode, CountryName)
        #[arg(long, required = true)]
        country_codes: PathBuf,

        /// Output file (JSON). If not specified, prints to stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write rows that had no country code, location code or name to this file (JSON)
        #[arg(long)]
        skipped: Option<PathBuf>,
    },
}

/// Execute catalog subcommand
///
/// # Errors
///
/// Returns an error if a catalog or input file cannot be read or written.
pub fn run(args: CatalogArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    match args.command {
        CatalogCommands::List { catalog, country } => {
            run_list(catalog, country.as_deref(), format, verbose)
        }
        CatalogCommands::Show { locode, catalog } => run_show(&locode, catalog, format),
        CatalogCommands::Export { output, catalog } => run_export(output, catalog, verbose),
        CatalogCommands::Build {
            code_list,
            country_codes,
            output,
            skipped,
        } => run_build(code_list, country_codes, output, skipped, verbose),
    }
}

#[allow(clippy::needless_pass_by_value)]
fn run_list(
    catalog_path: Option<PathBuf>,
    country: Option<&str>,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    let catalog = load_catalog(catalog_path.as_deref(), verbose)?;

    let ports: Vec<&PortRecord> = match country {
        Some(code) => catalog.find_by_country_code(code),
        None => catalog.records().iter().collect(),
    };

    match format {
        OutputFormat::Text => {
            let port_width = ports
                .iter()
                .map(|p| p.port.chars().count())
                .max()
                .unwrap_or(4)
                .max(4);
            let country_width = ports
                .iter()
                .map(|p| p.country.chars().count().min(30))
                .max()
                .unwrap_or(7)
                .max(7);

            println!("Port Catalog ({} ports)\n", ports.len());
            println!(
                "{:<6} {:<port_w$} {:<country_w$} Coordinates",
                "LOCODE",
                "Port",
                "Country",
                port_w = port_width,
                country_w = country_width
            );
            println!("{}", "-".repeat(6 + port_width + country_width + 15));

            for port in &ports {
                println!(
                    "{:<6} {:<port_w$} {:<country_w$} {}",
                    port.locode,
                    port.port,
                    truncate(&port.country, 30),
                    port.coordinates_display(),
                    port_w = port_width,
                    country_w = country_width
                );
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&ports)?);
        }
        OutputFormat::Tsv => {
            println!("locode\tport_code\tport\tcountry_code\tcountry\tlat\tlon");
            for port in &ports {
                println!(
                    "{}\t{}\t{}\t{}\t{}\t{}\t{}",
                    port.locode,
                    port.port_code,
                    port.port,
                    port.country_code,
                    port.country,
                    port.lat.map(|v| v.to_string()).unwrap_or_default(),
                    port.lon.map(|v| v.to_string()).unwrap_or_default()
                );
            }
        }
    }

    Ok(())
}

#[allow(clippy::needless_pass_by_value)]
fn run_show(locode: &str, catalog_path: Option<PathBuf>, format: OutputFormat) -> anyhow::Result<()> {
    let catalog = load_catalog(catalog_path.as_deref(), false)?;

    let port = catalog
        .get(locode)
        .ok_or_else(|| anyhow::anyhow!("Port not found: {locode}"))?;

    match format {
        OutputFormat::Text => {
            println!("{} ({})", port.port, port.locode);
            println!("{}", "=".repeat(port.port.chars().count() + port.locode.len() + 3));
            println!("Country:     {} ({})", port.country, port.country_code);
            println!("Port code:   {}", port.port_code);
            println!("Coordinates: {}", port.coordinates_display());

            let shared = catalog.find_by_port_code(&port.port_code);
            if shared.len() > 1 {
                println!("\nPort code {} is also used by:", port.port_code);
                for other in shared.iter().filter(|p| p.locode != port.locode) {
                    println!("  {} {}, {}", other.locode, other.port, other.country);
                }
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(port)?);
        }
        OutputFormat::Tsv => {
            println!("field\tvalue");
            println!("locode\t{}", port.locode);
            println!("port_code\t{}", port.port_code);
            println!("port\t{}", port.port);
            println!("country_code\t{}", port.country_code);
            println!("country\t{}", port.country);
            println!("lat\t{}", port.lat.map(|v| v.to_string()).unwrap_or_default());
            println!("lon\t{}", port.lon.map(|v| v.to_string()).unwrap_or_default());
        }
    }

    Ok(())
}

#[allow(clippy::needless_pass_by_value)]
fn run_export(output: PathBuf, catalog_path: Option<PathBuf>, verbose: bool) -> anyhow::Result<()> {
    let catalog = load_catalog(catalog_path.as_deref(), verbose)?;

    let json = catalog.to_json()?;
    std::fs::write(&output, json)?;

    println!("Exported {} ports to {}", catalog.len(), output.display());

    Ok(())
}

#[allow(clippy::needless_pass_by_value)]
fn run_build(
    code_list: PathBuf,
    country_codes: PathBuf,
    output: Option<PathBuf>,
    skipped_output: Option<PathBuf>,
    verbose: bool,
) -> anyhow::Result<()> {
    let builder = CatalogBuilder::from_files(&code_list, &country_codes)?;
    let summary = builder.summary();
    let (records, skipped) = builder.finish();

    // Loading the records back checks they form a usable catalog
    let catalog = PortCatalog::from_records(records)?;
    let json = catalog.to_json()?;

    if let Some(path) = &skipped_output {
        std::fs::write(path, serde_json::to_string_pretty(&skipped)?)?;
        eprintln!("Wrote {} skipped rows to {}", skipped.len(), path.display());
    }

    match &output {
        Some(path) => {
            std::fs::write(path, json)?;
            eprintln!("Wrote {} ports to {}", catalog.len(), path.display());
        }
        None => println!("{json}"),
    }

    if verbose {
        eprintln!("\n{summary}");
    }

    Ok(())
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
