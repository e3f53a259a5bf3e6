use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use clap::Args;

use crate::cli::{load_catalog, OutputFormat};
use crate::core::types::MatchStage;
use crate::matching::engine::{
    MatchingConfig, MatchingEngine, DEFAULT_COUNTRY_FALLBACK_THRESHOLD, DEFAULT_COUNTRY_THRESHOLD,
    DEFAULT_GLOBAL_FALLBACK_THRESHOLD, DEFAULT_GLOBAL_THRESHOLD,
};
use crate::matching::result::{MatchResult, Resolution};
use crate::utils::validation::validate_threshold;

#[derive(Args)]
pub struct ResolveArgs {
    /// Destination strings as reported over AIS
    #[arg(required_unless_present = "input", conflicts_with = "input")]
    pub destinations: Vec<String>,

    /// Read destinations from a file, one per line. Use '-' for stdin
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Path to custom catalog file
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Strict similarity threshold within a named country
    #[arg(long, default_value_t = DEFAULT_COUNTRY_THRESHOLD, value_parser = parse_threshold)]
    pub country_threshold: f64,

    /// Relaxed similarity threshold within a named country
    #[arg(long, default_value_t = DEFAULT_COUNTRY_FALLBACK_THRESHOLD, value_parser = parse_threshold)]
    pub country_fallback_threshold: f64,

    /// Strict similarity threshold over all ports
    #[arg(long, default_value_t = DEFAULT_GLOBAL_THRESHOLD, value_parser = parse_threshold)]
    pub global_threshold: f64,

    /// Relaxed similarity threshold over all ports
    #[arg(long, default_value_t = DEFAULT_GLOBAL_FALLBACK_THRESHOLD, value_parser = parse_threshold)]
    pub global_fallback_threshold: f64,
}

fn parse_threshold(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|_| format!("'{s}' is not a number"))?;
    validate_threshold("threshold", value).map_err(|e| e.to_string())
}

impl ResolveArgs {
    fn config(&self) -> MatchingConfig {
        MatchingConfig {
            country_threshold: self.country_threshold,
            country_fallback_threshold: self.country_fallback_threshold,
            global_threshold: self.global_threshold,
            global_fallback_threshold: self.global_fallback_threshold,
            ..MatchingConfig::default()
        }
    }
}

/// Execute resolve subcommand
///
/// # Errors
///
/// Returns an error if the catalog or input cannot be read, or the thresholds
/// are inconsistent.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: ResolveArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let config = args.config();
    config.validate()?;

    let catalog = load_catalog(args.catalog.as_deref(), verbose)?;
    let engine = MatchingEngine::with_config(&catalog, config);

    let destinations = match &args.input {
        Some(path) => read_destinations(path)?,
        None => args.destinations.clone(),
    };

    if verbose {
        let config = engine.config();
        eprintln!(
            "Resolving {} destinations (thresholds: country {}/{}, global {}/{})",
            destinations.len(),
            config.country_threshold,
            config.country_fallback_threshold,
            config.global_threshold,
            config.global_fallback_threshold
        );
    }

    let resolutions: Vec<Resolution> = destinations.iter().map(|d| engine.resolve(d)).collect();

    match format {
        OutputFormat::Text => print_text_results(&resolutions),
        OutputFormat::Json => print_json_results(&resolutions)?,
        OutputFormat::Tsv => print_tsv_results(&resolutions),
    }

    Ok(())
}

/// Non-blank lines of a file, or of stdin for '-'
fn read_destinations(path: &Path) -> anyhow::Result<Vec<String>> {
    let lines: Vec<String> = if path.to_string_lossy() == "-" {
        io::stdin().lock().lines().collect::<Result<_, _>>()?
    } else {
        std::fs::read_to_string(path)?
            .lines()
            .map(str::to_string)
            .collect()
    };

    Ok(lines
        .into_iter()
        .filter(|line| !line.trim().is_empty())
        .collect())
}

/// One line per destination; fuzzy matches are marked with `~>` instead of `=>`
fn print_text_results(resolutions: &[Resolution]) {
    for resolution in resolutions {
        let input = resolution.result.reported_destination();
        let stage = resolution
            .stage
            .map(|s| format!(" [{s}]"))
            .unwrap_or_default();
        let arrow = if resolution.stage.is_some_and(MatchStage::is_fuzzy) {
            "~>"
        } else {
            "=>"
        };

        match &resolution.result {
            MatchResult::Matched(m) => {
                println!("{input:?} {arrow} {} {}, {}{stage}", m.locode, m.port, m.country);
            }
            MatchResult::MatchedMany(list) => {
                println!("{input:?} {arrow} {} ports share this code{stage}", list.len());
                for m in list {
                    println!("    {} {}, {}", m.locode, m.port, m.country);
                }
            }
            MatchResult::Unmatched { .. } => println!("{input:?} => no match"),
        }
    }
}

fn print_json_results(resolutions: &[Resolution]) -> anyhow::Result<()> {
    // A single destination prints the bare result body
    let json = match resolutions {
        [single] => serde_json::to_string_pretty(&single.result)?,
        _ => {
            let results: Vec<&MatchResult> = resolutions.iter().map(|r| &r.result).collect();
            serde_json::to_string_pretty(&results)?
        }
    };
    println!("{json}");
    Ok(())
}

fn print_tsv_results(resolutions: &[Resolution]) {
    println!("reported_destination\tmatched\tstage\tlocode\tport\tcountry\tlat\tlon");

    let coordinate = |value: Option<f64>| value.map(|v| v.to_string()).unwrap_or_default();

    for resolution in resolutions {
        let input = tsv_field(resolution.result.reported_destination());
        let stage = resolution.stage.map(|s| s.to_string()).unwrap_or_default();

        if resolution.result.matches().is_empty() {
            println!("{input}\tfalse\t\t\t\t\t\t");
            continue;
        }
        for m in resolution.result.matches() {
            println!(
                "{input}\ttrue\t{stage}\t{}\t{}\t{}\t{}\t{}",
                m.locode,
                tsv_field(&m.port),
                tsv_field(&m.country),
                coordinate(m.lat),
                coordinate(m.lon)
            );
        }
    }
}

fn tsv_field(value: &str) -> String {
    value.replace(['\t', '\n', '\r'], " ")
}
