use clap::Parser;
use prop_search::config::Settings;
use prop_search::models::{FacetSelection, Property, SearchOutcome};
use prop_search::services::{
    Catalog, CatalogError, CatalogSnapshot, MemoryLocationStore, RecentLocations,
};
use prop_search::SearchEngine;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;
use std::process;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Search eligible property listings from a catalog snapshot
#[derive(Debug, Parser)]
#[command(name = "prop-search")]
#[command(about = "Free-text and facet search over property listings", long_about = None)]
#[command(version)]
struct Args {
    /// Catalog snapshot (JSON); defaults to catalog.snapshot_path
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Facet selection as a JSON object
    #[arg(long, value_parser = parse_facets)]
    facets: Option<FacetSelection>,

    /// Location picked in the header
    #[arg(long)]
    location: Option<String>,

    /// Query words
    query: Vec<String>,
}

impl Args {
    fn query(&self) -> String {
        self.query.join(" ")
    }
}

fn parse_facets(raw: &str) -> Result<FacetSelection, String> {
    serde_json::from_str(raw).map_err(|e| format!("invalid facet JSON: {}", e))
}

/// Trailing summary line
#[derive(Debug, Serialize)]
struct Summary<'a> {
    query: &'a str,
    location: &'a str,
    count: usize,
    outcome: &'a SearchOutcome,
}

fn init_logging(settings: &Settings) {
    // Environment overrides the config file, like the rest of the settings
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| settings.logging.level.clone());
    let log_format =
        std::env::var("LOG_FORMAT").unwrap_or_else(|_| settings.logging.format.clone());

    let filter = EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    // stdout carries results, so logs go to stderr
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }
}

fn main() {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            process::exit(1);
        }
    };

    init_logging(&settings);

    let args = Args::parse();

    let Some(path) = args.snapshot.clone().or_else(|| settings.catalog.snapshot_path.clone()) else {
        error!("No snapshot given; pass --snapshot or set catalog.snapshot_path");
        process::exit(2);
    };

    let catalog = Catalog::new();
    let snapshot = File::open(&path)
        .map_err(CatalogError::from)
        .and_then(|file| CatalogSnapshot::from_reader(BufReader::new(file)));

    match snapshot {
        Ok(snapshot) => {
            let count = catalog.load_snapshot(snapshot);
            info!("Loaded {} eligible listings from {}", count, path.display());
        }
        Err(e) => {
            error!("Failed to load snapshot {}: {}", path.display(), e);
            process::exit(1);
        }
    }

    let mut recent = RecentLocations::load(MemoryLocationStore::default(), &settings.recent);
    if let Some(location) = &args.location {
        if let Err(e) = recent.record(location) {
            error!("{}", e);
        }
    }

    let engine = SearchEngine::new(&settings.search);
    let candidates = catalog.snapshot();
    let query = args.query();
    let facets = args.facets.unwrap_or_default();
    let output = engine.search(&candidates, &query, &facets);

    let summary = Summary {
        query: &query,
        location: recent.current(),
        count: output.len(),
        outcome: &output.outcome,
    };

    if let Err(e) = print_output(&output.properties, &summary) {
        error!("Failed to write results: {}", e);
        process::exit(1);
    }
}

fn print_output(properties: &[&Property], summary: &Summary<'_>) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for property in properties {
        tracing::debug!(
            "{} {}",
            property.property_id,
            property.display_title().unwrap_or("(untitled)")
        );
        serde_json::to_writer(&mut out, property)?;
        writeln!(out)?;
    }
    serde_json::to_writer(&mut out, summary)?;
    writeln!(out)?;
    out.flush()
}
