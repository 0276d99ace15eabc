use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use chrono_tz::Tz;
use clap::{Parser, ValueEnum};
use log::LevelFilter;

use nadir::distance::EARTH_RADIUS_KM;
use nadir::loader::DEFAULT_DATE_FORMAT;
use nadir::logging::init_logger;
use nadir::{
    BuiltinCatalog, CatalogSource, Config, GeoPoint, Nearest, RecordFormat, ResolveError, Resolver,
};

/// Report the nearest place to a position, as of a date.
#[derive(Parser, Debug)]
#[command(name = "nadir", version, about, allow_negative_numbers = true)]
struct Cli {
    /// Latitude in decimal degrees
    latitude: f64,

    /// Longitude in decimal degrees
    longitude: f64,

    /// Evaluate eligibility on this date (YYYY-MM-DD) instead of today
    #[arg(long, value_parser = parse_as_of)]
    as_of: Option<NaiveDate>,

    /// Built-in catalog to use
    #[arg(long, value_enum, conflicts_with_all = ["records", "snapshot"])]
    catalog: Option<BuiltinCatalog>,

    /// CSV record file (name, valid_from, id, latitude, longitude)
    #[arg(long, conflicts_with = "snapshot")]
    records: Option<PathBuf>,

    /// Binary snapshot written by build-catalog
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// chrono format of the valid_from column in record files
    #[arg(long, default_value = DEFAULT_DATE_FORMAT)]
    date_format: String,

    /// Record file has no header row
    #[arg(long)]
    no_headers: bool,

    /// IANA timezone used to decide "today"
    #[arg(long, env = "NADIR_TIMEZONE", value_parser = parse_timezone)]
    timezone: Option<Tz>,

    /// Sphere radius in kilometers
    #[arg(long, default_value_t = EARTH_RADIUS_KM)]
    radius: f64,

    /// List every eligible place, nearest first
    #[arg(long)]
    list: bool,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

impl Cli {
    fn config(&self) -> Config {
        let catalog = match (&self.records, &self.snapshot) {
            (Some(path), _) => CatalogSource::Records(path.clone()),
            (None, Some(path)) => CatalogSource::Snapshot(path.clone()),
            (None, None) => CatalogSource::Builtin(self.catalog.unwrap_or_default()),
        };

        Config {
            catalog,
            timezone: self.timezone,
            earth_radius_km: self.radius,
            record_format: RecordFormat {
                date_format: self.date_format.clone(),
                has_headers: !self.no_headers,
            },
        }
    }
}

fn parse_as_of(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, DEFAULT_DATE_FORMAT)
        .map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}

fn parse_timezone(value: &str) -> Result<Tz, String> {
    value.parse::<Tz>().map_err(|e| e.to_string())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.log_level.into()).context("Failed to initialize logger")?;

    let query = GeoPoint::new(cli.latitude, cli.longitude)?;
    let resolver = Resolver::from_config(&cli.config()).context("Failed to load catalog")?;

    if cli.list {
        let ranked = resolver.ranked(query, cli.as_of);
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&ranked)?);
        } else if ranked.is_empty() {
            println!("No eligible place");
        } else {
            for found in &ranked {
                println!(
                    "{:<20} {:<30} {:>6.0} km",
                    found.place.id, found.place.name, found.distance_km
                );
            }
        }
        return Ok(());
    }

    match resolver.find_nearest(query, cli.as_of) {
        Ok(found) if cli.json => println!("{}", serde_json::to_string_pretty(&found)?),
        Ok(found) => print_nearest(&found),
        Err(ResolveError::NoEligiblePlace { as_of }) => {
            if cli.json {
                println!("null");
            } else {
                println!("No eligible place as of {}", as_of);
            }
        }
    }

    Ok(())
}

fn print_nearest(found: &Nearest) {
    let place = &found.place;
    println!("{}", place.name);
    println!("  Id: {}", place.id);
    println!(
        "  Coords: {}, {}",
        place.location.latitude(),
        place.location.longitude()
    );
    println!("  Valid From: {}", place.valid_from);
    println!("  Distance: {:.0} km", found.distance_km);
}
