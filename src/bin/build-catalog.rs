use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;

use nadir::loader::{save_snapshot, DEFAULT_DATE_FORMAT};
use nadir::logging::init_logger;
use nadir::{RecordFormat, RecordLoader};

/// Compile a CSV record file into a binary catalog snapshot.
#[derive(Parser, Debug)]
#[command(name = "build-catalog", version)]
struct Args {
    /// CSV record file (name, valid_from, id, latitude, longitude)
    records: PathBuf,

    /// Snapshot to write
    #[arg(default_value = "places.bin")]
    output: PathBuf,

    /// chrono format of the valid_from column
    #[arg(long, default_value = DEFAULT_DATE_FORMAT)]
    date_format: String,

    /// Record file has no header row
    #[arg(long)]
    no_headers: bool,

    /// Log progress
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let level = if args.verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    };
    init_logger(level).context("Failed to initialize logger")?;

    println!("Building catalog to: {}", args.output.display());

    let loader = RecordLoader::new(RecordFormat {
        date_format: args.date_format,
        has_headers: !args.no_headers,
    });
    let catalog = loader
        .load_path(&args.records)
        .with_context(|| format!("Failed to load {}", args.records.display()))?;
    save_snapshot(&catalog, &args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    println!("Catalog built successfully! ({} places)", catalog.len());
    Ok(())
}
