//! Catalog loading from record files and binary snapshots.
//!
//! Record files are CSV with the columns
//!
//! ```text
//! name, valid_from, id, latitude, longitude
//! ```
//!
//! Dates are parsed with a configurable `chrono` format and stored as typed
//! dates, so queries compare chronologically and never re-parse text. A
//! single malformed record fails the whole load; nothing is skipped, and
//! there is no comment syntax: a line starting with `#` is an ordinary record.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use chrono::NaiveDate;

use crate::catalog::Catalog;
use crate::error::{CatalogLoadError, RecordRef};
use crate::types::{GeoPoint, Place};

/// ISO 8601 calendar date, e.g. `2020-01-24`.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

const COLUMNS: usize = 5;

/// Layout options for a record file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFormat {
    /// `chrono` format of the `valid_from` column
    pub date_format: String,
    /// Whether the first line is a header row
    pub has_headers: bool,
}

impl Default for RecordFormat {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            has_headers: true,
        }
    }
}

/// Builds catalogs from CSV record files.
///
/// # Examples
///
/// ```
/// use nadir::RecordLoader;
///
/// let csv = "\
/// name,valid_from,id,latitude,longitude
/// Athens 1896,1896-04-06,ATH,37.9839,23.7283
/// Paris 1900,1900-05-14,PAR,48.8535,2.3484
/// ";
///
/// let catalog = RecordLoader::default().load_reader(csv.as_bytes()).unwrap();
/// assert_eq!(catalog.len(), 2);
/// assert_eq!(catalog.get("PAR").unwrap().name, "Paris 1900");
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordLoader {
    format: RecordFormat,
}

impl RecordLoader {
    /// Creates a loader for the given layout.
    pub fn new(format: RecordFormat) -> Self {
        Self { format }
    }

    /// The layout this loader expects.
    pub fn format(&self) -> &RecordFormat {
        &self.format
    }

    /// Loads a catalog from a record file.
    pub fn load_path<P: AsRef<Path>>(&self, path: P) -> Result<Catalog, CatalogLoadError> {
        let path = path.as_ref();
        let catalog = self.load_reader(BufReader::new(File::open(path)?))?;
        log::info!("Loaded {} places from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Loads a catalog from CSV text.
    pub fn load_reader<R: Read>(&self, reader: R) -> Result<Catalog, CatalogLoadError> {
        let mut csv = csv::ReaderBuilder::new()
            .has_headers(self.format.has_headers)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let mut places = Vec::new();
        for (idx, result) in csv.records().enumerate() {
            let index = idx + 1;
            let record = result.map_err(|source| CatalogLoadError::Csv {
                record: index,
                source,
            })?;
            places.push(self.parse_record(index, &record)?);
        }

        log::debug!("Parsed {} place records", places.len());
        Catalog::new(places)
    }

    fn parse_record(
        &self,
        index: usize,
        record: &csv::StringRecord,
    ) -> Result<Place, CatalogLoadError> {
        let field = move |pos: usize, name: &'static str, record_ref: RecordRef| {
            record
                .get(pos)
                .filter(|value| !value.is_empty())
                .ok_or(CatalogLoadError::MissingField {
                    record: record_ref,
                    field: name,
                })
        };

        let id = field(2, "id", RecordRef::new(index))?;
        let name = field(0, "name", RecordRef::with_id(index, id))?;
        let valid_from = field(1, "valid_from", RecordRef::with_id(index, id))?;
        let latitude = field(3, "latitude", RecordRef::with_id(index, id))?;
        let longitude = field(4, "longitude", RecordRef::with_id(index, id))?;

        if record.len() > COLUMNS {
            log::warn!(
                "Ignoring {} extra column(s) in record {}",
                record.len() - COLUMNS,
                index
            );
        }

        let location = parse_location(index, id, latitude, longitude)?;
        let valid_from = parse_date(index, id, valid_from, &self.format.date_format)?;

        Ok(Place::new(id, name, location, valid_from))
    }
}

fn parse_coordinate(
    index: usize,
    id: &str,
    field: &'static str,
    value: &str,
) -> Result<f64, CatalogLoadError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| CatalogLoadError::InvalidCoordinate {
            record: RecordRef::with_id(index, id),
            field,
            value: value.to_string(),
        })
}

fn parse_location(
    index: usize,
    id: &str,
    latitude: &str,
    longitude: &str,
) -> Result<GeoPoint, CatalogLoadError> {
    let latitude = parse_coordinate(index, id, "latitude", latitude)?;
    let longitude = parse_coordinate(index, id, "longitude", longitude)?;
    GeoPoint::new(latitude, longitude).map_err(|_| {
        CatalogLoadError::invalid_location(RecordRef::with_id(index, id), latitude, longitude)
    })
}

/// Parses a validity date, naming the record on failure.
pub(crate) fn parse_date(
    index: usize,
    id: &str,
    value: &str,
    format: &str,
) -> Result<NaiveDate, CatalogLoadError> {
    NaiveDate::parse_from_str(value, format).map_err(|_| CatalogLoadError::InvalidDate {
        record: RecordRef::with_id(index, id),
        value: value.to_string(),
        format: format.to_string(),
    })
}

/// Writes `catalog` to `path` as a binary snapshot.
pub fn save_snapshot<P: AsRef<Path>>(catalog: &Catalog, path: P) -> Result<(), CatalogLoadError> {
    let path = path.as_ref();
    let bytes = catalog.to_snapshot_bytes()?;
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(&bytes)?;
    writer.flush()?;
    log::info!(
        "Wrote snapshot of {} places to {} ({} bytes)",
        catalog.len(),
        path.display(),
        bytes.len()
    );
    Ok(())
}

/// Reads a catalog from a binary snapshot written by [`save_snapshot`].
pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<Catalog, CatalogLoadError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    let catalog = Catalog::from_snapshot_bytes(&bytes)?;
    log::info!("Loaded {} places from snapshot {}", catalog.len(), path.display());
    Ok(catalog)
}
