//! Error types.
//!
//! Resolution never fails transiently: a query either yields a place or a
//! [`ResolveError`]. Malformed catalog data is rejected up front, when the
//! catalog is built, with a [`CatalogLoadError`] that names the offending record.

use std::fmt;

use chrono::NaiveDate;
use thiserror::Error;

/// A coordinate pair that cannot be represented as a [`GeoPoint`](crate::GeoPoint).
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CoordinateError {
    /// Latitude or longitude is NaN or infinite.
    #[error("coordinates must be finite, got ({latitude}, {longitude})")]
    NotFinite {
        /// The rejected latitude.
        latitude: f64,
        /// The rejected longitude.
        longitude: f64,
    },
}

/// Failure to resolve a query to a place.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// Every place in the catalog becomes valid on or after `as_of`, or the
    /// catalog is empty.
    #[error("no place is eligible as of {as_of}")]
    NoEligiblePlace {
        /// The date eligibility was evaluated against.
        as_of: NaiveDate,
    },
}

/// Identifies a record within a catalog source for error reporting.
///
/// `index` is 1-based and counts data records, not header lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordRef {
    /// 1-based record number.
    pub index: usize,
    /// Place identifier, when the record got far enough to have one.
    pub id: Option<String>,
}

impl RecordRef {
    pub(crate) fn new(index: usize) -> Self {
        Self { index, id: None }
    }

    pub(crate) fn with_id(index: usize, id: &str) -> Self {
        Self {
            index,
            id: Some(id.to_string()),
        }
    }
}

impl fmt::Display for RecordRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) => write!(f, "record {} ('{}')", self.index, id),
            None => write!(f, "record {}", self.index),
        }
    }
}

/// Error raised while building a [`Catalog`](crate::Catalog).
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    /// The source file could not be read or written.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The record file is not well-formed CSV.
    #[error("Malformed record file at record {record}: {source}")]
    Csv {
        /// 1-based record number.
        record: usize,
        /// Underlying CSV error.
        source: csv::Error,
    },

    /// A required column is absent or blank.
    #[error("{record}: missing {field}")]
    MissingField {
        /// Offending record.
        record: RecordRef,
        /// Column name.
        field: &'static str,
    },

    /// A coordinate does not parse as a finite number.
    #[error("{record}: invalid {field} '{value}'")]
    InvalidCoordinate {
        /// Offending record.
        record: RecordRef,
        /// `latitude` or `longitude`.
        field: &'static str,
        /// The raw value.
        value: String,
    },

    /// A validity date does not match the configured format.
    #[error("{record}: invalid date '{value}' (expected format {format})")]
    InvalidDate {
        /// Offending record.
        record: RecordRef,
        /// The raw value.
        value: String,
        /// The `chrono` format string the value was parsed with.
        format: String,
    },

    /// Two records share an identifier.
    #[error("{record}: duplicate id '{id}'")]
    DuplicateId {
        /// The second record carrying the id.
        record: RecordRef,
        /// The repeated identifier.
        id: String,
    },

    /// The catalog could not be encoded as a snapshot.
    #[error("Failed to encode snapshot: {0}")]
    SnapshotEncode(#[from] bincode::error::EncodeError),

    /// The snapshot bytes are not a valid encoded catalog.
    #[error("Failed to decode snapshot: {0}")]
    SnapshotDecode(#[from] bincode::error::DecodeError),

    /// The snapshot was written by an incompatible format version.
    #[error("Unsupported snapshot version {found} (expected {expected})")]
    SnapshotVersion {
        /// Version found in the snapshot.
        found: u32,
        /// Version this build reads.
        expected: u32,
    },
}

impl CatalogLoadError {
    /// Rejection of a coordinate pair, naming whichever value is not finite.
    pub(crate) fn invalid_location(record: RecordRef, latitude: f64, longitude: f64) -> Self {
        let (field, value) = if latitude.is_finite() {
            ("longitude", longitude)
        } else {
            ("latitude", latitude)
        };
        CatalogLoadError::InvalidCoordinate {
            record,
            field,
            value: value.to_string(),
        }
    }
}

/// Crate-level error, for callers that don't care which stage failed.
#[derive(Debug, Error)]
pub enum Error {
    /// Query coordinates were not finite.
    #[error(transparent)]
    Coordinate(#[from] CoordinateError),

    /// No eligible place for the query.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// The catalog could not be loaded.
    #[error(transparent)]
    CatalogLoad(#[from] CatalogLoadError),

    /// The configured sphere radius is unusable.
    #[error("Earth radius must be a positive, finite number of kilometres, got {0}")]
    InvalidRadius(f64),
}
