//! Core data structures for place resolution.
//!
//! This module defines the value types used throughout the library:
//!
//! - [`GeoPoint`] - Finite latitude/longitude pair with distance calculation
//! - [`Place`] - A named reference location gated by a validity date
//! - [`Nearest`] - The outcome of a resolution: a place and its distance
//! - [`PlaceRecord`] - Compact storage format used by catalog snapshots
//! - [`CatalogSnapshot`] - Versioned binary snapshot of a whole catalog

#![warn(missing_docs)]

use chrono::NaiveDate;
use serde::Serialize;

use crate::distance::{DistanceMetric, Haversine};
use crate::error::{CatalogLoadError, CoordinateError, RecordRef};

/// A latitude/longitude pair in decimal degrees.
///
/// Both values are guaranteed finite. Range is not checked: the position
/// source is responsible for supplying sensible coordinates, and the
/// resolver will happily measure from any finite point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    /// Constructs a new GeoPoint from coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateError::NotFinite`] if either value is NaN or infinite.
    ///
    /// # Examples
    ///
    /// ```
    /// use nadir::GeoPoint;
    ///
    /// let point = GeoPoint::new(51.5074, -0.1278).unwrap();
    /// assert_eq!(point.latitude(), 51.5074);
    /// assert_eq!(point.longitude(), -0.1278);
    ///
    /// assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
    /// ```
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(CoordinateError::NotFinite {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Latitude in decimal degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in decimal degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Calculates the great-circle distance to another point using the haversine formula.
    ///
    /// Returns the distance in kilometers on a sphere of radius
    /// [`EARTH_RADIUS_KM`](crate::distance::EARTH_RADIUS_KM).
    ///
    /// # Examples
    ///
    /// ```
    /// use nadir::GeoPoint;
    ///
    /// let london = GeoPoint::new(51.5074, -0.1278).unwrap();
    /// let paris = GeoPoint::new(48.8566, 2.3522).unwrap();
    ///
    /// let distance = london.distance_to(&paris);
    /// assert!(distance > 343.0 && distance < 345.0); // ~344 km
    /// ```
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        Haversine::default().distance_km(self, other)
    }
}

/// A named reference location that becomes eligible for matching after `valid_from`.
///
/// `name` is display text only. It may carry an annotation listing several
/// occurrences (for example `"London 1908, 1948, 2012"`) and is never parsed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Place {
    /// Short stable identifier (e.g., "uk-london-1", "ATH")
    pub id: String,
    /// Human-readable label
    pub name: String,
    /// Position of the place
    pub location: GeoPoint,
    /// First date after which the place may be reported
    pub valid_from: NaiveDate,
}

impl Place {
    /// Constructs a new Place.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        location: GeoPoint,
        valid_from: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location,
            valid_from,
        }
    }

    /// Whether this place may be matched on `as_of`.
    ///
    /// The comparison is strict: a place whose `valid_from` is `as_of` itself
    /// is not yet eligible.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use nadir::{GeoPoint, Place};
    ///
    /// let opened = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    /// let place = Place::new("x", "X", GeoPoint::new(0.0, 0.0).unwrap(), opened);
    ///
    /// assert!(!place.is_eligible(opened));
    /// assert!(place.is_eligible(opened.succ_opt().unwrap()));
    /// ```
    pub fn is_eligible(&self, as_of: NaiveDate) -> bool {
        self.valid_from < as_of
    }
}

/// The closest eligible place to a query point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Nearest {
    /// The matched place
    pub place: Place,
    /// Great-circle distance from the query in kilometers, unrounded
    pub distance_km: f64,
}

/// Compact storage format for a single place inside a [`CatalogSnapshot`].
///
/// Dates are stored as days since 0001-01-01 (CE) so the record has no
/// dependency on a date serialization format.
#[derive(Debug, Clone, PartialEq, bincode::Encode, bincode::Decode)]
pub struct PlaceRecord {
    /// Place identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// `valid_from` as returned by `NaiveDate::num_days_from_ce`
    pub valid_from_days: i32,
}

impl PlaceRecord {
    /// Rebuilds the [`Place`], re-validating coordinates and date.
    ///
    /// `index` is the 1-based position of the record, used in error messages.
    pub fn into_place(self, index: usize) -> Result<Place, CatalogLoadError> {
        if self.id.trim().is_empty() {
            return Err(CatalogLoadError::MissingField {
                record: RecordRef::new(index),
                field: "id",
            });
        }
        let location = GeoPoint::new(self.latitude, self.longitude).map_err(|_| {
            CatalogLoadError::invalid_location(
                RecordRef::with_id(index, &self.id),
                self.latitude,
                self.longitude,
            )
        })?;
        let valid_from = NaiveDate::from_num_days_from_ce_opt(self.valid_from_days).ok_or_else(
            || CatalogLoadError::InvalidDate {
                record: RecordRef::with_id(index, &self.id),
                value: self.valid_from_days.to_string(),
                format: "days from CE".to_string(),
            },
        )?;
        Ok(Place::new(self.id, self.name, location, valid_from))
    }
}

impl From<&Place> for PlaceRecord {
    fn from(place: &Place) -> Self {
        use chrono::Datelike;

        Self {
            id: place.id.clone(),
            name: place.name.clone(),
            latitude: place.location.latitude(),
            longitude: place.location.longitude(),
            valid_from_days: place.valid_from.num_days_from_ce(),
        }
    }
}

/// Versioned binary snapshot of a catalog, in catalog order.
#[derive(Debug, Clone, PartialEq, bincode::Encode, bincode::Decode)]
pub struct CatalogSnapshot {
    /// Format version, see [`CatalogSnapshot::VERSION`]
    pub version: u32,
    /// All places in catalog order
    pub places: Vec<PlaceRecord>,
}

impl CatalogSnapshot {
    /// The snapshot format version written by this build.
    pub const VERSION: u32 = 1;
}
