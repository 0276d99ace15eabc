//! Nearest named place beneath a satellite, from a date-gated reference list.
//!
//! `nadir` takes a geographic position (typically the sub-satellite point
//! produced by an orbit propagator once per display tick) and reports the
//! closest place from a curated list, together with the great-circle distance
//! to it. Each place carries a `valid_from` date and is only reported once
//! that date has passed, so the same list can describe sites that open over
//! time: cloud regions going live, cities hosting their first Games.
//!
//! # Features
//!
//! - **Simple API** - Single function call: [`nearest(lat, lon)`](nearest)
//! - **Date Gating** - Places become eligible strictly after their `valid_from` date
//! - **Reproducible** - Pass an explicit as-of date, or inject a [`FixedClock`]
//! - **Deterministic Ties** - Equidistant places resolve to the first in catalog order
//! - **Typed Failures** - No eligible place is an error, never a placeholder record
//! - **Hot Reload** - Swap the catalog atomically while queries keep running
//! - **Portable Data** - Literal tables, CSV record files, or compact binary snapshots
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() {
//! // The ISS passing over the English Channel
//! match nadir::nearest(50.6, 1.2) {
//!     Ok(found) => println!("{} ({:.0} km)", found.place.id, found.distance_km),
//!     Err(e) => println!("No match: {}", e),
//! }
//! # }
//! ```
//!
//! # Detailed Example
//!
//! ```
//! # fn main() {
//! use chrono::NaiveDate;
//! use nadir::{BuiltinCatalog, FixedClock, GeoPoint, Resolver};
//!
//! let catalog = BuiltinCatalog::OlympicHostCities.load().unwrap();
//! let resolver = Resolver::new(catalog)
//!     .with_clock(FixedClock(NaiveDate::from_ymd_opt(1897, 1, 1).unwrap()));
//!
//! // Over London, before Paris hosted: only Athens qualifies.
//! let london = GeoPoint::new(51.5, -0.12).unwrap();
//! let found = resolver.find_nearest(london, None).unwrap();
//!
//! assert_eq!(found.place.id, "ATH");
//! assert!((found.distance_km - 2393.5).abs() < 5.0);
//! # }
//! ```
//!
//! # Architecture
//!
//! ## Data Model
//!
//! - [`GeoPoint`] - Finite latitude/longitude pair in degrees
//! - [`Place`] - Identifier, display name, location and `valid_from` date
//! - [`Catalog`] - Ordered, read-only list of places with an id index
//!
//! ## Lookup Algorithm
//!
//! 1. Settle the as-of date (explicit, or today from the [`Clock`])
//! 2. Take the current catalog snapshot
//! 3. Filter places with `valid_from < as_of`
//! 4. Calculate haversine distance to every eligible place
//! 5. Return the minimum, first in catalog order on ties
//!
//! This is a linear scan: O(n) per query with no allocation beyond the
//! returned [`Nearest`]. Catalogs run from tens to hundreds of entries, well
//! within a per-frame budget. The [`PlaceIndex`] trait is the seam for a
//! spatial index should larger lists appear.
//!
//! ## Distances
//!
//! Distances use a spherical Earth of radius
//! [`EARTH_RADIUS_KM`](distance::EARTH_RADIUS_KM) (6378.1 km) unless the
//! resolver is configured with another [`Haversine`] radius. They are
//! returned unrounded; round at presentation time.
//!
//! # Thread Safety
//!
//! [`Resolver::find_nearest`] takes `&self`, reads an `Arc` snapshot of the
//! catalog, and never mutates shared state. Queries may run from any number of
//! threads. [`Resolver::reload`] replaces the snapshot in one step, so no
//! query sees a partially updated list.
//!
//! ```
//! use std::sync::Arc;
//! use std::thread;
//!
//! use chrono::NaiveDate;
//! use nadir::{BuiltinCatalog, GeoPoint, Resolver};
//!
//! # fn main() {
//! let resolver = Arc::new(Resolver::new(BuiltinCatalog::CloudRegions.load().unwrap()));
//! let as_of = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
//!
//! let handles: Vec<_> = (0..8)
//!     .map(|i| {
//!         let resolver = Arc::clone(&resolver);
//!         thread::spawn(move || {
//!             let point = GeoPoint::new(-50.0 + 12.5 * i as f64, 10.0 * i as f64).unwrap();
//!             resolver.find_nearest(point, Some(as_of))
//!         })
//!     })
//!     .collect();
//!
//! for handle in handles {
//!     assert!(handle.join().unwrap().is_ok());
//! }
//! # }
//! ```
//!
//! # Modules
//!
//! - [`types`] - Core data structures ([`GeoPoint`], [`Place`], [`Nearest`])
//! - [`distance`] - Great-circle distance ([`DistanceMetric`], [`Haversine`])
//! - [`catalog`] - Place lists and the [`PlaceIndex`] search seam
//! - [`loader`] - CSV record files and binary snapshots
//! - [`catalogs`] - Built-in reference lists
//! - [`clock`] - Sources of "today"
//! - [`config`] - Resolver configuration
//! - [`error`] - Error types

#![warn(missing_docs)]

pub mod catalog;
pub mod catalogs;
pub mod clock;
pub mod config;
pub mod distance;
pub mod error;
pub mod loader;
pub mod logging;
mod resolver;
pub mod types;

pub use catalog::{Catalog, PlaceIndex};
pub use catalogs::BuiltinCatalog;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{CatalogSource, Config};
pub use distance::{DistanceMetric, Haversine};
pub use error::{CatalogLoadError, CoordinateError, Error, ResolveError};
pub use loader::{RecordFormat, RecordLoader};
pub use resolver::Resolver;
pub use types::{GeoPoint, Nearest, Place};

/// Finds the nearest eligible place to the given coordinates, as of today.
///
/// This is the shortest path for a tracking loop: it resolves against the
/// default built-in catalog through a process-wide [`Resolver`] that is built
/// on first use and never changes afterwards. Today's date is read from the
/// local clock on every call.
///
/// Build your own [`Resolver`] to choose the catalog, the clock, or the
/// sphere radius.
///
/// # Errors
///
/// - [`Error::Coordinate`] if either coordinate is NaN or infinite
/// - [`Error::Resolve`] if no place in the catalog is eligible yet
///
/// # Examples
///
/// ```no_run
/// # fn main() {
/// let found = nadir::nearest(35.0, 139.0).unwrap();
/// println!("{} - {:.0} km", found.place.name, found.distance_km);
///
/// assert!(nadir::nearest(f64::NAN, 0.0).is_err());
/// # }
/// ```
pub fn nearest(latitude: f64, longitude: f64) -> Result<Nearest, Error> {
    let query = GeoPoint::new(latitude, longitude)?;
    Ok(Resolver::global().find_nearest(query, None)?)
}
