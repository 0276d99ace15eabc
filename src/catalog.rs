//! Ordered, read-only collections of places.

use chrono::NaiveDate;
use rustc_hash::FxHashMap;

use crate::distance::DistanceMetric;
use crate::error::{CatalogLoadError, RecordRef};
use crate::types::{CatalogSnapshot, GeoPoint, Place, PlaceRecord};

/// Upper bound on the memory a snapshot decode may claim.
pub const SNAPSHOT_LIMIT_BYTES: usize = 64 * 1024 * 1024;

/// Nearest-neighbor search over eligible places.
///
/// [`Catalog`] implements this with a linear scan. A spatial index can take
/// its place in a [`Resolver`](crate::Resolver) as long as it keeps the same
/// contract: only places with `valid_from < as_of` are considered, and among
/// equidistant places the one first in catalog order wins.
pub trait PlaceIndex: Send + Sync {
    /// Returns the closest eligible place and its distance in kilometers,
    /// or `None` if no place is eligible on `as_of`.
    fn nearest_eligible(
        &self,
        query: &GeoPoint,
        as_of: NaiveDate,
        metric: &dyn DistanceMetric,
    ) -> Option<(&Place, f64)>;
}

/// An ordered sequence of places with lookup by id.
///
/// Order carries no meaning for distance, but it is preserved: iteration is
/// deterministic and ties are resolved in favour of the earlier place.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use nadir::{Catalog, GeoPoint, Place};
///
/// let catalog = Catalog::new(vec![
///     Place::new(
///         "ATH",
///         "Athens",
///         GeoPoint::new(37.9839, 23.7283).unwrap(),
///         NaiveDate::from_ymd_opt(1896, 4, 6).unwrap(),
///     ),
///     Place::new(
///         "PAR",
///         "Paris",
///         GeoPoint::new(48.8535, 2.3484).unwrap(),
///         NaiveDate::from_ymd_opt(1900, 5, 14).unwrap(),
///     ),
/// ])
/// .unwrap();
///
/// let as_of = NaiveDate::from_ymd_opt(1897, 1, 1).unwrap();
/// let eligible: Vec<_> = catalog.eligible(as_of).map(|p| p.id.as_str()).collect();
/// assert_eq!(eligible, ["ATH"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    places: Vec<Place>,
    by_id: FxHashMap<String, usize>,
}

impl Catalog {
    /// Builds a catalog, keeping the given order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogLoadError::DuplicateId`] naming the second record if
    /// two places share an id.
    pub fn new(places: Vec<Place>) -> Result<Self, CatalogLoadError> {
        let mut by_id = FxHashMap::default();
        by_id.reserve(places.len());

        for (idx, place) in places.iter().enumerate() {
            if by_id.insert(place.id.clone(), idx).is_some() {
                return Err(CatalogLoadError::DuplicateId {
                    record: RecordRef::with_id(idx + 1, &place.id),
                    id: place.id.clone(),
                });
            }
        }

        Ok(Self { places, by_id })
    }

    /// A catalog with no places. Every query against it fails.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the number of places.
    pub fn len(&self) -> usize {
        self.places.len()
    }

    /// Returns true if the catalog holds no places.
    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    /// All places in catalog order.
    pub fn places(&self) -> &[Place] {
        &self.places
    }

    /// Iterates over all places in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Place> {
        self.places.iter()
    }

    /// Gets a place by id.
    pub fn get(&self, id: &str) -> Option<&Place> {
        self.by_id.get(id).map(|&idx| &self.places[idx])
    }

    /// Iterates over the places eligible on `as_of`, in catalog order.
    pub fn eligible(&self, as_of: NaiveDate) -> impl Iterator<Item = &Place> {
        self.places.iter().filter(move |p| p.is_eligible(as_of))
    }

    /// Captures the catalog as a versioned snapshot.
    pub fn to_snapshot(&self) -> CatalogSnapshot {
        CatalogSnapshot {
            version: CatalogSnapshot::VERSION,
            places: self.places.iter().map(PlaceRecord::from).collect(),
        }
    }

    /// Rebuilds a catalog from a snapshot, validating every record.
    pub fn from_snapshot(snapshot: CatalogSnapshot) -> Result<Self, CatalogLoadError> {
        if snapshot.version != CatalogSnapshot::VERSION {
            return Err(CatalogLoadError::SnapshotVersion {
                found: snapshot.version,
                expected: CatalogSnapshot::VERSION,
            });
        }

        let places = snapshot
            .places
            .into_iter()
            .enumerate()
            .map(|(idx, record)| record.into_place(idx + 1))
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(places)
    }

    /// Encodes the catalog to bytes with `bincode`.
    pub fn to_snapshot_bytes(&self) -> Result<Vec<u8>, CatalogLoadError> {
        Ok(bincode::encode_to_vec(
            self.to_snapshot(),
            bincode::config::standard(),
        )?)
    }

    /// Decodes a catalog previously written by [`Catalog::to_snapshot_bytes`].
    pub fn from_snapshot_bytes(bytes: &[u8]) -> Result<Self, CatalogLoadError> {
        let config = bincode::config::standard().with_limit::<SNAPSHOT_LIMIT_BYTES>();
        let (snapshot, _): (CatalogSnapshot, _) = bincode::decode_from_slice(bytes, config)?;
        Self::from_snapshot(snapshot)
    }
}

impl PlaceIndex for Catalog {
    fn nearest_eligible(
        &self,
        query: &GeoPoint,
        as_of: NaiveDate,
        metric: &dyn DistanceMetric,
    ) -> Option<(&Place, f64)> {
        // min_by keeps the first of several equal minima.
        self.eligible(as_of)
            .map(|place| (place, metric.distance_km(query, &place.location)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Place;
    type IntoIter = std::slice::Iter<'a, Place>;

    fn into_iter(self) -> Self::IntoIter {
        self.places.iter()
    }
}
