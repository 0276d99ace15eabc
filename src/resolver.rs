use std::sync::{Arc, OnceLock, RwLock};

use chrono::NaiveDate;

use crate::catalog::{Catalog, PlaceIndex};
use crate::catalogs::BuiltinCatalog;
use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::distance::{DistanceMetric, Haversine};
use crate::error::{Error, ResolveError};
use crate::types::{GeoPoint, Nearest};

static RESOLVER: OnceLock<Resolver> = OnceLock::new();

/// Resolves positions to the nearest eligible place.
///
/// The index is held as an immutable snapshot behind `RwLock<Arc<_>>`.
/// Queries clone the `Arc` and scan without holding the lock; [`reload`]
/// swaps in a whole new snapshot, so a query sees either the old list or
/// the new one, never a mix.
///
/// [`reload`]: Resolver::reload
pub struct Resolver<I: PlaceIndex = Catalog> {
    index: RwLock<Arc<I>>,
    metric: Box<dyn DistanceMetric>,
    clock: Box<dyn Clock>,
}

impl Resolver<Catalog> {
    /// The process-wide resolver over the default built-in catalog, using
    /// the local clock.
    pub fn global() -> &'static Self {
        RESOLVER.get_or_init(|| {
            let catalog = BuiltinCatalog::default()
                .load()
                .expect("Failed to load built-in catalog");
            Self::new(catalog)
        })
    }

    /// Builds a resolver from configuration, loading the configured catalog.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        if !(config.earth_radius_km.is_finite() && config.earth_radius_km > 0.0) {
            return Err(Error::InvalidRadius(config.earth_radius_km));
        }

        let catalog = config.load_catalog()?;
        let clock = match config.timezone {
            Some(tz) => SystemClock::with_timezone(tz),
            None => SystemClock::new(),
        };

        Ok(Self::new(catalog)
            .with_metric(Haversine::new(config.earth_radius_km))
            .with_clock(clock))
    }

    /// Every eligible place with its distance from `query`, nearest first.
    ///
    /// Places at equal distance keep their catalog order, so the first
    /// entry is always the one [`find_nearest`](Resolver::find_nearest) returns.
    pub fn ranked(&self, query: GeoPoint, as_of: Option<NaiveDate>) -> Vec<Nearest> {
        let as_of = as_of.unwrap_or_else(|| self.clock.today());
        let catalog = self.snapshot();

        let mut ranked: Vec<Nearest> = catalog
            .eligible(as_of)
            .map(|place| Nearest {
                place: place.clone(),
                distance_km: self.metric.distance_km(&query, &place.location),
            })
            .collect();
        ranked.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
        ranked
    }
}

impl<I: PlaceIndex> Resolver<I> {
    /// Creates a resolver over `index` with the haversine metric at
    /// [`EARTH_RADIUS_KM`](crate::distance::EARTH_RADIUS_KM) and the local clock.
    pub fn new(index: I) -> Self {
        Self {
            index: RwLock::new(Arc::new(index)),
            metric: Box::new(Haversine::default()),
            clock: Box::new(SystemClock::new()),
        }
    }

    /// Replaces the distance metric.
    pub fn with_metric(mut self, metric: impl DistanceMetric + 'static) -> Self {
        self.metric = Box::new(metric);
        self
    }

    /// Replaces the clock consulted when no as-of date is given.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Finds the closest place eligible on `as_of`.
    ///
    /// A place is eligible when its `valid_from` is strictly before `as_of`.
    /// When `as_of` is `None` the clock is read on this call. Among places at
    /// exactly the same distance, the first in catalog order is returned.
    ///
    /// # Errors
    ///
    /// [`ResolveError::NoEligiblePlace`] if no place is eligible.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use nadir::{BuiltinCatalog, GeoPoint, Resolver};
    ///
    /// let resolver = Resolver::new(BuiltinCatalog::CloudRegions.load().unwrap());
    /// let over_kent = GeoPoint::new(51.2, 0.9).unwrap();
    /// let as_of = NaiveDate::from_ymd_opt(2021, 6, 1).unwrap();
    ///
    /// let nearest = resolver.find_nearest(over_kent, Some(as_of)).unwrap();
    /// assert_eq!(nearest.place.id, "uk-london-1");
    /// ```
    pub fn find_nearest(
        &self,
        query: GeoPoint,
        as_of: Option<NaiveDate>,
    ) -> Result<Nearest, ResolveError> {
        let as_of = as_of.unwrap_or_else(|| self.clock.today());
        let index = self.snapshot();

        let (place, distance_km) = index
            .nearest_eligible(&query, as_of, self.metric.as_ref())
            .ok_or(ResolveError::NoEligiblePlace { as_of })?;

        log::trace!(
            "({:.4}, {:.4}) as of {} -> {} at {:.1} km",
            query.latitude(),
            query.longitude(),
            as_of,
            place.id,
            distance_km
        );

        Ok(Nearest {
            place: place.clone(),
            distance_km,
        })
    }

    /// Today's date according to the resolver's clock.
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Distance between two points with the resolver's metric.
    pub fn distance_km(&self, a: &GeoPoint, b: &GeoPoint) -> f64 {
        self.metric.distance_km(a, b)
    }

    /// The current index snapshot.
    pub fn snapshot(&self) -> Arc<I> {
        match self.index.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// Atomically replaces the index. Queries already running finish on the
    /// snapshot they started with.
    pub fn reload(&self, index: I) {
        let index = Arc::new(index);
        match self.index.write() {
            Ok(mut guard) => *guard = index,
            Err(poisoned) => *poisoned.into_inner() = index,
        }
        log::info!("Reloaded place index");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;
    use crate::clock::FixedClock;
    use crate::types::Place;

    /// Advances one day every time it is read.
    struct SteppingClock {
        start: NaiveDate,
        reads: AtomicU32,
    }

    impl Clock for SteppingClock {
        fn today(&self) -> NaiveDate {
            let step = self.reads.fetch_add(1, Ordering::SeqCst);
            self.start + chrono::Days::new(u64::from(step))
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn place(id: &str, lat: f64, lon: f64, valid_from: NaiveDate) -> Place {
        Place::new(id, id, GeoPoint::new(lat, lon).unwrap(), valid_from)
    }

    fn point(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon).unwrap()
    }

    #[test]
    fn test_boundary_date_is_exclusive() {
        let catalog = Catalog::new(vec![place("new", 0.0, 0.0, date(2020, 1, 1))]).unwrap();
        let resolver = Resolver::new(catalog);

        assert_eq!(
            resolver.find_nearest(point(0.0, 0.0), Some(date(2020, 1, 1))),
            Err(ResolveError::NoEligiblePlace {
                as_of: date(2020, 1, 1)
            })
        );
        let nearest = resolver
            .find_nearest(point(0.0, 0.0), Some(date(2020, 1, 2)))
            .unwrap();
        assert_eq!(nearest.place.id, "new");
    }

    #[test]
    fn test_clock_used_when_as_of_omitted() {
        let catalog = Catalog::new(vec![
            place("yesterday", 10.0, 10.0, date(2021, 6, 14)),
            place("today", 0.0, 0.0, date(2021, 6, 15)),
        ])
        .unwrap();
        let resolver = Resolver::new(catalog).with_clock(FixedClock(date(2021, 6, 15)));

        let nearest = resolver.find_nearest(point(0.0, 0.0), None).unwrap();
        assert_eq!(nearest.place.id, "yesterday");
        assert_eq!(resolver.today(), date(2021, 6, 15));
    }

    #[test]
    fn test_clock_read_on_every_call() {
        let catalog = Catalog::new(vec![place("opening", 0.0, 0.0, date(2021, 6, 15))]).unwrap();
        let resolver = Resolver::new(catalog).with_clock(SteppingClock {
            start: date(2021, 6, 15),
            reads: AtomicU32::new(0),
        });

        assert_eq!(
            resolver.find_nearest(point(0.0, 0.0), None),
            Err(ResolveError::NoEligiblePlace {
                as_of: date(2021, 6, 15)
            })
        );
        let nearest = resolver.find_nearest(point(0.0, 0.0), None).unwrap();
        assert_eq!(nearest.place.id, "opening");
    }

    #[test]
    fn test_explicit_as_of_overrides_clock() {
        let catalog = Catalog::new(vec![place("a", 0.0, 0.0, date(2000, 1, 1))]).unwrap();
        let resolver = Resolver::new(catalog).with_clock(FixedClock(date(1990, 1, 1)));

        assert!(resolver.find_nearest(point(0.0, 0.0), None).is_err());
        assert!(resolver
            .find_nearest(point(0.0, 0.0), Some(date(2001, 1, 1)))
            .is_ok());
    }

    #[test]
    fn test_metric_radius_applies() {
        let catalog = Catalog::new(vec![place("a", 0.0, 1.0, date(2000, 1, 1))]).unwrap();
        let resolver = Resolver::new(catalog).with_metric(Haversine::new(1.0));
        let nearest = resolver
            .find_nearest(point(0.0, 0.0), Some(date(2024, 1, 1)))
            .unwrap();
        assert!((nearest.distance_km - 1.0_f64.to_radians()).abs() < 1e-12);
    }

    #[test]
    fn test_reload_swaps_catalog() {
        let resolver = Resolver::new(
            Catalog::new(vec![place("old", 0.0, 0.0, date(2000, 1, 1))]).unwrap(),
        );
        let before = resolver.snapshot();

        resolver.reload(Catalog::new(vec![place("new", 0.0, 0.0, date(2000, 1, 1))]).unwrap());

        let nearest = resolver
            .find_nearest(point(0.0, 0.0), Some(date(2024, 1, 1)))
            .unwrap();
        assert_eq!(nearest.place.id, "new");
        // Snapshots taken before the reload are unaffected.
        assert!(before.get("old").is_some());
    }

    #[test]
    fn test_ranked_orders_by_distance_then_catalog() {
        let catalog = Catalog::new(vec![
            place("far", 0.0, 20.0, date(2000, 1, 1)),
            place("tie-a", 0.0, 5.0, date(2000, 1, 1)),
            place("tie-b", 0.0, -5.0, date(2000, 1, 1)),
            place("future", 0.0, 0.0, date(2100, 1, 1)),
        ])
        .unwrap();
        let resolver = Resolver::new(catalog);
        let ranked = resolver.ranked(point(0.0, 0.0), Some(date(2024, 1, 1)));
        let ids: Vec<_> = ranked.iter().map(|n| n.place.id.as_str()).collect();
        assert_eq!(ids, ["tie-a", "tie-b", "far"]);

        let nearest = resolver
            .find_nearest(point(0.0, 0.0), Some(date(2024, 1, 1)))
            .unwrap();
        assert_eq!(nearest, ranked[0]);
    }

    #[test]
    fn test_invalid_radius_rejected() {
        for radius in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let config = Config {
                earth_radius_km: radius,
                ..Default::default()
            };
            assert!(matches!(
                Resolver::from_config(&config),
                Err(Error::InvalidRadius(_))
            ));
        }
    }

    #[test]
    fn test_global_resolver_uses_default_catalog() {
        let catalog = Resolver::global().snapshot();
        assert!(catalog.get("us-phoenix-1").is_some());
    }
}
