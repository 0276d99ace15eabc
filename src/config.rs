//! Resolver configuration.
//!
//! The catalog is chosen explicitly here and handed to the resolver at
//! construction. There is no process-wide "active catalog" to switch.

use std::path::PathBuf;

use chrono_tz::Tz;

use crate::catalog::Catalog;
use crate::catalogs::BuiltinCatalog;
use crate::distance::EARTH_RADIUS_KM;
use crate::error::CatalogLoadError;
use crate::loader::{load_snapshot, RecordFormat, RecordLoader};

/// Where the place list comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// A list compiled into the crate
    Builtin(BuiltinCatalog),
    /// A CSV record file, read with [`Config::record_format`]
    Records(PathBuf),
    /// A binary snapshot written by `build-catalog`
    Snapshot(PathBuf),
}

impl Default for CatalogSource {
    fn default() -> Self {
        CatalogSource::Builtin(BuiltinCatalog::default())
    }
}

/// Library configuration.
///
/// # Examples
///
/// ```
/// use nadir::{BuiltinCatalog, CatalogSource, Config, Resolver};
///
/// let config = Config {
///     catalog: CatalogSource::Builtin(BuiltinCatalog::OlympicHostCities),
///     timezone: Some(chrono_tz::Europe::London),
///     ..Default::default()
/// };
///
/// let resolver = Resolver::from_config(&config).unwrap();
/// assert!(resolver.snapshot().get("ATH").is_some());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Catalog to resolve against
    pub catalog: CatalogSource,

    /// Timezone for "today" when no as-of date is given (local time if `None`)
    pub timezone: Option<Tz>,

    /// Sphere radius for all distances, in kilometers
    pub earth_radius_km: f64,

    /// Layout of record files, used only for [`CatalogSource::Records`]
    pub record_format: RecordFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: CatalogSource::default(),
            timezone: None,
            earth_radius_km: EARTH_RADIUS_KM,
            record_format: RecordFormat::default(),
        }
    }
}

impl Config {
    /// Loads the configured catalog.
    pub fn load_catalog(&self) -> Result<Catalog, CatalogLoadError> {
        match &self.catalog {
            CatalogSource::Builtin(builtin) => builtin.load(),
            CatalogSource::Records(path) => {
                RecordLoader::new(self.record_format.clone()).load_path(path)
            }
            CatalogSource::Snapshot(path) => load_snapshot(path),
        }
    }
}
