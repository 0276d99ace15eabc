//! Built-in reference lists.
//!
//! Two lists ship with the crate:
//!
//! - [`BuiltinCatalog::CloudRegions`] - public cloud regions, valid from their
//!   general-availability date
//! - [`BuiltinCatalog::OlympicHostCities`] - Summer Olympic host cities, valid
//!   from the opening of their first Games
//!
//! Entries announced but not yet open carry a future date and stay
//! ineligible until then.

use clap::ValueEnum;

use crate::catalog::Catalog;
use crate::error::{CatalogLoadError, RecordRef};
use crate::loader::{parse_date, DEFAULT_DATE_FORMAT};
use crate::types::{GeoPoint, Place};

/// (id, name, latitude, longitude, valid_from)
type Row = (&'static str, &'static str, f64, f64, &'static str);

const CLOUD_REGIONS: &[Row] = &[
    ("us-phoenix-1", "Phoenix", 33.45, -112.066667, "2016-10-20"),
    ("us-ashburn-1", "Ashburn", 39.043611, -77.4875, "2017-05-15"),
    ("eu-frankfurt-1", "Frankfurt", 50.110884, 8.6794922, "2017-09-29"),
    ("uk-london-1", "London", 51.5001524, -0.1262362, "2018-03-19"),
    ("ca-toronto-1", "Toronto", 43.6518927, -79.381713, "2019-01-17"),
    ("ap-tokyo-1", "Tokyo", 35.683333, 139.766667, "2019-04-30"),
    ("ap-seoul-1", "Seoul", 37.56, 126.99, "2019-05-13"),
    ("ap-mumbai-1", "Mumbai", 18.975, 72.825833, "2019-07-26"),
    ("eu-zurich-1", "Zurich", 47.366667, 8.55, "2019-08-09"),
    ("sa-saopaulo-1", "Sao Paulo", -23.5486657, -46.6382522, "2019-08-23"),
    ("ap-sydney-1", "Sydney", -33.8727635, 151.2053446, "2019-08-30"),
    ("ap-osaka-1", "Osaka", 34.693889, 135.502222, "2020-01-24"),
    ("ap-melbourne-1", "Melbourne", -37.813611, 144.963056, "2020-02-01"),
    ("eu-amsterdam-1", "Amsterdam", 52.3731663, 4.8906596, "2020-02-01"),
    ("me-jeddah-1", "Jeddah", 21.543333, 39.172778, "2020-02-01"),
    ("ca-montreal-1", "Montreal", 45.509062, -73.553363, "2020-03-01"),
    ("ap-hyderabad-1", "Hyderabad", 17.366, 78.476, "2020-04-30"),
    ("ap-chuncheon-1", "Chuncheon", 37.8696345, 127.7386813, "2020-05-29"),
    ("us-sanjose-1", "San Jose", 37.333333, -121.9, "2020-07-24"),
    ("me-dubai-1", "Dubai", 25.026, 55.185, "2020-09-30"),
    ("uk-cardiff-1", "Newport", 51.4813069, -3.1804979, "2020-10-30"),
    ("sa-santiago-1", "Santiago", -33.45, -70.666667, "2020-11-30"),
    ("sa-vinhedo-1", "Vinhedo", -23.0395987, -46.9845879, "2021-05-28"),
    ("il-jerusalem-1", "Jerusalem", 31.8024155, 35.207303, "2021-10-10"),
    ("me-abudhabi-1", "Abu Dhabi", 24.4881757, 54.3549462, "2021-10-31"),
    ("ap-singapore-1", "Singapore", 1.2925, 103.8022, "2021-10-31"),
    ("eu-marseille-1", "Marseille", 43.321, 5.386, "2021-10-31"),
    ("eu-stockholm-1", "Stockholm", 59.329444, 18.068611, "2021-12-17"),
    ("eu-milan-1", "Milan", 45.4636183, 9.1881156, "2021-11-20"),
    ("af-johannesburg-1", "Johannesburg", -26.201452, 28.045488, "2022-01-08"),
    ("eu-paris-1", "Paris", 48.856895, 2.3508487, "2022-02-28"),
    ("eu-madrid-1", "Madrid", 40.4167, -3.7003, "2022-03-09"),
    ("mx-queretaro-1", "Queretaro", 20.5875, -100.392778, "2099-01-01"),
];

const OLYMPIC_HOST_CITIES: &[Row] = &[
    ("ATH", "Athens 1896, 2004", 37.9839, 23.7283, "1896-04-06"),
    ("PAR", "Paris 1900, 1924, 2024", 48.8535, 2.3484, "1900-05-14"),
    ("STL", "St. Louis 1904", 38.6270, -90.1994, "1904-07-01"),
    ("LON", "London 1908, 1948, 2012", 51.5074, -0.1278, "1908-04-27"),
    ("STO", "Stockholm 1912", 59.3293, 18.0686, "1912-05-05"),
    ("ANT", "Antwerp 1920", 51.2194, 4.4025, "1920-04-20"),
    ("AMS", "Amsterdam 1928", 52.3676, 4.9041, "1928-05-17"),
    ("LAX", "Los Angeles 1932, 1984, 2028", 34.0522, -118.2437, "1932-07-30"),
    ("BER", "Berlin 1936", 52.5200, 13.4050, "1936-08-01"),
    ("HEL", "Helsinki 1952", 60.1699, 24.9384, "1952-07-19"),
    ("MEL", "Melbourne 1956", -37.8136, 144.9631, "1956-11-22"),
    ("ROM", "Rome 1960", 41.9028, 12.4964, "1960-08-25"),
    ("TYO", "Tokyo 1964, 2020", 35.6762, 139.6503, "1964-10-10"),
    ("MEX", "Mexico City 1968", 19.4326, -99.1332, "1968-10-12"),
    ("MUC", "Munich 1972", 48.1351, 11.5820, "1972-08-26"),
    ("MTL", "Montreal 1976", 45.5017, -73.5673, "1976-07-17"),
    ("MOW", "Moscow 1980", 55.7558, 37.6173, "1980-07-19"),
    ("SEL", "Seoul 1988", 37.5665, 126.9780, "1988-09-17"),
    ("BCN", "Barcelona 1992", 41.3874, 2.1686, "1992-07-25"),
    ("ATL", "Atlanta 1996", 33.7490, -84.3880, "1996-07-19"),
    ("SYD", "Sydney 2000", -33.8688, 151.2093, "2000-09-15"),
    ("BJS", "Beijing 2008", 39.9042, 116.4074, "2008-08-08"),
    ("RIO", "Rio de Janeiro 2016", -22.9068, -43.1729, "2016-08-05"),
    ("BNE", "Brisbane 2032", -27.4698, 153.0251, "2032-07-23"),
];

/// Selects one of the reference lists compiled into the crate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum)]
pub enum BuiltinCatalog {
    /// Public cloud regions
    #[default]
    CloudRegions,
    /// Summer Olympic host cities
    OlympicHostCities,
}

impl BuiltinCatalog {
    /// Short name, matching the CLI spelling.
    pub fn name(&self) -> &'static str {
        match self {
            BuiltinCatalog::CloudRegions => "cloud-regions",
            BuiltinCatalog::OlympicHostCities => "olympic-host-cities",
        }
    }

    /// Builds the catalog.
    ///
    /// # Examples
    ///
    /// ```
    /// use nadir::BuiltinCatalog;
    ///
    /// let catalog = BuiltinCatalog::OlympicHostCities.load().unwrap();
    /// assert_eq!(catalog.get("ATH").unwrap().name, "Athens 1896, 2004");
    /// ```
    pub fn load(&self) -> Result<Catalog, CatalogLoadError> {
        let rows = match self {
            BuiltinCatalog::CloudRegions => CLOUD_REGIONS,
            BuiltinCatalog::OlympicHostCities => OLYMPIC_HOST_CITIES,
        };

        let places = rows
            .iter()
            .enumerate()
            .map(|(idx, &(id, name, latitude, longitude, valid_from))| {
                let location = GeoPoint::new(latitude, longitude).map_err(|_| {
                    CatalogLoadError::invalid_location(
                        RecordRef::with_id(idx + 1, id),
                        latitude,
                        longitude,
                    )
                })?;
                let valid_from = parse_date(idx + 1, id, valid_from, DEFAULT_DATE_FORMAT)?;
                Ok(Place::new(id, name, location, valid_from))
            })
            .collect::<Result<Vec<_>, CatalogLoadError>>()?;

        let catalog = Catalog::new(places)?;
        log::debug!("Loaded {} places from built-in {}", catalog.len(), self.name());
        Ok(catalog)
    }
}
