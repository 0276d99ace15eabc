//! Catalog loading from files: CSV record files, snapshots and configuration.

use std::fs;
use std::io::Write;

use chrono::NaiveDate;
use nadir::loader::{load_snapshot, save_snapshot};
use nadir::{
    BuiltinCatalog, CatalogLoadError, CatalogSource, Config, GeoPoint, RecordFormat,
    RecordLoader, Resolver,
};
use tempfile::{NamedTempFile, TempDir};

const OLYMPICS_CSV: &str = "\
name,valid_from,id,latitude,longitude
Athens 1896,1896-04-06,ATH,37.9839,23.7283
\"Paris 1900, 1924\",1900-05-14,PAR,48.8535,2.3484
St. Louis 1904,1904-07-01,STL,38.6270,-90.1994
";

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write temp file");
    file
}

#[test]
fn test_record_file_resolves_end_to_end() {
    let file = write_temp(OLYMPICS_CSV);
    let config = Config {
        catalog: CatalogSource::Records(file.path().to_path_buf()),
        ..Default::default()
    };
    let resolver = Resolver::from_config(&config).unwrap();

    let chicago = GeoPoint::new(41.8781, -87.6298).unwrap();
    assert_eq!(
        resolver
            .find_nearest(chicago, Some(date(1901, 1, 1)))
            .unwrap()
            .place
            .id,
        "PAR"
    );
    assert_eq!(
        resolver
            .find_nearest(chicago, Some(date(1905, 1, 1)))
            .unwrap()
            .place
            .id,
        "STL"
    );
}

#[test]
fn test_headerless_day_first_dates() {
    let file = write_temp("Antwerp 1920,20/04/1920,ANT,51.2194,4.4025\n");
    let loader = RecordLoader::new(RecordFormat {
        date_format: "%d/%m/%Y".to_string(),
        has_headers: false,
    });

    let catalog = loader.load_path(file.path()).unwrap();

    assert_eq!(catalog.get("ANT").unwrap().valid_from, date(1920, 4, 20));
}

#[test]
fn test_wrong_date_format_fails_at_load_time() {
    let file = write_temp(OLYMPICS_CSV);
    let loader = RecordLoader::new(RecordFormat {
        date_format: "%d/%m/%Y".to_string(),
        has_headers: true,
    });

    match loader.load_path(file.path()) {
        Err(CatalogLoadError::InvalidDate { record, value, .. }) => {
            assert_eq!(record.index, 1);
            assert_eq!(record.id.as_deref(), Some("ATH"));
            assert_eq!(value, "1896-04-06");
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_snapshot_file_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("olympics.bin");
    let catalog = BuiltinCatalog::OlympicHostCities.load().unwrap();

    save_snapshot(&catalog, &path).unwrap();
    let restored = load_snapshot(&path).unwrap();

    assert_eq!(restored.places(), catalog.places());
}

#[test]
fn test_snapshot_source_in_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("regions.bin");
    save_snapshot(&BuiltinCatalog::CloudRegions.load().unwrap(), &path).unwrap();

    let config = Config {
        catalog: CatalogSource::Snapshot(path),
        ..Default::default()
    };
    let resolver = Resolver::from_config(&config).unwrap();

    let tokyo = GeoPoint::new(35.68, 139.77).unwrap();
    let found = resolver.find_nearest(tokyo, Some(date(2020, 1, 1))).unwrap();
    assert_eq!(found.place.id, "ap-tokyo-1");
}

#[test]
fn test_garbage_snapshot_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("garbage.bin");
    fs::write(&path, b"not a catalog").unwrap();

    assert!(load_snapshot(&path).is_err());
}

#[test]
fn test_missing_snapshot_is_io_error() {
    let dir = TempDir::new().unwrap();
    assert!(matches!(
        load_snapshot(dir.path().join("absent.bin")),
        Err(CatalogLoadError::Io(_))
    ));
}
