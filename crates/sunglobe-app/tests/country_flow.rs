use chrono::{TimeZone, Utc};
use sunglobe_app::{GlobeSession, country_source};
use sunglobe_config::Config;
use sunglobe_countries::{CountryCatalog, find_by_name};
use sunglobe_solar::{FixedClock, sun_direction};

const COUNTRIES: &str = r#"[
    {"name": {"common": "Japan", "official": "Japan"}, "latlng": [36.0, 138.0], "timezones": ["UTC+09:00"]},
    {"name": {"common": "Brazil", "official": "Federative Republic of Brazil"}, "latlng": [-10.0, -55.0], "timezones": ["UTC-05:00", "UTC-04:00", "UTC-03:00", "UTC-02:00"]},
    {"name": {"common": "Jamaica"}, "latlng": [18.25, -77.5], "timezones": ["UTC-05:00"]}
]"#;

fn config_with_file(dir: &tempfile::TempDir) -> Config {
    let path = dir.path().join("countries.json");
    std::fs::write(&path, COUNTRIES).unwrap();
    let mut config = Config::default();
    config.countries.local_file = Some(path);
    config
}

#[test]
fn search_orders_matches_by_offset() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_with_file(&dir);
    let mut catalog = CountryCatalog::new(country_source(&config));
    catalog.get(false).unwrap();

    let names: Vec<&str> = catalog
        .search("a")
        .iter()
        .map(|c| c.name.common.as_str())
        .collect();
    assert_eq!(names, vec!["Brazil", "Jamaica", "Japan"]);
}

#[test]
fn selecting_country_at_local_noon_is_daylit() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_with_file(&dir);
    let mut catalog = CountryCatalog::new(country_source(&config));
    let countries = catalog.get(false).unwrap();
    let japan = find_by_name(countries, "japan").unwrap();

    // 03:00 UTC is around solar noon at 138E.
    let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 6, 21, 3, 0, 0).unwrap());
    let mut session = GlobeSession::new(&config, clock);
    session.start();
    let pov = session.select(japan);

    assert_eq!(pov.latitude, 36.0);
    assert_eq!(session.view().selected(), Some("Japan"));

    let normal = sun_direction(japan.latitude(), japan.longitude().to_radians());
    assert_eq!(session.material().illumination_at(normal), 1.0);
}

#[test]
fn selecting_country_at_local_midnight_is_dark() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_with_file(&dir);
    let mut catalog = CountryCatalog::new(country_source(&config));
    let countries = catalog.get(false).unwrap();
    let japan = find_by_name(countries, "Japan").unwrap();

    let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 12, 21, 15, 0, 0).unwrap());
    let mut session = GlobeSession::new(&config, clock);
    session.start();

    let normal = sun_direction(japan.latitude(), japan.longitude().to_radians());
    assert_eq!(session.material().illumination_at(normal), 0.0);
}
