//! Country records as served by the REST Countries API.
//!
//! The API payload is loosely typed; every entry is decoded on its own so
//! one malformed record does not discard the whole list.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::CountryError;

/// Timezone assumed when a record lists none.
pub const DEFAULT_TIMEZONE: &str = "UTC";

/// Common and official country names.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CountryName {
    /// Short everyday name, e.g. "Germany".
    pub common: String,
    /// Official name, e.g. "Federal Republic of Germany".
    pub official: String,
}

/// A validated country record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Country {
    /// Country names.
    pub name: CountryName,
    /// `[latitude, longitude]` of the country's reference point, in degrees.
    pub latlng: [f64; 2],
    /// UTC offset strings such as `"UTC+05:30"`. Never empty.
    pub timezones: Vec<String>,
}

impl Country {
    /// Latitude in degrees.
    pub fn latitude(&self) -> f64 {
        self.latlng[0]
    }

    /// Longitude in degrees.
    pub fn longitude(&self) -> f64 {
        self.latlng[1]
    }

    /// The first listed timezone.
    pub fn primary_timezone(&self) -> &str {
        self.timezones
            .first()
            .map(String::as_str)
            .unwrap_or(DEFAULT_TIMEZONE)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawName {
    common: Option<String>,
    official: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawCountry {
    name: Option<RawName>,
    latlng: Option<Vec<f64>>,
    timezones: Option<Vec<String>>,
}

impl RawCountry {
    fn validate(self) -> Option<Country> {
        let name = self.name?;
        let common = name.common.filter(|c| !c.trim().is_empty())?;
        let official = name
            .official
            .filter(|o| !o.trim().is_empty())
            .unwrap_or_else(|| common.clone());

        let latlng = match self.latlng.as_deref() {
            Some(&[lat, lng])
                if lat.is_finite()
                    && lng.is_finite()
                    && (-90.0..=90.0).contains(&lat)
                    && (-180.0..=180.0).contains(&lng) =>
            {
                [lat, lng]
            }
            _ => return None,
        };

        let timezones = match self.timezones {
            Some(tz) if !tz.is_empty() => tz,
            _ => vec![DEFAULT_TIMEZONE.to_string()],
        };

        Some(Country {
            name: CountryName { common, official },
            latlng,
            timezones,
        })
    }
}

/// Parse and validate a JSON array of country records.
///
/// Entries missing a common name or a two-element `latlng` are dropped.
///
/// # Errors
///
/// [`CountryError::Parse`] if the payload is not a JSON array,
/// [`CountryError::Empty`] if the array is empty, and
/// [`CountryError::NoValidCountries`] if every entry was dropped.
pub fn parse_countries(json: &str) -> Result<Vec<Country>, CountryError> {
    let entries: Vec<serde_json::Value> =
        serde_json::from_str(json).map_err(CountryError::Parse)?;
    if entries.is_empty() {
        return Err(CountryError::Empty);
    }

    let total = entries.len();
    let countries: Vec<Country> = entries
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<RawCountry>(value) {
            Ok(raw) => raw.validate(),
            Err(e) => {
                debug!("skipping malformed country record: {e}");
                None
            }
        })
        .collect();

    if countries.is_empty() {
        return Err(CountryError::NoValidCountries(total));
    }
    if countries.len() < total {
        warn!(
            dropped = total - countries.len(),
            total, "dropped invalid country records"
        );
    }
    Ok(countries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_record() {
        let json = r#"[{
            "name": {"common": "Japan", "official": "Japan", "nativeName": {}},
            "latlng": [36.0, 138.0],
            "timezones": ["UTC+09:00"]
        }]"#;
        let countries = parse_countries(json).unwrap();
        assert_eq!(countries.len(), 1);
        assert_eq!(countries[0].name.common, "Japan");
        assert_eq!(countries[0].latitude(), 36.0);
        assert_eq!(countries[0].longitude(), 138.0);
        assert_eq!(countries[0].primary_timezone(), "UTC+09:00");
    }

    #[test]
    fn test_official_falls_back_to_common() {
        let json = r#"[{"name": {"common": "Chad"}, "latlng": [15.0, 19.0], "timezones": ["UTC+01:00"]}]"#;
        let countries = parse_countries(json).unwrap();
        assert_eq!(countries[0].name.official, "Chad");
    }

    #[test]
    fn test_missing_timezones_default_to_utc() {
        let json = r#"[{"name": {"common": "Bouvet Island"}, "latlng": [-54.4, 3.4]}]"#;
        let countries = parse_countries(json).unwrap();
        assert_eq!(countries[0].timezones, vec!["UTC".to_string()]);
    }

    #[test]
    fn test_invalid_records_are_dropped() {
        let json = r#"[
            {"name": {"common": "Peru"}, "latlng": [-10.0, -76.0], "timezones": ["UTC-05:00"]},
            {"name": {"common": ""}, "latlng": [1.0, 2.0]},
            {"name": {"common": "Nowhere"}, "latlng": [1.0]},
            {"name": {"common": "Bad"}, "latlng": "north"},
            {"latlng": [1.0, 2.0]},
            42
        ]"#;
        let countries = parse_countries(json).unwrap();
        assert_eq!(countries.len(), 1);
        assert_eq!(countries[0].name.common, "Peru");
    }

    #[test]
    fn test_out_of_range_coordinates_rejected() {
        let json = r#"[{"name": {"common": "Atlantis"}, "latlng": [95.0, 10.0]}]"#;
        assert!(matches!(
            parse_countries(json),
            Err(CountryError::NoValidCountries(1))
        ));
    }

    #[test]
    fn test_empty_array_is_error() {
        assert!(matches!(parse_countries("[]"), Err(CountryError::Empty)));
    }

    #[test]
    fn test_non_array_is_parse_error() {
        assert!(matches!(
            parse_countries(r#"{"status": 404}"#),
            Err(CountryError::Parse(_))
        ));
    }

    #[test]
    fn test_country_serializes_back() {
        let json = r#"[{"name": {"common": "Chile", "official": "Republic of Chile"}, "latlng": [-30.0, -71.0], "timezones": ["UTC-06:00", "UTC-04:00"]}]"#;
        let countries = parse_countries(json).unwrap();
        let out = serde_json::to_string(&countries).unwrap();
        assert_eq!(parse_countries(&out).unwrap(), countries);
    }
}
