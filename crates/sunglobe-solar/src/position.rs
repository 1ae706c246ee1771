//! Sub-solar point estimation.
//!
//! Maps an instant to the point on Earth's surface where the sun is directly
//! overhead. Latitude is the solar declination; longitude follows the UTC
//! clock corrected by the equation of time.

use std::f64::consts::TAU;
use std::fmt;

use chrono::{DateTime, Datelike, Timelike, Utc};

use crate::error::SolarError;

/// Earth's axial tilt in degrees. Bounds the sub-solar latitude.
pub const EARTH_AXIAL_TILT_DEG: f64 = 23.439;

/// Mean length of a calendar year in days.
pub const DAYS_PER_YEAR: f64 = 365.25;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// The sub-solar point in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SunPosition {
    /// Latitude in degrees. Range: \[-23.439, 23.439\].
    pub latitude: f64,
    /// Longitude in degrees. Range: (-180, 180\].
    pub longitude: f64,
}

impl SunPosition {
    /// Create a sun position, normalizing the longitude into (-180, 180].
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude: normalize_longitude(longitude),
        }
    }
}

impl fmt::Display for SunPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lat_dir = if self.latitude >= 0.0 { "N" } else { "S" };
        let lon_dir = if self.longitude >= 0.0 { "E" } else { "W" };
        write!(
            f,
            "{:.2}\u{00B0}{}, {:.2}\u{00B0}{}",
            self.latitude.abs(),
            lat_dir,
            self.longitude.abs(),
            lon_dir,
        )
    }
}

/// Formula used for the solar declination.
///
/// The two variants are not numerically equivalent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DeclinationModel {
    /// `23.439 * sin(year_fraction)`, with the year fraction measured from
    /// January 1st. Cheap, but its phase is anchored to the calendar year
    /// rather than the March equinox, so solstices land about three months off.
    Sinusoidal,
    /// Spencer's (1971) seven-coefficient Fourier series, clamped to the
    /// axial tilt. Accurate to roughly 0.04 degrees.
    #[default]
    Fourier,
}

impl DeclinationModel {
    /// Declination in degrees for the given year fraction (radians).
    pub fn declination_deg(self, year_fraction: f64) -> f64 {
        match self {
            DeclinationModel::Sinusoidal => EARTH_AXIAL_TILT_DEG * year_fraction.sin(),
            DeclinationModel::Fourier => {
                let g = year_fraction;
                let radians = 0.006918 - 0.399912 * g.cos() + 0.070257 * g.sin()
                    - 0.006758 * (2.0 * g).cos()
                    + 0.000907 * (2.0 * g).sin()
                    - 0.002697 * (3.0 * g).cos()
                    + 0.00148 * (3.0 * g).sin();
                radians
                    .to_degrees()
                    .clamp(-EARTH_AXIAL_TILT_DEG, EARTH_AXIAL_TILT_DEG)
            }
        }
    }
}

/// Sun position estimator with a fixed declination model.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SunEstimator {
    /// Declination formula.
    pub model: DeclinationModel,
}

impl SunEstimator {
    /// Create an estimator using the given declination model.
    pub fn with_model(model: DeclinationModel) -> Self {
        Self { model }
    }

    /// Compute the sub-solar point at `instant`.
    pub fn compute(&self, instant: DateTime<Utc>) -> SunPosition {
        let year_fraction = year_fraction(instant);
        let latitude = self.model.declination_deg(year_fraction);
        let eot = equation_of_time_minutes(year_fraction);
        let longitude = 180.0 - (decimal_utc_hour(instant) * 15.0 + eot / 4.0);

        SunPosition {
            latitude,
            longitude: normalize_longitude(longitude),
        }
    }
}

/// Compute the sub-solar point at `instant` with the default declination model.
pub fn compute_sun_position(instant: DateTime<Utc>) -> SunPosition {
    SunEstimator::default().compute(instant)
}

/// Compute the sub-solar point from raw seconds since the Unix epoch.
///
/// # Errors
///
/// Returns [`SolarError::InvalidInput`] for non-finite values or instants
/// outside chrono's representable range.
pub fn sun_position_from_unix_seconds(
    seconds: f64,
    estimator: &SunEstimator,
) -> Result<SunPosition, SolarError> {
    let instant = instant_from_unix_seconds(seconds)?;
    Ok(estimator.compute(instant))
}

fn instant_from_unix_seconds(seconds: f64) -> Result<DateTime<Utc>, SolarError> {
    if !seconds.is_finite() || seconds.abs() >= i64::MAX as f64 {
        return Err(SolarError::InvalidInput(seconds));
    }
    let whole = seconds.floor();
    let nanos = (((seconds - whole) * 1e9) as u32).min(999_999_999);
    DateTime::from_timestamp(whole as i64, nanos).ok_or(SolarError::InvalidInput(seconds))
}

/// Zero-based day of the UTC calendar year, including the elapsed fraction
/// of the current day.
pub fn fractional_day_of_year(instant: DateTime<Utc>) -> f64 {
    let seconds_today =
        instant.num_seconds_from_midnight() as f64 + instant.nanosecond() as f64 * 1e-9;
    instant.ordinal0() as f64 + seconds_today / SECONDS_PER_DAY
}

/// Angular position in the year, `2π * doy / 365.25`, in radians.
pub fn year_fraction(instant: DateTime<Utc>) -> f64 {
    TAU * fractional_day_of_year(instant) / DAYS_PER_YEAR
}

/// Equation of time in minutes for the given year fraction.
///
/// Positive values mean the apparent sun runs ahead of the mean sun.
pub fn equation_of_time_minutes(year_fraction: f64) -> f64 {
    let g = year_fraction;
    229.18
        * (0.000075 + 0.001868 * g.cos()
            - 0.032077 * g.sin()
            - 0.014615 * (2.0 * g).cos()
            - 0.040849 * (2.0 * g).sin())
}

/// UTC time of day in decimal hours.
pub fn decimal_utc_hour(instant: DateTime<Utc>) -> f64 {
    let seconds = instant.second() as f64 + instant.nanosecond() as f64 * 1e-9;
    instant.hour() as f64 + instant.minute() as f64 / 60.0 + seconds / 3600.0
}

/// Normalize a longitude in degrees into (-180, 180].
///
/// Non-finite input is returned unchanged.
pub fn normalize_longitude(mut longitude: f64) -> f64 {
    if !longitude.is_finite() {
        return longitude;
    }
    while longitude > 180.0 {
        longitude -= 360.0;
    }
    while longitude <= -180.0 {
        longitude += 360.0;
    }
    longitude
}
