//! Sun position estimation and day/night illumination for the globe.

mod error;
pub mod illumination;
pub mod position;
pub mod tracker;

pub use error::SolarError;
pub use illumination::{
    IlluminationState, IlluminationUniform, TERMINATOR_HALF_WIDTH, blend_day_night,
    direction_to_sun_position, effective_sun_angle, illumination_factor,
    illumination_factor_with_band, smoothstep, sun_direction,
};
pub use position::{
    DeclinationModel, EARTH_AXIAL_TILT_DEG, SunEstimator, SunPosition, compute_sun_position,
    equation_of_time_minutes, fractional_day_of_year, normalize_longitude,
    sun_position_from_unix_seconds,
};
pub use tracker::{
    Clock, DEFAULT_UPDATE_INTERVAL, FixedClock, IlluminationSink, SunTracker, SystemClock,
    UpdateTrigger,
};
