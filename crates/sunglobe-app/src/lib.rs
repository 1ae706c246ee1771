//! SunGlobe application layer: the globe view model, the day/night material,
//! and the session that wires the sun tracker to both.

pub mod error;
pub mod globe;
pub mod material;
pub mod platform;
pub mod session;

use std::time::Duration;

use sunglobe_config::Config;
use sunglobe_countries::{CountrySource, FileCountrySource, HttpCountrySource};

pub use error::AppError;
pub use globe::{GlobeView, PinMarker, PointOfView};
pub use material::{GlobeMaterial, GlobeTextures};
pub use platform::AppDirs;
pub use session::{GlobeSession, declination_model, estimator_from_config};

/// The country source selected by `config`: a local file when configured,
/// the REST API otherwise.
pub fn country_source(config: &Config) -> Box<dyn CountrySource> {
    match &config.countries.local_file {
        Some(path) => Box::new(FileCountrySource::new(path.clone())),
        None => Box::new(HttpCountrySource::new(
            config.countries_url(),
            Duration::from_secs(config.countries.timeout_seconds),
        )),
    }
}
