//! Application-level errors.

use sunglobe_config::ConfigError;
use sunglobe_countries::CountryError;

/// Errors surfaced by the `sunglobe` binary.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration could not be loaded or saved.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The country list could not be loaded.
    #[error(transparent)]
    Countries(#[from] CountryError),

    /// No country matched the requested name.
    #[error("no country named {0:?}")]
    UnknownCountry(String),

    /// Creating an application directory failed.
    #[error("failed to create {path}: {source}")]
    Io {
        /// Directory that could not be created.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
