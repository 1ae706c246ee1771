//! Country catalog error types.

use std::path::PathBuf;

/// Errors that can occur while loading the country list.
#[derive(Debug, thiserror::Error)]
pub enum CountryError {
    /// The request could not be sent or the connection failed.
    #[error("failed to fetch countries: {0}")]
    Http(#[source] Box<ureq::Error>),

    /// The server answered with a non-success status.
    #[error("failed to fetch countries: {code} {text}")]
    Status {
        /// HTTP status code.
        code: u16,
        /// HTTP status text.
        text: String,
    },

    /// Reading the response body or a local file failed.
    #[error("failed to read countries from {path}: {source}")]
    Io {
        /// Where the read was attempted (URL or file path).
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The payload was not a JSON array.
    #[error("failed to parse country data: {0}")]
    Parse(#[source] serde_json::Error),

    /// The payload was an empty array.
    #[error("no country data received")]
    Empty,

    /// The payload contained entries but none were usable.
    #[error("no valid countries found among {0} entries")]
    NoValidCountries(usize),
}
