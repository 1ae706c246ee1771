//! Where the country list comes from: the REST Countries API or a JSON file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::info;

use crate::country::{Country, parse_countries};
use crate::error::CountryError;

/// A provider of the raw country list.
pub trait CountrySource {
    /// Fetch and validate the full list.
    fn fetch(&self) -> Result<Vec<Country>, CountryError>;
}

/// Fetches countries over HTTP.
pub struct HttpCountrySource {
    url: String,
    agent: ureq::Agent,
}

impl HttpCountrySource {
    /// Create a source for the full endpoint URL (including the query string).
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            url: url.into(),
            agent,
        }
    }

    /// The endpoint URL.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl CountrySource for HttpCountrySource {
    fn fetch(&self) -> Result<Vec<Country>, CountryError> {
        let response = self
            .agent
            .get(&self.url)
            .set("Accept", "application/json")
            .set("Cache-Control", "no-cache")
            .call()
            .map_err(|e| match e {
                ureq::Error::Status(code, response) => CountryError::Status {
                    code,
                    text: response.status_text().to_string(),
                },
                other => CountryError::Http(Box::new(other)),
            })?;

        let body = response.into_string().map_err(|source| CountryError::Io {
            path: PathBuf::from(&self.url),
            source,
        })?;
        let countries = parse_countries(&body)?;
        info!(count = countries.len(), url = %self.url, "fetched countries");
        Ok(countries)
    }
}

/// Reads countries from a JSON file in the API's format.
pub struct FileCountrySource {
    path: PathBuf,
}

impl FileCountrySource {
    /// Create a source reading `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CountrySource for FileCountrySource {
    fn fetch(&self) -> Result<Vec<Country>, CountryError> {
        let body = std::fs::read_to_string(&self.path).map_err(|source| CountryError::Io {
            path: self.path.clone(),
            source,
        })?;
        let countries = parse_countries(&body)?;
        info!(count = countries.len(), path = %self.path.display(), "loaded countries");
        Ok(countries)
    }
}

impl<S: CountrySource + ?Sized> CountrySource for Box<S> {
    fn fetch(&self) -> Result<Vec<Country>, CountryError> {
        (**self).fetch()
    }
}
