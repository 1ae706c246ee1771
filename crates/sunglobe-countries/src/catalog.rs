//! In-memory country cache in front of a [`CountrySource`].

use tracing::{debug, error};

use crate::country::Country;
use crate::error::CountryError;
use crate::search::search;
use crate::source::CountrySource;

/// Caches the country list fetched from a source.
pub struct CountryCatalog<S> {
    source: S,
    cache: Option<Vec<Country>>,
    fetch_count: u32,
}

impl<S: CountrySource> CountryCatalog<S> {
    /// Create an empty catalog over `source`.
    pub fn new(source: S) -> Self {
        Self {
            source,
            cache: None,
            fetch_count: 0,
        }
    }

    /// The country list, fetching it when nothing is cached or when
    /// `force_refresh` is set.
    ///
    /// A failed refresh leaves the previous cache in place.
    pub fn get(&mut self, force_refresh: bool) -> Result<&[Country], CountryError> {
        if force_refresh || self.cache.is_none() {
            let countries = self.source.fetch()?;
            self.fetch_count += 1;
            debug!(count = countries.len(), force_refresh, "country cache filled");
            self.cache = Some(countries);
        }
        Ok(self.cache.as_deref().unwrap_or_default())
    }

    /// Like [`get`](Self::get) without a forced refresh, but logs failures
    /// and falls back to an empty list so the globe can still start.
    pub fn load_or_empty(&mut self) -> &[Country] {
        if let Err(e) = self.get(false) {
            error!("Failed to load countries: {e}");
        }
        self.cached().unwrap_or_default()
    }

    /// Search the cached list. Returns nothing when the cache is empty.
    pub fn search(&self, term: &str) -> Vec<&Country> {
        self.cached().map(|c| search(c, term)).unwrap_or_default()
    }

    /// The cached list, if any.
    pub fn cached(&self) -> Option<&[Country]> {
        self.cache.as_deref()
    }

    /// Drop the cached list.
    pub fn invalidate(&mut self) {
        self.cache = None;
    }

    /// Number of successful fetches performed.
    pub fn fetch_count(&self) -> u32 {
        self.fetch_count
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::country::CountryName;

    struct CountingSource {
        calls: Cell<u32>,
        fail: Cell<bool>,
    }

    impl CountingSource {
        fn new() -> Self {
            Self {
                calls: Cell::new(0),
                fail: Cell::new(false),
            }
        }
    }

    impl CountrySource for CountingSource {
        fn fetch(&self) -> Result<Vec<Country>, CountryError> {
            self.calls.set(self.calls.get() + 1);
            if self.fail.get() {
                return Err(CountryError::Empty);
            }
            Ok(vec![Country {
                name: CountryName {
                    common: format!("Country {}", self.calls.get()),
                    official: String::new(),
                },
                latlng: [1.0, 2.0],
                timezones: vec!["UTC".to_string()],
            }])
        }
    }

    #[test]
    fn test_second_get_uses_cache() {
        let mut catalog = CountryCatalog::new(CountingSource::new());
        catalog.get(false).unwrap();
        let second = catalog.get(false).unwrap();
        assert_eq!(second[0].name.common, "Country 1");
        assert_eq!(catalog.fetch_count(), 1);
    }

    #[test]
    fn test_force_refresh_refetches() {
        let mut catalog = CountryCatalog::new(CountingSource::new());
        catalog.get(false).unwrap();
        let refreshed = catalog.get(true).unwrap();
        assert_eq!(refreshed[0].name.common, "Country 2");
        assert_eq!(catalog.fetch_count(), 2);
    }

    #[test]
    fn test_failed_refresh_keeps_cache() {
        let mut catalog = CountryCatalog::new(CountingSource::new());
        catalog.get(false).unwrap();
        catalog.source.fail.set(true);
        assert!(catalog.get(true).is_err());
        assert_eq!(catalog.cached().unwrap()[0].name.common, "Country 1");
    }

    #[test]
    fn test_load_or_empty_on_failure() {
        let source = CountingSource::new();
        source.fail.set(true);
        let mut catalog = CountryCatalog::new(source);
        assert!(catalog.load_or_empty().is_empty());
        assert!(catalog.search("country").is_empty());
    }

    #[test]
    fn test_invalidate_forces_fetch() {
        let mut catalog = CountryCatalog::new(CountingSource::new());
        catalog.get(false).unwrap();
        catalog.invalidate();
        assert!(catalog.cached().is_none());
        catalog.get(false).unwrap();
        assert_eq!(catalog.fetch_count(), 2);
    }

    #[test]
    fn test_search_cached() {
        let mut catalog = CountryCatalog::new(CountingSource::new());
        catalog.get(false).unwrap();
        assert_eq!(catalog.search("COUNTRY").len(), 1);
        assert!(catalog.search("").is_empty());
    }
}
