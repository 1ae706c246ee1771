//! Country catalog for the globe: fetching, validation, caching, search, and
//! local-time labels.

mod catalog;
mod country;
mod error;
mod search;
mod source;
pub mod timezone;

pub use catalog::CountryCatalog;
pub use country::{Country, CountryName, DEFAULT_TIMEZONE, parse_countries};
pub use error::CountryError;
pub use search::{compare_for_listing, find_by_name, search};
pub use source::{CountrySource, FileCountrySource, HttpCountrySource};
pub use timezone::{gmt_label, local_time_label, parse_utc_offset, utc_offset_hours};
