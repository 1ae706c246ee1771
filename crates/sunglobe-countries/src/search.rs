//! Country search: substring filter ordered by UTC offset, then name.

use std::cmp::Ordering;

use crate::country::Country;
use crate::timezone::utc_offset_hours;

/// Countries whose common name contains `term`, case-insensitively.
///
/// An empty term yields no results. Matches are ordered by the UTC offset of
/// their first timezone (west to east), ties broken alphabetically.
pub fn search<'a>(countries: &'a [Country], term: &str) -> Vec<&'a Country> {
    if term.is_empty() {
        return Vec::new();
    }
    let needle = term.to_lowercase();

    let mut matches: Vec<&Country> = countries
        .iter()
        .filter(|c| c.name.common.to_lowercase().contains(&needle))
        .collect();
    matches.sort_by(|a, b| compare_for_listing(a, b));
    matches
}

/// Listing order: UTC offset of the primary timezone, then common name.
pub fn compare_for_listing(a: &Country, b: &Country) -> Ordering {
    let offset_a = utc_offset_hours(a.primary_timezone());
    let offset_b = utc_offset_hours(b.primary_timezone());
    offset_a.total_cmp(&offset_b).then_with(|| {
        a.name
            .common
            .to_lowercase()
            .cmp(&b.name.common.to_lowercase())
            .then_with(|| a.name.common.cmp(&b.name.common))
    })
}

/// Find a country by exact common name, ignoring case.
pub fn find_by_name<'a>(countries: &'a [Country], name: &str) -> Option<&'a Country> {
    let wanted = name.trim().to_lowercase();
    countries
        .iter()
        .find(|c| c.name.common.to_lowercase() == wanted)
}
