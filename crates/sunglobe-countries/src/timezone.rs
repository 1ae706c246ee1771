//! UTC offset strings (`"UTC+05:30"`) and the clock labels derived from them.

use chrono::{DateTime, FixedOffset, Utc};

/// Label shown when a local time cannot be derived.
pub const UNKNOWN_TIME: &str = "N/A";

/// Parse a `UTC±HH[:MM]` string into fractional hours.
///
/// `"UTC"` alone is zero. Returns `None` for strings that do not start with
/// `UTC` or whose offset is not numeric.
pub fn parse_utc_offset(timezone: &str) -> Option<f64> {
    let offset = timezone.trim().strip_prefix("UTC")?;
    if offset.is_empty() {
        return Some(0.0);
    }

    let negative = offset.starts_with('-');
    let sign = if negative { -1.0 } else { 1.0 };
    let digits = offset.trim_start_matches(['+', '-']);

    match digits.split_once(':') {
        Some((hours, minutes)) => {
            let hours: u32 = hours.parse().ok()?;
            let minutes: u32 = minutes.parse().ok()?;
            if minutes >= 60 {
                return None;
            }
            Some(sign * (hours as f64 + minutes as f64 / 60.0))
        }
        None => digits.parse::<f64>().ok().map(|h| sign * h),
    }
}

/// Offset in hours used for ordering; unparseable strings sort as UTC.
pub fn utc_offset_hours(timezone: &str) -> f64 {
    parse_utc_offset(timezone).unwrap_or(0.0)
}

/// Display label with `UTC` replaced by `GMT`, e.g. `"GMT+02:00"`.
pub fn gmt_label(timezone: &str) -> String {
    timezone.replace("UTC", "GMT")
}

/// The chrono offset for a `UTC±HH:MM` string.
pub fn fixed_offset(timezone: &str) -> Option<FixedOffset> {
    let hours = parse_utc_offset(timezone)?;
    let seconds = (hours * 3600.0).round() as i32;
    FixedOffset::east_opt(seconds)
}

/// 12-hour wall-clock label (`"07:45 PM"`) at the given offset, or
/// [`UNKNOWN_TIME`] if the offset cannot be parsed.
pub fn local_time_label(timezone: &str, now: DateTime<Utc>) -> String {
    match fixed_offset(timezone) {
        Some(offset) => now.with_timezone(&offset).format("%I:%M %p").to_string(),
        None => UNKNOWN_TIME.to_string(),
    }
}
