//! Error types for the solar model.

/// Errors raised when converting raw host timestamps.
///
/// The estimator itself is total over `DateTime<Utc>`; only the raw-seconds
/// entry point can fail.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SolarError {
    /// The timestamp is NaN, infinite, or outside the representable date range.
    #[error("invalid timestamp: {0} seconds since the Unix epoch")]
    InvalidInput(f64),
}
