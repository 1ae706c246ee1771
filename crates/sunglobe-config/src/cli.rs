//! Command-line overrides for SunGlobe.

use std::path::PathBuf;

use clap::Args;

use crate::{Config, DeclinationFormula};

/// Global command-line arguments shared by every `sunglobe` subcommand.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Args, Debug, Default, Clone)]
pub struct CliArgs {
    /// Log level (error, warn, info, debug, trace).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Base URL of the country API.
    #[arg(long, global = true)]
    pub countries_url: Option<String>,

    /// Read countries from a JSON file instead of the API.
    #[arg(long, global = true)]
    pub countries_file: Option<PathBuf>,

    /// Seconds between periodic sun refreshes.
    #[arg(long, global = true)]
    pub update_interval: Option<u64>,

    /// Declination formula used by the sun estimator.
    #[arg(long, global = true, value_enum)]
    pub declination: Option<DeclinationFormula>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        if let Some(ref url) = args.countries_url {
            self.countries.api_base_url = url.clone();
        }
        if let Some(ref path) = args.countries_file {
            self.countries.local_file = Some(path.clone());
        }
        if let Some(secs) = args.update_interval {
            self.sun.update_interval_seconds = secs;
        }
        if let Some(formula) = args.declination {
            self.sun.declination = formula;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            update_interval: Some(15),
            declination: Some(DeclinationFormula::Sinusoidal),
            countries_file: Some(PathBuf::from("/tmp/countries.json")),
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.sun.update_interval_seconds, 15);
        assert_eq!(config.sun.declination, DeclinationFormula::Sinusoidal);
        assert_eq!(
            config.countries.local_file.as_deref(),
            Some(std::path::Path::new("/tmp/countries.json"))
        );
        // Non-overridden fields retain defaults
        assert_eq!(config.debug.log_level, "info");
        assert_eq!(config.countries.api_base_url, "https://restcountries.com/v3.1");
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }
}
