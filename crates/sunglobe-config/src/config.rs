//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name of the persisted configuration inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.ron";

const APP_NAME: &str = "sunglobe";

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Globe presentation settings.
    pub globe: GlobeConfig,
    /// Sun tracking and terminator shading.
    pub sun: SunConfig,
    /// Country catalog source.
    pub countries: CountriesConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Globe presentation configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GlobeConfig {
    /// Globe radius in scene units.
    pub radius: f64,
    /// Camera altitude (in globe radii) used for the initial view over the sub-solar point.
    pub default_altitude: f64,
    /// Camera altitude used when flying to a selected country.
    pub selection_altitude: f64,
    /// Duration of the fly-to animation in milliseconds.
    pub fly_to_duration_ms: u64,
    /// Daytime surface texture.
    pub day_texture_url: String,
    /// Night-lights surface texture.
    pub night_texture_url: String,
    /// Bump map for the surface relief.
    pub bump_texture_url: String,
}

/// Which declination formula the sun estimator uses.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
pub enum DeclinationFormula {
    /// Single-term `23.439 * sin(year_fraction)`.
    Sinusoidal,
    /// Spencer's Fourier series.
    #[default]
    Fourier,
}

/// Sun tracking configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SunConfig {
    /// Seconds between periodic sun position refreshes.
    pub update_interval_seconds: u64,
    /// Half width of the soft terminator band, in units of `dot(normal, sun)`.
    pub terminator_half_width: f64,
    /// Declination formula.
    pub declination: DeclinationFormula,
}

/// Country catalog configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CountriesConfig {
    /// Base URL of the REST Countries API (without the `/all` suffix).
    pub api_base_url: String,
    /// Comma-separated list of fields requested from the API.
    pub fields: String,
    /// HTTP timeout in seconds.
    pub timeout_seconds: u64,
    /// Load countries from this JSON file instead of the API.
    pub local_file: Option<PathBuf>,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Also write JSON logs to the log directory.
    pub log_to_file: bool,
}

// --- Default implementations ---

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            radius: 100.0,
            default_altitude: 2.5,
            selection_altitude: 1.5,
            fly_to_duration_ms: 1000,
            day_texture_url: "//unpkg.com/three-globe/example/img/earth-blue-marble.jpg"
                .to_string(),
            night_texture_url: "//unpkg.com/three-globe/example/img/earth-night.jpg".to_string(),
            bump_texture_url: "//unpkg.com/three-globe/example/img/earth-topology.png"
                .to_string(),
        }
    }
}

impl Default for SunConfig {
    fn default() -> Self {
        Self {
            update_interval_seconds: 60,
            terminator_half_width: 0.2,
            declination: DeclinationFormula::default(),
        }
    }
}

impl Default for CountriesConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://restcountries.com/v3.1".to_string(),
            fields: "name,latlng,timezones".to_string(),
            timeout_seconds: 10,
            local_file: None,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_to_file: cfg!(debug_assertions),
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Default configuration directory for this platform.
    pub fn default_dir() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|base| base.join(APP_NAME))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    /// Full URL of the country list endpoint.
    pub fn countries_url(&self) -> String {
        format!(
            "{}/all?fields={}",
            self.countries.api_base_url.trim_end_matches('/'),
            self.countries.fields
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("update_interval_seconds: 60"));
        assert!(ron_str.contains("declination: Fourier"));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.countries.local_file = Some(PathBuf::from("countries.json"));
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_section_uses_default() {
        let ron_str = "(globe: (), debug: ())";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.sun, SunConfig::default());
        assert_eq!(config.countries, CountriesConfig::default());
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let ron_str = "(sun: (update_interval_seconds: 5))";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.sun.update_interval_seconds, 5);
        assert!((config.sun.terminator_half_width - 0.2).abs() < f64::EPSILON);
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.sun.declination = DeclinationFormula::Sinusoidal;
        config.globe.selection_altitude = 1.2;

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join(CONFIG_FILE_NAME).exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.sun.update_interval_seconds = 30;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert_eq!(result.unwrap().sun.update_interval_seconds, 30);
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        assert!(config.reload(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "{{not valid}}").unwrap();
        let result = Config::load_or_create(dir.path());
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_countries_url() {
        let mut config = Config::default();
        config.countries.api_base_url = "http://localhost:8080/api/".to_string();
        assert_eq!(
            config.countries_url(),
            "http://localhost:8080/api/all?fields=name,latlng,timezones"
        );
    }
}
