//! OS-specific directories for configuration and logs.

use std::path::{Path, PathBuf};

use sunglobe_config::Config;

use crate::error::AppError;

/// Where SunGlobe keeps its files.
#[derive(Clone, Debug, PartialEq)]
pub struct AppDirs {
    /// Holds `config.ron`.
    pub config_dir: PathBuf,
    /// JSON log files.
    pub log_dir: PathBuf,
}

impl AppDirs {
    /// Resolve the platform config directory, or use `override_dir` when given.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Config`] if the OS exposes no config directory.
    pub fn resolve(override_dir: Option<&Path>) -> Result<Self, AppError> {
        let config_dir = match override_dir {
            Some(dir) => dir.to_path_buf(),
            None => Config::default_dir()?,
        };
        Ok(Self::with_root(config_dir))
    }

    /// Lay out directories under an explicit root.
    pub fn with_root(config_dir: PathBuf) -> Self {
        let log_dir = config_dir.join("logs");
        Self {
            config_dir,
            log_dir,
        }
    }

    /// Create all directories on disk.
    pub fn create(&self) -> Result<(), AppError> {
        for dir in [&self.config_dir, &self.log_dir] {
            std::fs::create_dir_all(dir).map_err(|source| AppError::Io {
                path: dir.clone(),
                source,
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_dir_is_used() {
        let tmp = tempfile::tempdir().unwrap();
        let dirs = AppDirs::resolve(Some(tmp.path())).unwrap();
        assert_eq!(dirs.config_dir, tmp.path());
        assert_eq!(dirs.log_dir, tmp.path().join("logs"));
    }

    #[test]
    fn test_create_makes_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let dirs = AppDirs::with_root(tmp.path().join("sunglobe"));
        dirs.create().unwrap();
        assert!(dirs.config_dir.is_dir());
        assert!(dirs.log_dir.is_dir());
    }
}
