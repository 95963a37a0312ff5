//! Path management for zbb
//!
//! ## Path Resolution Order
//!
//! 1. `ZBB_DATA_DIR` environment variable (if set)
//! 2. The platform configuration directory reported by `directories`
//!    (`~/.config/zbb` on Linux, `~/Library/Application Support/zbb` on macOS,
//!    `%APPDATA%\zbb\config` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::ZbbError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "ZBB_DATA_DIR";

/// Manages all paths used by zbb
#[derive(Debug, Clone)]
pub struct ZbbPaths {
    /// Base directory for all zbb data
    base_dir: PathBuf,
}

impl ZbbPaths {
    /// Create a new ZbbPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined and no
    /// override is set.
    pub fn new() -> Result<Self, ZbbError> {
        let base_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create ZbbPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Directory holding one JSON document per storage key
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), ZbbError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| ZbbError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| ZbbError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if zbb has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, ZbbError> {
    ProjectDirs::from("", "", "zbb")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| ZbbError::Config("Could not determine a home directory".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ZbbPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
        assert_eq!(paths.audit_log(), temp_dir.path().join("audit.log"));
    }

    #[test]
    fn test_env_var_override() {
        let temp_dir = TempDir::new().unwrap();

        std::env::set_var(DATA_DIR_ENV, temp_dir.path());
        let paths = ZbbPaths::new().unwrap();
        std::env::remove_var(DATA_DIR_ENV);

        assert_eq!(paths.base_dir(), temp_dir.path());
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ZbbPaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();

        assert!(paths.data_dir().exists());
        assert!(!paths.is_initialized());
    }
}
