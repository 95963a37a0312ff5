//! User settings for zbb
//!
//! Stored as `config.json` in the base directory. Every field carries a serde
//! default so older or partial files keep loading.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::paths::ZbbPaths;
use crate::error::ZbbError;
use crate::models::Catalog;

/// User settings for zbb
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol appended to formatted amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Enable the Debt transaction type and debt categories
    #[serde(default)]
    pub debt_tracking: bool,

    /// Default directory for spreadsheet exports (current directory if unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "₫".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            debt_tracking: false,
            export_dir: None,
        }
    }
}

impl Settings {
    /// The category catalog matching the configured variant
    pub fn catalog(&self) -> Catalog {
        if self.debt_tracking {
            Catalog::extended()
        } else {
            Catalog::standard()
        }
    }

    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &ZbbPaths) -> Result<Self, ZbbError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| ZbbError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| ZbbError::Config(format!("Failed to parse settings file: {}", e)))
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ZbbPaths) -> Result<(), ZbbError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ZbbError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| ZbbError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionType;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.currency_symbol, "₫");
        assert!(!settings.debt_tracking);
        assert!(settings.export_dir.is_none());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ZbbPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.debt_tracking = true;
        settings.export_dir = Some(temp_dir.path().join("exports"));
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert!(loaded.debt_tracking);
        assert_eq!(loaded.export_dir, settings.export_dir);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ZbbPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"debt_tracking": true}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert!(loaded.debt_tracking);
        assert_eq!(loaded.currency_symbol, "₫");
        assert_eq!(loaded.schema_version, 1);
    }

    #[test]
    fn test_catalog_follows_debt_tracking() {
        let mut settings = Settings::default();
        assert!(settings.catalog().for_type(TransactionType::Debt).is_empty());

        settings.debt_tracking = true;
        assert!(!settings.catalog().for_type(TransactionType::Debt).is_empty());
    }
}
