//! Application Configuration
//!
//! Settings read from `records-grid.toml` under the platform config dir.
//! Missing keys fall back to defaults; an empty file is a valid config.

use std::path::{Path, PathBuf};

use locale_config::Locale;
use serde::Deserialize;
use tracing::{error, info};

use crate::constants::{DEFAULT_LAYOUT_KEY, DEFAULT_PAGE_SIZE};
use crate::error::Result;
use crate::helpers::get_or_create_config_dir;

/// Environment variable overriding `api_url`
pub const API_URL_ENV: &str = "RECORDS_GRID_API_URL";

const CONFIG_FILE_NAME: &str = "records-grid.toml";
const LIGHT_THEME_MODE: &str = "light";
const DARK_THEME_MODE: &str = "dark";

fn get_config_path() -> Result<PathBuf> {
    let config_dir = get_or_create_config_dir()?;
    let path = config_dir.join(CONFIG_FILE_NAME);
    if !path.exists() {
        std::fs::write(&path, "")?;
    }
    Ok(path)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemePreference {
    Light,
    Dark,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Records endpoint; the bundled sample data is used when unset
    api_url: Option<String>,
    storage_key: String,
    page_size: usize,
    locale: Option<String>,
    theme: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            storage_key: DEFAULT_LAYOUT_KEY.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            locale: None,
            theme: None,
        }
    }
}

impl AppConfig {
    /// Load from the platform config dir, applying environment overrides
    pub fn try_load() -> Result<Self> {
        let path = get_config_path()?;
        let mut config = Self::load_from(&path)?;
        config.apply_overrides(std::env::var(API_URL_ENV).ok());
        Ok(config)
    }

    /// Load a config file without touching the environment
    pub fn load_from(path: &Path) -> Result<Self> {
        info!(path = ?path, "Loading config file");
        let value = std::fs::read_to_string(path)?;
        Self::parse(&value).inspect_err(|e| {
            error!(error = %e, path = ?path, "Failed to parse config file");
        })
    }

    pub fn parse(value: &str) -> Result<Self> {
        let mut config: Self = if value.trim().is_empty() {
            Self::default()
        } else {
            toml::from_str(value)?
        };

        // Detect system locale if not set
        if config.locale.as_ref().is_none_or(|l| l.is_empty()) {
            if let Some((lang, _)) = Locale::current().to_string().split_once('-') {
                config.locale = Some(lang.to_string());
            }
        }
        Ok(config)
    }

    pub fn apply_overrides(&mut self, api_url: Option<String>) {
        if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
            info!(url = %url, "Using records endpoint from environment");
            self.api_url = Some(url.trim().to_string());
        }
    }

    // ==================== Getters ====================

    pub fn api_url(&self) -> Option<&str> {
        self.api_url.as_deref().filter(|u| !u.is_empty())
    }

    pub fn storage_key(&self) -> &str {
        if self.storage_key.trim().is_empty() {
            DEFAULT_LAYOUT_KEY
        } else {
            &self.storage_key
        }
    }

    /// Configured page size, at least 1
    pub fn page_size(&self) -> usize {
        self.page_size.max(1)
    }

    pub fn locale(&self) -> &str {
        self.locale.as_deref().unwrap_or("en")
    }

    pub fn theme(&self) -> Option<ThemePreference> {
        match self.theme.as_deref() {
            Some(LIGHT_THEME_MODE) => Some(ThemePreference::Light),
            Some(DARK_THEME_MODE) => Some(ThemePreference::Dark),
            _ => None,
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = AppConfig::parse("   \n").expect("parse");
        assert_eq!(config.api_url(), None);
        assert_eq!(config.storage_key(), DEFAULT_LAYOUT_KEY);
        assert_eq!(config.page_size(), DEFAULT_PAGE_SIZE);
        assert!(!config.locale().is_empty());
    }

    #[test]
    fn test_parse_values() {
        let config = AppConfig::parse(
            r#"
            api_url = "http://localhost:3000/api/records"
            storage_key = "ops-records"
            page_size = 50
            locale = "ja"
            theme = "dark"
            "#,
        )
        .expect("parse");
        assert_eq!(config.api_url(), Some("http://localhost:3000/api/records"));
        assert_eq!(config.storage_key(), "ops-records");
        assert_eq!(config.page_size(), 50);
        assert_eq!(config.locale(), "ja");
        assert_eq!(config.theme(), Some(ThemePreference::Dark));
    }

    #[test]
    fn test_invalid_toml_is_error() {
        assert!(AppConfig::parse("page_size = [").is_err());
    }

    #[test]
    fn test_env_override() {
        let mut config = AppConfig::parse(r#"api_url = "http://a""#).expect("parse");
        config.apply_overrides(Some("  ".to_string()));
        assert_eq!(config.api_url(), Some("http://a"));
        config.apply_overrides(Some("http://b ".to_string()));
        assert_eq!(config.api_url(), Some("http://b"));
    }

    #[test]
    fn test_zero_page_size_and_blank_key_fall_back() {
        let config = AppConfig::parse("page_size = 0\nstorage_key = \"\"").expect("parse");
        assert_eq!(config.page_size(), 1);
        assert_eq!(config.storage_key(), DEFAULT_LAYOUT_KEY);
    }

    #[test]
    fn test_load_from_file() {
        let dir = std::env::temp_dir().join(format!("records-grid-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("mkdir");
        let path = dir.join(CONFIG_FILE_NAME);
        std::fs::write(&path, "locale = \"ja\"\npage_size = 100\n").expect("write");

        let loaded = AppConfig::load_from(&path).expect("load");
        assert_eq!(loaded.locale(), "ja");
        assert_eq!(loaded.page_size(), 100);
        std::fs::remove_dir_all(&dir).ok();
    }
}
