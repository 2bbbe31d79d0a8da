//! User configuration loaded from `~/.config/inkpad/config.toml`.
//!
//! ```toml
//! theme = "nord"
//! locale = "fr"
//!
//! [palette]
//! debounce_ms = 150
//! shortcut = "mod+k"
//!
//! [logging]
//! level = "info"
//! file = true
//! ```
//!
//! Every key is optional. A missing file yields the defaults; a file that
//! exists but cannot be parsed is an error.

use crate::domain::action::DEFAULT_LOCALE;
use crate::error::{Error, Result};
use crate::theme::PaletteType;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const APP_DIR: &str = "inkpad";
pub const DEFAULT_DEBOUNCE_MS: u64 = 150;
pub const DEFAULT_SHORTCUT: &str = "mod+k";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub theme: PaletteType,
    pub locale: String,
    pub palette: PaletteConfig,
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            theme: PaletteType::default(),
            locale: DEFAULT_LOCALE.to_string(),
            palette: PaletteConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    /// Quiet period before a query edit re-ranks; 0 re-ranks on every key
    pub debounce_ms: u64,
    pub shortcut: String,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            shortcut: DEFAULT_SHORTCUT.to_string(),
        }
    }
}

impl PaletteConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when neither `INKPAD_LOG` nor `RUST_LOG` is set
    pub level: String,
    pub file: bool,
    /// Overrides `~/.config/inkpad/logs`
    pub directory: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: true,
            directory: None,
        }
    }
}

pub fn config_dir() -> Option<PathBuf> {
    home::home_dir().map(|mut path| {
        path.push(".config");
        path.push(APP_DIR);
        path
    })
}

pub fn get_config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

impl AppConfig {
    /// Loads the user's config file, or the defaults when there is none.
    pub fn load() -> Result<Self> {
        match get_config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content).map_err(|message| Error::Config {
            path: path.to_path_buf(),
            message,
        })
    }

    fn parse(content: &str) -> std::result::Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string(self).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn log_dir(&self) -> Option<PathBuf> {
        self.logging
            .directory
            .clone()
            .or_else(|| config_dir().map(|dir| dir.join("logs")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.palette.debounce(), Duration::from_millis(150));
        assert_eq!(config.palette.shortcut, "mod+k");
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "locale = \"fr\"\n[palette]\ndebounce_ms = 0\n").unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.locale, "fr");
        assert_eq!(config.palette.debounce(), Duration::ZERO);
        assert_eq!(config.palette.shortcut, DEFAULT_SHORTCUT);
        assert_eq!(config.theme, PaletteType::CatppuccinMocha);
        assert!(config.logging.file);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "theme = [not toml").unwrap();

        match AppConfig::load_from(&path) {
            Err(Error::Config { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = AppConfig::default();
        config.theme = PaletteType::Nord;
        config.logging.directory = Some(dir.path().join("logs"));
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.log_dir(), Some(dir.path().join("logs")));
    }
}
