//! Configuration management for yearbook.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::manifest::{Year, DEFAULT_EXTENSIONS};
use crate::photo::UrlMode;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default config directory name.
const CONFIG_DIR_NAME: &str = "yearbook";

/// Environment variable prefix.
const ENV_PREFIX: &str = "YEARBOOK_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `YEARBOOK_`, sections split on `__`)
/// 2. TOML config file at `~/.config/yearbook/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Photo tree configuration.
    pub photos: PhotosConfig,
    /// Manifest file configuration.
    pub manifest: ManifestConfig,
    /// Gallery presentation configuration.
    pub gallery: GalleryConfig,
    /// HTTP server configuration.
    pub server: ServerConfig,
}

/// Where photos live and which ones count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhotosConfig {
    /// Directory holding one subdirectory per year.
    pub root: PathBuf,
    /// First year directory to scan.
    pub first_year: u16,
    /// Last year directory to scan (inclusive).
    pub last_year: u16,
    /// Image file extensions, without the dot. Matched case-insensitively.
    pub extensions: Vec<String>,
}

/// Manifest file location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestConfig {
    /// Path of the generated manifest.
    pub path: PathBuf,
}

/// Gallery presentation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// Title shown in the header.
    pub title: String,
    /// Number of random highlights on the home page.
    pub highlight_count: usize,
    /// Photos revealed per batch in the all-years view.
    pub batch_size: usize,
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on.
    pub bind: String,
    /// Image URL scheme.
    pub mode: UrlMode,
}

impl Default for PhotosConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("photos"),
            first_year: 1999,
            last_year: 2014,
            extensions: DEFAULT_EXTENSIONS.iter().map(|ext| (*ext).to_string()).collect(),
        }
    }
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/photo-manifest.json"),
        }
    }
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            title: "Hewitt Oscar Party".to_string(),
            highlight_count: 12,
            batch_size: 40,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:4009".to_string(),
            mode: UrlMode::Production,
        }
    }
}

impl Config {
    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate one specific configuration file.
    ///
    /// Unlike [`load_from`](Self::load_from), a missing file is an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist, does not parse, or holds
    /// invalid values.
    pub fn check_file(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::config_validation(format!(
                "configuration file {} does not exist",
                path.display()
            )));
        }
        Self::load_from(Some(path.to_path_buf()))
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        let first = Year::new(self.photos.first_year)
            .map_err(|e| Error::config_validation(format!("first_year: {e}")))?;
        let last = Year::new(self.photos.last_year)
            .map_err(|e| Error::config_validation(format!("last_year: {e}")))?;
        if first > last {
            return Err(Error::config_validation(format!(
                "first_year ({first}) cannot be greater than last_year ({last})"
            )));
        }

        if self.photos.extensions.is_empty() {
            return Err(Error::config_validation("extensions must not be empty"));
        }
        if let Some(ext) = self
            .photos
            .extensions
            .iter()
            .find(|ext| ext.is_empty() || ext.starts_with('.') || ext.contains('/'))
        {
            return Err(Error::config_validation(format!(
                "invalid extension '{ext}': use a bare extension such as \"jpg\""
            )));
        }

        if self.gallery.batch_size == 0 {
            return Err(Error::config_validation(
                "batch_size must be greater than 0",
            ));
        }
        if self.gallery.highlight_count == 0 {
            return Err(Error::config_validation(
                "highlight_count must be greater than 0",
            ));
        }

        self.bind_addr()?;
        Ok(())
    }

    /// The configured years, ascending.
    ///
    /// Assumes a validated configuration; out-of-range bounds yield no years.
    #[must_use]
    pub fn years(&self) -> Vec<Year> {
        match (
            Year::new(self.photos.first_year),
            Year::new(self.photos.last_year),
        ) {
            (Ok(first), Ok(last)) => Year::range_inclusive(first, last),
            _ => Vec::new(),
        }
    }

    /// Parse the bind address.
    ///
    /// # Errors
    ///
    /// Returns an error if `server.bind` is not a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        self.server.bind.parse().map_err(|_| {
            Error::config_validation(format!(
                "bind address '{}' is not of the form host:port",
                self.server.bind
            ))
        })
    }
}
