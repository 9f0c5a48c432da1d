//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! Linlab has a single user-level configuration scope holding defaults for
//! the domain commands (DCT keep ratio, SVG canvas size, interactivity).
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Config file
//! 3. CLI flags (not handled here)
//!
//! # Config Locations
//!
//! Searched in order:
//! 1. `--config <path>` if given on the command line
//! 2. `$LINLAB_CONFIG` if set
//! 3. `$XDG_CONFIG_HOME/linlab/config.toml`
//! 4. `~/.linlab/config.toml` (canonical write location)
//!
//! # Example
//!
//! ```no_run
//! use linlab::core::config::Config;
//!
//! let result = Config::load(None).unwrap();
//! println!("keep ratio default: {}", result.config.keep_ratio());
//! ```

pub mod schema;

pub use schema::{GlobalConfig, SvgDefaults};

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("config file '{path}' does not exist")]
    NotFound { path: PathBuf },

    #[error("home directory not found")]
    NoHomeDir,
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
    /// Path the config was loaded from, if any file was found.
    pub path: Option<PathBuf>,
}

/// Loaded configuration with defaults applied through accessors.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Raw parsed values.
    pub global: GlobalConfig,
}

impl Config {
    /// Load configuration from the standard locations.
    ///
    /// An explicit `path` (from `--config`) must exist; the standard
    /// locations are optional and defaults apply when none is present.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read, parsed,
    /// or validated, or if an explicit path does not exist.
    pub fn load(path: Option<&Path>) -> Result<ConfigLoadResult, ConfigError> {
        let (global, found) = match path {
            Some(explicit) => {
                if !explicit.exists() {
                    return Err(ConfigError::NotFound {
                        path: explicit.to_path_buf(),
                    });
                }
                (Self::read_file(explicit)?, Some(explicit.to_path_buf()))
            }
            None => Self::load_from_standard_locations()?,
        };

        global.validate()?;

        Ok(ConfigLoadResult {
            config: Config { global },
            path: found,
        })
    }

    /// Search the standard locations for a config file.
    fn load_from_standard_locations() -> Result<(GlobalConfig, Option<PathBuf>), ConfigError> {
        // 1. Check $LINLAB_CONFIG
        if let Ok(path) = std::env::var("LINLAB_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                let config = Self::read_file(&path)?;
                return Ok((config, Some(path)));
            }
        }

        // 2. Check $XDG_CONFIG_HOME/linlab/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("linlab/config.toml");
            if path.exists() {
                let config = Self::read_file(&path)?;
                return Ok((config, Some(path)));
            }
        }

        // 3. Check ~/.linlab/config.toml
        if let Some(home) = dirs::home_dir() {
            let path = home.join(".linlab/config.toml");
            if path.exists() {
                let config = Self::read_file(&path)?;
                return Ok((config, Some(path)));
            }
        }

        // No config found, use defaults
        Ok((GlobalConfig::default(), None))
    }

    /// Read and parse a config file.
    fn read_file(path: &Path) -> Result<GlobalConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Get the canonical write path for config.
    ///
    /// Returns `~/.linlab/config.toml`.
    pub fn canonical_path() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(".linlab/config.toml"))
    }

    /// Write config atomically to the canonical location.
    ///
    /// Creates parent directories if needed. Uses atomic write
    /// (write to temp file, then rename) to prevent corruption.
    pub fn write(config: &GlobalConfig) -> Result<PathBuf, ConfigError> {
        let path = Self::canonical_path()?;
        Self::write_atomic(&path, config)?;
        Ok(path)
    }

    fn write_atomic(path: &Path, config: &GlobalConfig) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        let contents = toml::to_string_pretty(config).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let tmp = path.with_extension("toml.tmp");
        {
            let mut file = fs::File::create(&tmp).map_err(|e| ConfigError::WriteError {
                path: tmp.clone(),
                source: e,
            })?;
            file.write_all(contents.as_bytes())
                .map_err(|e| ConfigError::WriteError {
                    path: tmp.clone(),
                    source: e,
                })?;
        }
        fs::rename(&tmp, path).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Default DCT keep ratio (fraction in 0..=1).
    pub fn keep_ratio(&self) -> f64 {
        self.global.default_keep_ratio.unwrap_or(0.5)
    }

    /// SVG canvas size for projection rendering.
    pub fn svg_size(&self) -> (u32, u32) {
        let svg = self.global.svg.as_ref();
        (
            svg.and_then(|s| s.width).unwrap_or(640),
            svg.and_then(|s| s.height).unwrap_or(480),
        )
    }

    /// Default interactivity preference, if configured.
    pub fn interactive(&self) -> Option<bool> {
        self.global.interactive
    }
}
