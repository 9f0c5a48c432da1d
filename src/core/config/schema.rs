//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Validation
//!
//! Config values are validated after parsing to ensure they conform to
//! expected ranges (e.g., the keep ratio must lie in 0..=1).

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// User configuration.
///
/// # Example
///
/// ```toml
/// default_keep_ratio = 0.5
/// interactive = true
///
/// [svg]
/// width = 800
/// height = 600
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Default fraction of DCT coefficients kept during compression
    pub default_keep_ratio: Option<f64>,

    /// Default interactive mode
    pub interactive: Option<bool>,

    /// SVG rendering defaults
    pub svg: Option<SvgDefaults>,
}

impl GlobalConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ratio) = self.default_keep_ratio {
            if !(0.0..=1.0).contains(&ratio) || !ratio.is_finite() {
                return Err(ConfigError::InvalidValue(format!(
                    "default_keep_ratio must be between 0 and 1, got {}",
                    ratio
                )));
            }
        }

        if let Some(svg) = &self.svg {
            svg.validate()?;
        }

        Ok(())
    }
}

/// SVG canvas defaults for projection rendering.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SvgDefaults {
    /// Canvas width in pixels
    pub width: Option<u32>,

    /// Canvas height in pixels
    pub height: Option<u32>,
}

impl SvgDefaults {
    fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [("svg.width", self.width), ("svg.height", self.height)] {
            if value == Some(0) {
                return Err(ConfigError::InvalidValue(format!(
                    "{} must be greater than zero",
                    name
                )));
            }
        }
        Ok(())
    }
}
