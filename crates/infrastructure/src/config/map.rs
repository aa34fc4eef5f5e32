//! Map viewport configuration

use serde::{Deserialize, Serialize};

/// Map viewport configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    /// Fraction of the route's span added on every side when fitting
    #[serde(default = "default_padding_ratio")]
    pub padding_ratio: f64,

    /// Viewport width in pixels
    #[serde(default = "default_viewport_width")]
    pub viewport_width: u32,

    /// Viewport height in pixels
    #[serde(default = "default_viewport_height")]
    pub viewport_height: u32,
}

const fn default_padding_ratio() -> f64 {
    0.1
}

const fn default_viewport_width() -> u32 {
    800
}

const fn default_viewport_height() -> u32 {
    600
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            padding_ratio: default_padding_ratio(),
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
        }
    }
}

impl MapConfig {
    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.padding_ratio) {
            return Err(format!(
                "padding_ratio must be between 0.0 and 1.0, got {}",
                self.padding_ratio
            ));
        }
        if self.viewport_width == 0 || self.viewport_height == 0 {
            return Err("viewport size must be non-zero".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = MapConfig::default();
        assert_eq!(config.viewport_width, 800);
        assert_eq!(config.viewport_height, 600);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_bad_padding() {
        let config = MapConfig {
            padding_ratio: 1.5,
            ..Default::default()
        };
        assert!(config.validate().unwrap_err().contains("padding_ratio"));
    }

    #[test]
    fn rejects_zero_viewport() {
        let config = MapConfig {
            viewport_height: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
