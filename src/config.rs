//! Field configuration
//!
//! Every tunable of the particle field lives here. Defaults reproduce the
//! portfolio background exactly; a JSON document may override any subset.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest grid a config may request; the whole grid is allocated up front
pub const MAX_POINTS: usize = 1_000_000;

/// Configuration loading/validation failure
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Traveling wave parameters: `amp_x * sin(t*freq_x + x*k_x) + amp_z * cos(t*freq_z + z*k_z)`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    pub amp_x: f64,
    pub freq_x: f64,
    pub k_x: f64,
    pub amp_z: f64,
    pub freq_z: f64,
    pub k_z: f64,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            amp_x: 20.0,
            freq_x: 0.0005,
            k_x: 0.02,
            amp_z: 15.0,
            freq_z: 0.0008,
            k_z: 0.02,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub rows: usize,
    pub cols: usize,
    /// Lattice pitch in world units
    pub spacing: f64,
    /// Pinhole camera focal length
    pub focal_length: f64,
    pub wave: WaveConfig,
    /// Pointer influence distance in screen pixels
    pub pointer_radius: f64,
    /// Fraction of the point->pointer vector used as the target offset
    pub pointer_pull: f64,
    /// Exponential smoothing factor applied to the offset each frame
    pub smoothing: f64,
    /// Opacity of the background rectangle painted each frame
    pub trail_alpha: f64,
    /// Radius multiplier for large points
    pub large_radius: f64,
    /// Radius multiplier for small points
    pub small_radius: f64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            rows: 50,
            cols: 50,
            spacing: 20.0,
            focal_length: 400.0,
            wave: WaveConfig::default(),
            pointer_radius: 250.0,
            pointer_pull: 0.05,
            smoothing: 0.08,
            trail_alpha: 0.2,
            large_radius: 1.5,
            small_radius: 0.7,
        }
    }
}

impl FieldConfig {
    /// Parse and validate a JSON document. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON config file from disk
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load from the path in `WAVE_CONFIG`, falling back to defaults.
    /// Errors are logged, never fatal.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Self {
        let Ok(path) = std::env::var("WAVE_CONFIG") else {
            return Self::default();
        };
        match Self::from_file(&path) {
            Ok(config) => {
                tracing::info!(path = %path, "Loaded field config");
                config
            }
            Err(e) => {
                tracing::warn!(path = %path, error = %e, "Ignoring field config");
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));

        if self.rows == 0 || self.cols == 0 {
            return invalid("rows and cols must be positive");
        }
        match self.rows.checked_mul(self.cols) {
            Some(n) if n <= MAX_POINTS => {}
            _ => return invalid("rows * cols must not exceed 1000000 points"),
        }
        if !(self.spacing > 0.0) {
            return invalid("spacing must be positive");
        }
        if !(self.focal_length > 0.0) {
            return invalid("focal_length must be positive");
        }
        if !(self.pointer_radius > 0.0) {
            return invalid("pointer_radius must be positive");
        }
        if !(self.smoothing > 0.0 && self.smoothing <= 1.0) {
            return invalid("smoothing must be in (0, 1]");
        }
        if !(0.0..=1.0).contains(&self.trail_alpha) {
            return invalid("trail_alpha must be in [0, 1]");
        }
        Ok(())
    }

    pub fn point_count(&self) -> usize {
        self.rows.saturating_mul(self.cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = FieldConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.point_count(), 2500);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = FieldConfig::from_json(r#"{"rows": 10, "wave": {"amp_x": 5.0}}"#)
            .expect("partial config should parse");
        assert_eq!(config.rows, 10);
        assert_eq!(config.cols, 50);
        assert_eq!(config.wave.amp_x, 5.0);
        assert_eq!(config.wave.amp_z, 15.0);
        assert_eq!(config.focal_length, 400.0);
    }

    #[test]
    fn empty_object_is_default() {
        let config = FieldConfig::from_json("{}").expect("empty object should parse");
        assert_eq!(config, FieldConfig::default());
    }

    #[test]
    fn rejects_invalid_values() {
        for json in [
            r#"{"rows": 0}"#,
            r#"{"spacing": -1.0}"#,
            r#"{"focal_length": 0.0}"#,
            r#"{"smoothing": 1.5}"#,
            r#"{"trail_alpha": 2.0}"#,
            r#"{"pointer_radius": 0.0}"#,
            r#"{"rows": 4294967296, "cols": 4294967296}"#,
            r#"{"rows": 100000, "cols": 100000}"#,
            r#"{"rows": 1001, "cols": 1000}"#,
        ] {
            assert!(
                matches!(FieldConfig::from_json(json), Err(ConfigError::Invalid(_))),
                "{} should be rejected",
                json
            );
        }
    }

    #[test]
    fn grid_size_is_capped() {
        let config = FieldConfig::from_json(r#"{"rows": 1000, "cols": 1000}"#)
            .expect("a grid at the cap should be accepted");
        assert_eq!(config.point_count(), MAX_POINTS);

        let huge = FieldConfig {
            rows: usize::MAX,
            cols: 2,
            ..FieldConfig::default()
        };
        assert_eq!(huge.point_count(), usize::MAX);
        assert!(matches!(huge.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            FieldConfig::from_json("{rows:"),
            Err(ConfigError::Parse(_))
        ));
    }
}
