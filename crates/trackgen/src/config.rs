//! Configuration types for track generation.

use std::path::Path;

use glam::DVec3;
use rand::Rng;
use racetrack::{ChicaneMode, PlannerConfig, RibbonMesher, TrackError, WalkerConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Full set of knobs for one generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackConfig {
    /// Draw a fresh seed on every run instead of using `seed`.
    pub randomize: bool,

    /// Seed used when `randomize` is off.
    pub seed: u64,

    /// Lap length bounds in meters.
    pub min_lap_length: f64,
    pub max_lap_length: f64,

    /// Number of sector templates to draw (inclusive range).
    pub min_sectors: u32,
    pub max_sectors: u32,

    /// Road width in meters.
    pub road_width: f64,

    /// Distance between centerline points in meters.
    pub step_size: f64,

    /// Start of the centerline.
    pub origin: [f64; 3],

    pub chicane_mode: ChicaneMode,
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            randomize: false,
            seed: 42,
            min_lap_length: 4000.0,
            max_lap_length: 7000.0,
            min_sectors: 5,
            max_sectors: 7,
            road_width: 12.0,
            step_size: 1.0,
            origin: [0.0; 3],
            chicane_mode: ChicaneMode::Straight,
        }
    }
}

/// Errors raised while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] TrackError),
}

impl TrackConfig {
    /// Parses and validates a JSON configuration. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: TrackConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn planner_config(&self) -> PlannerConfig {
        PlannerConfig {
            min_sectors: self.min_sectors,
            max_sectors: self.max_sectors,
            min_lap_length: self.min_lap_length,
            max_lap_length: self.max_lap_length,
        }
    }

    pub fn walker_config(&self) -> WalkerConfig {
        WalkerConfig {
            step_size: self.step_size,
            origin: DVec3::from_array(self.origin),
            chicane_mode: self.chicane_mode,
            ..Default::default()
        }
    }

    /// Checks every stage's bounds without generating anything.
    pub fn validate(&self) -> Result<(), TrackError> {
        self.planner_config().validate()?;
        let walker = self.walker_config();
        walker.validate()?;
        walker.check_point_budget(self.max_lap_length)?;
        RibbonMesher::new(self.road_width)?;
        Ok(())
    }

    /// Resolves `randomize` into the concrete seed for this run.
    pub fn resolve_seed(&self, rng: &mut impl Rng) -> u64 {
        if self.randomize {
            rng.r#gen()
        } else {
            self.seed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_default_is_valid() {
        assert!(TrackConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config =
            TrackConfig::from_json_str(r#"{ "seed": 7, "road_width": 16.0 }"#).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.road_width, 16.0);
        assert_eq!(config.min_sectors, 5);
        assert_eq!(config.chicane_mode, ChicaneMode::Straight);
    }

    #[test]
    fn test_json_chicane_mode() {
        let config = TrackConfig::from_json_str(r#"{ "chicane_mode": "weave" }"#).unwrap();
        assert_eq!(config.chicane_mode, ChicaneMode::Weave);
    }

    #[test]
    fn test_invalid_json_config_rejected() {
        let err = TrackConfig::from_json_str(r#"{ "min_sectors": 4, "max_sectors": 2 }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(TrackError::Configuration(_))));

        let err = TrackConfig::from_json_str(r#"{ "road_width": 0.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = TrackConfig::from_json_str(r#"{ "step_size": 1e-12 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(TrackError::Configuration(_))));

        let err = TrackConfig::from_json_str("not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_resolve_seed() {
        let mut rng = StdRng::seed_from_u64(1);
        let fixed = TrackConfig {
            seed: 99,
            ..Default::default()
        };
        assert_eq!(fixed.resolve_seed(&mut rng), 99);

        let random = TrackConfig {
            randomize: true,
            ..Default::default()
        };
        let a = random.resolve_seed(&mut StdRng::seed_from_u64(1));
        let b = random.resolve_seed(&mut StdRng::seed_from_u64(2));
        assert_ne!(a, b);
    }
}
