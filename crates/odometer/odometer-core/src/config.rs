//! Core configuration for odometer-core.

use serde::{Deserialize, Serialize};

use crate::error::OdometerError;

/// Catch-up curve shared by every wheel of one controller.
///
/// A wheel moves at `gap * multiplier` units per second, floored at `min` and
/// capped at `max`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VelocityParams {
    pub min: f64,
    pub max: f64,
    pub multiplier: f64,
}

impl VelocityParams {
    /// Velocity for the remaining distance `gap`.
    #[inline]
    pub fn velocity(&self, gap: f64) -> f64 {
        (gap * self.multiplier).max(self.min).min(self.max)
    }
}

impl Default for VelocityParams {
    fn default() -> Self {
        Self {
            min: 1.0,
            max: 1_000_000.0,
            multiplier: 8.0,
        }
    }
}

/// Configuration for one odometer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub min_velocity: f64,
    pub max_velocity: f64,
    pub velocity_multiplier: f64,

    /// Glyph drawn by text surfaces between digit groups.
    pub separator: char,
    /// Wheels per separator group (thousands grouping by default).
    pub group_size: u32,
}

impl Default for Config {
    fn default() -> Self {
        let v = VelocityParams::default();
        Self {
            min_velocity: v.min,
            max_velocity: v.max,
            velocity_multiplier: v.multiplier,
            separator: ',',
            group_size: 3,
        }
    }
}

impl Config {
    /// Parse a JSON config object; missing fields take their defaults.
    pub fn from_json_str(s: &str) -> Result<Self, OdometerError> {
        let cfg: Config = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn velocity(&self) -> VelocityParams {
        VelocityParams {
            min: self.min_velocity,
            max: self.max_velocity,
            multiplier: self.velocity_multiplier,
        }
    }

    pub fn validate(&self) -> Result<(), OdometerError> {
        let positive = |name: &str, v: f64| {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(OdometerError::InvalidConfig {
                    reason: format!("{name} must be finite and positive, got {v}"),
                })
            }
        };
        positive("min_velocity", self.min_velocity)?;
        positive("max_velocity", self.max_velocity)?;
        positive("velocity_multiplier", self.velocity_multiplier)?;
        if self.max_velocity < self.min_velocity {
            return Err(OdometerError::InvalidConfig {
                reason: format!(
                    "max_velocity {} is below min_velocity {}",
                    self.max_velocity, self.min_velocity
                ),
            });
        }
        if self.group_size == 0 {
            return Err(OdometerError::InvalidConfig {
                reason: "group_size must be at least 1".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_tuning() {
        let cfg = Config::default();
        assert_eq!(cfg.min_velocity, 1.0);
        assert_eq!(cfg.max_velocity, 1_000_000.0);
        assert_eq!(cfg.velocity_multiplier, 8.0);
        assert_eq!(cfg.group_size, 3);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn velocity_is_clamped() {
        let v = VelocityParams::default();
        assert_eq!(v.velocity(0.01), 1.0);
        assert_eq!(v.velocity(10.0), 80.0);
        assert_eq!(v.velocity(1e9), 1_000_000.0);
    }

    #[test]
    fn partial_json_takes_defaults() {
        let cfg = Config::from_json_str(r#"{ "min_velocity": 2.5 }"#).unwrap();
        assert_eq!(cfg.min_velocity, 2.5);
        assert_eq!(cfg.velocity_multiplier, 8.0);
        assert_eq!(cfg.separator, ',');
    }

    #[test]
    fn rejects_inverted_range() {
        let err = Config::from_json_str(r#"{ "min_velocity": 10, "max_velocity": 5 }"#)
            .unwrap_err();
        assert!(matches!(err, OdometerError::InvalidConfig { .. }));
    }

    #[test]
    fn rejects_zero_multiplier_and_group() {
        let cfg = Config {
            velocity_multiplier: 0.0,
            ..Config::default()
        };
        assert!(cfg.validate().is_err());
        let cfg = Config {
            group_size: 0,
            ..Config::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn malformed_json_is_serialization_error() {
        let err = Config::from_json_str("{ nope").unwrap_err();
        assert!(matches!(err, OdometerError::Serialization { .. }));
    }
}
