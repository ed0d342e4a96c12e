//! Combat configuration and its validation errors.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Invalid configuration value.
///
/// Never fatal: the plugin falls back to defaults, weapons are reported
/// as warnings when first seen.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be positive (got {value})")]
    NonPositive { field: &'static str, value: f64 },

    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f64 },
}

pub(crate) fn ensure_positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

pub(crate) fn ensure_non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

/// Global combat settings
///
/// Defaults follow the reference character: 100 HP, 0.5s invulnerability
/// after a hit, 2s death fade, 60Hz fixed tick.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Fixed simulation rate used by `CombatSimulationPlugin` (Hz)
    pub tick_hz: f64,
    /// Max health for combatants built with `Vitality::from_config`
    pub max_health: f32,
    /// Invulnerability window after non-fatal damage (seconds)
    pub invulnerability_secs: f32,
    /// Death fade duration, opacity 1 → 0 (seconds)
    pub fade_out_secs: f32,
    /// Despawn removed entities (and their armed weapon) after `EntityRemoved`
    pub despawn_on_removal: bool,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            tick_hz: 60.0,
            max_health: 100.0,
            invulnerability_secs: 0.5,
            fade_out_secs: 2.0,
            despawn_on_removal: true,
        }
    }
}

impl CombatConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive("tick_hz", self.tick_hz)?;
        ensure_positive("max_health", self.max_health as f64)?;
        ensure_non_negative("invulnerability_secs", self.invulnerability_secs as f64)?;
        ensure_non_negative("fade_out_secs", self.fade_out_secs as f64)?;
        Ok(())
    }

    /// Seconds per tick at `tick_hz`
    pub fn tick_secs(&self) -> f32 {
        (1.0 / self.tick_hz) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = CombatConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert!((config.tick_secs() - 1.0 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn test_rejects_zero_tick_rate() {
        let config = CombatConfig {
            tick_hz: 0.0,
            ..Default::default()
        };

        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositive { field: "tick_hz", value: 0.0 })
        );
    }

    #[test]
    fn test_rejects_negative_invulnerability() {
        let config = CombatConfig {
            invulnerability_secs: -0.5,
            ..Default::default()
        };

        let err = config.validate().unwrap_err();
        assert_eq!(err.to_string(), "invulnerability_secs must not be negative (got -0.5)");
    }

    #[test]
    fn test_zero_fade_is_allowed() {
        let config = CombatConfig {
            fade_out_secs: 0.0,
            ..Default::default()
        };

        assert!(config.validate().is_ok());
    }
}
