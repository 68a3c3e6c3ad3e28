//! Reel configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use sr_core::{SrError, SrResult, SCALE_FACTOR};

/// Construction-time reel parameters.
///
/// All speeds and rates are scaled fixed-point units per tick
/// (1000 = one full symbol pitch); durations are ticks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReelConfig {
    /// Target cruise speed while spinning.
    pub spin_speed: i32,
    /// Per-tick speed gain while starting.
    pub spin_up_rate: i32,
    /// Per-tick speed loss while stopping.
    pub spin_down_rate: i32,
    /// Per-tick increment consumed while nudging.
    pub nudge_speed: i32,
    /// Earliest tick a stop request is honored after entering the spin.
    pub min_spin_duration: u32,
    /// Tick at which a stop is forced with no request.
    pub max_spin_duration: u32,
    /// +1 spins down-screen, -1 spins up-screen.
    pub spin_direction: i32,
    /// Symbols fully visible in the window.
    pub visible_symbols: usize,
    /// On-screen pixel extent of one symbol (the pitch).
    pub symbol_size: i32,
    /// Sprite animation rate, ticks per frame. Pass-through: unused by the
    /// spin logic itself.
    pub frame_rate: u32,
}

impl Default for ReelConfig {
    fn default() -> Self {
        Self {
            spin_speed: 150,
            spin_up_rate: 50,
            spin_down_rate: 10,
            nudge_speed: 30,
            min_spin_duration: 60,
            max_spin_duration: 300,
            spin_direction: 1,
            visible_symbols: 3,
            symbol_size: 16,
            frame_rate: 1,
        }
    }
}

impl ReelConfig {
    /// Reference cabinet feel: the defaults.
    pub fn normal() -> Self {
        Self::default()
    }

    /// Fast spin-up, short spin window.
    pub fn turbo() -> Self {
        Self {
            spin_speed: 300,
            spin_up_rate: 100,
            spin_down_rate: 30,
            min_spin_duration: 30,
            max_spin_duration: 180,
            ..Self::default()
        }
    }

    /// Slow, long window for frame-by-frame inspection.
    pub fn studio() -> Self {
        Self {
            spin_speed: 100,
            spin_up_rate: 20,
            spin_down_rate: 5,
            min_spin_duration: 120,
            max_spin_duration: 600,
            ..Self::default()
        }
    }

    /// Validate parameter ranges.
    ///
    /// A per-tick speed at or above one symbol pitch would skip wraps (the
    /// advance step normalizes once per tick); that is logged as a warning
    /// rather than rejected.
    pub fn validate(&self) -> SrResult<()> {
        if self.spin_direction != 1 && self.spin_direction != -1 {
            return Err(SrError::InvalidParam(format!(
                "spin_direction must be +1 or -1, got {}",
                self.spin_direction
            )));
        }
        if self.spin_speed <= 0 || self.spin_up_rate <= 0 || self.spin_down_rate <= 0 {
            return Err(SrError::InvalidParam(
                "spin_speed and spin rates must be positive".to_string(),
            ));
        }
        if self.nudge_speed <= 0 {
            return Err(SrError::InvalidParam(
                "nudge_speed must be positive".to_string(),
            ));
        }
        if self.min_spin_duration > self.max_spin_duration {
            return Err(SrError::InvalidParam(format!(
                "min_spin_duration {} exceeds max_spin_duration {}",
                self.min_spin_duration, self.max_spin_duration
            )));
        }
        if self.visible_symbols == 0 {
            return Err(SrError::InvalidParam(
                "visible_symbols must be at least 1".to_string(),
            ));
        }
        if self.symbol_size <= 0 {
            return Err(SrError::InvalidParam(
                "symbol_size must be positive".to_string(),
            ));
        }
        if self.spin_speed >= SCALE_FACTOR {
            log::warn!(
                "spin_speed {} is at or above one symbol pitch ({}); wraps may be skipped",
                self.spin_speed,
                SCALE_FACTOR
            );
        }
        if self.nudge_speed >= SCALE_FACTOR {
            log::warn!(
                "nudge_speed {} is at or above one symbol pitch ({})",
                self.nudge_speed,
                SCALE_FACTOR
            );
        }
        Ok(())
    }

    /// Load from a YAML or JSON file, chosen by extension.
    pub fn load(path: &Path) -> SrResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&text)
                .map_err(|e| SrError::Config(format!("{}: {e}", path.display())))?,
            _ => serde_yml::from_str(&text)
                .map_err(|e| SrError::Config(format!("{}: {e}", path.display())))?,
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_reference_cabinet() {
        let config = ReelConfig::default();
        assert_eq!(config.spin_speed, 150);
        assert_eq!(config.spin_up_rate, 50);
        assert_eq!(config.spin_down_rate, 10);
        assert_eq!(config.nudge_speed, 30);
        assert_eq!(config.min_spin_duration, 60);
        assert_eq!(config.max_spin_duration, 300);
        assert_eq!(config.spin_direction, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_presets_validate() {
        assert!(ReelConfig::normal().validate().is_ok());
        assert!(ReelConfig::turbo().validate().is_ok());
        assert!(ReelConfig::studio().validate().is_ok());
    }

    #[test]
    fn test_invalid_direction_rejected() {
        let config = ReelConfig {
            spin_direction: 2,
            ..ReelConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_min_above_max_rejected() {
        let config = ReelConfig {
            min_spin_duration: 400,
            max_spin_duration: 300,
            ..ReelConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config: ReelConfig = serde_yml::from_str("spin_speed: 200\n").unwrap();
        assert_eq!(config.spin_speed, 200);
        assert_eq!(config.spin_down_rate, 10);
    }
}
