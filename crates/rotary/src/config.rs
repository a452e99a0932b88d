use crate::animator::{DEFAULT_RETURN_DURATION, Easing};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_MAX_CODE_LENGTH: usize = 4;
pub const DEFAULT_MAX_ROTATION_BOUND: i32 = 340;
pub const DEFAULT_TOLERANCE_WINDOW: i32 = 10;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max_code_length must be at least 1")]
    EmptyCode,
    #[error("tolerance_window must not be negative, got {0}")]
    NegativeTolerance(i32),
    #[error("max_rotation_bound must be within 1..=360 degrees, got {0}")]
    RotationBound(i32),
}

/// Tunables of a single dial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DialConfig {
    /// Digits per completed code.
    pub max_code_length: usize,
    /// Exclusive limit of how far (degrees) the dial can be pulled.
    pub max_rotation_bound: i32,
    /// Allowed deviation (degrees) between the release angle and a digit's target.
    pub tolerance_window: i32,
    pub return_duration_ms: u64,
    pub easing: Easing,
}

impl Default for DialConfig {
    fn default() -> Self {
        Self {
            max_code_length: DEFAULT_MAX_CODE_LENGTH,
            max_rotation_bound: DEFAULT_MAX_ROTATION_BOUND,
            tolerance_window: DEFAULT_TOLERANCE_WINDOW,
            return_duration_ms: DEFAULT_RETURN_DURATION.as_millis() as u64,
            easing: Easing::default(),
        }
    }
}

impl DialConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_code_length == 0 {
            return Err(ConfigError::EmptyCode);
        }
        if self.tolerance_window < 0 {
            return Err(ConfigError::NegativeTolerance(self.tolerance_window));
        }
        if !(1..=360).contains(&self.max_rotation_bound) {
            return Err(ConfigError::RotationBound(self.max_rotation_bound));
        }
        Ok(())
    }

    pub fn return_duration(&self) -> Duration {
        Duration::from_millis(self.return_duration_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = DialConfig::default();
        assert_eq!(config.max_code_length, 4);
        assert_eq!(config.tolerance_window, 10);
        assert_eq!(config.return_duration(), Duration::from_millis(300));
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_rejects_malformed_values() {
        let cases = vec![
            (
                DialConfig {
                    max_code_length: 0,
                    ..Default::default()
                },
                ConfigError::EmptyCode,
            ),
            (
                DialConfig {
                    tolerance_window: -1,
                    ..Default::default()
                },
                ConfigError::NegativeTolerance(-1),
            ),
            (
                DialConfig {
                    max_rotation_bound: 0,
                    ..Default::default()
                },
                ConfigError::RotationBound(0),
            ),
            (
                DialConfig {
                    max_rotation_bound: 400,
                    ..Default::default()
                },
                ConfigError::RotationBound(400),
            ),
        ];

        for (config, expected) in cases {
            assert_eq!(config.validate(), Err(expected));
        }
    }

    #[test]
    fn test_partial_deserialization_keeps_defaults() {
        let config: DialConfig =
            serde_json::from_str(r#"{ "max_code_length": 6, "easing": "linear" }"#).unwrap();
        assert_eq!(config.max_code_length, 6);
        assert_eq!(config.easing, Easing::Linear);
        assert_eq!(config.max_rotation_bound, DEFAULT_MAX_ROTATION_BOUND);
        assert_eq!(config.tolerance_window, DEFAULT_TOLERANCE_WINDOW);
    }
}
