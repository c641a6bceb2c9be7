//! Saved tuning
//!
//! Parameter values persist across runs in a JSON file in the working
//! directory. Loading never fails; anything missing or malformed falls
//! back to defaults.

use serde::{Deserialize, Serialize};

use crate::sim::SimParams;

/// On-disk configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainerConfig {
    /// Tuned mechanic parameters
    #[serde(default)]
    pub params: SimParams,
}

impl TrainerConfig {
    const FILE_NAME: &'static str = "ring-drill.json";

    /// Load saved tuning, falling back to defaults. Values a hand-edited
    /// file pushed outside their range come back clamped.
    pub fn load() -> Self {
        match std::fs::read_to_string(Self::FILE_NAME) {
            Ok(json) => match serde_json::from_str::<Self>(&json) {
                Ok(mut config) => {
                    let loaded = config.params.clone();
                    config.params.sanitize();
                    if config.params != loaded {
                        log::warn!("clamped out-of-range tuning in {}", Self::FILE_NAME);
                    }
                    log::info!("loaded tuning from {}", Self::FILE_NAME);
                    config
                }
                Err(err) => {
                    log::warn!("ignoring malformed {}: {err}", Self::FILE_NAME);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("no saved tuning, using defaults");
                Self::default()
            }
        }
    }

    /// Write the current tuning out, tolerating failure
    pub fn save(&self) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(err) = std::fs::write(Self::FILE_NAME, json) {
                    log::warn!("could not save {}: {err}", Self::FILE_NAME);
                } else {
                    log::info!("tuning saved to {}", Self::FILE_NAME);
                }
            }
            Err(err) => log::warn!("could not serialize tuning: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::ParamKey;

    #[test]
    fn test_config_round_trip() {
        let mut config = TrainerConfig::default();
        config.params.rotation_speed = 0.11;
        config.params.ring_spacing_factor = 2.4;

        let json = serde_json::to_string(&config).expect("serializes");
        let back: TrainerConfig = serde_json::from_str(&json).expect("parses");
        assert_eq!(back, config);
    }

    #[test]
    fn test_config_empty_json_uses_defaults() {
        let config: TrainerConfig = serde_json::from_str("{}").expect("parses");
        assert_eq!(config, TrainerConfig::default());
    }

    #[test]
    fn test_config_partial_params() {
        // fields missing from an older or hand-edited file fall back
        let json = r#"{"params":{"marker_size_factor":0.1}}"#;
        let config: TrainerConfig = serde_json::from_str(json).expect("parses");
        assert!((config.params.marker_size_factor - 0.1).abs() < 1e-6);
        assert!((config.params.rotation_speed - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_config_out_of_range_file_is_clamped() {
        // well-formed JSON can still carry values the panel could never
        // reach; they must come back inside their ranges
        let json = r#"{"params":{"marker_size_factor":10.0,"rotation_speed":-5.0}}"#;
        let mut config: TrainerConfig = serde_json::from_str(json).expect("parses");
        config.params.sanitize();
        for key in ParamKey::ALL {
            let (min, max) = key.range();
            let v = config.params.get(key);
            assert!(v >= min && v <= max, "{} out of range", key.label());
        }
        assert!((config.params.marker_size_factor - 0.2).abs() < 1e-6);
        assert!((config.params.rotation_speed - 0.01).abs() < 1e-6);
    }
}
