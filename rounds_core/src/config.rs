//! Configuration file support for Rounds.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/rounds/config.toml`.

use crate::{Error, NightThresholds, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub profile: ProfileConfig,

    #[serde(default)]
    pub thresholds: ThresholdConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Body profile used for BAC estimation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProfileConfig {
    #[serde(default = "default_user_id")]
    pub user_id: String,

    #[serde(default = "default_weight_kg")]
    pub weight_kg: f64,

    #[serde(default = "default_gender_constant")]
    pub gender_constant: f64,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            user_id: default_user_id(),
            weight_kg: default_weight_kg(),
            gender_constant: default_gender_constant(),
        }
    }
}

impl ProfileConfig {
    /// Body parameters for the estimator
    pub fn body(&self) -> crate::BodyProfile {
        crate::BodyProfile {
            weight_kg: self.weight_kg,
            gender_constant: self.gender_constant,
        }
    }
}

/// Default suggestion thresholds applied to new nights, in drinks
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThresholdConfig {
    #[serde(default = "default_ride_threshold")]
    pub ride: f64,

    #[serde(default = "default_food_threshold")]
    pub food: f64,

    #[serde(default = "default_notification_threshold")]
    pub notification: f64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            ride: default_ride_threshold(),
            food: default_food_threshold(),
            notification: default_notification_threshold(),
        }
    }
}

impl ThresholdConfig {
    /// Thresholds to stamp onto a newly started night
    pub fn to_thresholds(&self) -> NightThresholds {
        NightThresholds {
            ride: self.ride,
            food: self.food,
            notification: self.notification,
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| {
        let home = std::env::var("HOME").expect("HOME environment variable not set");
        PathBuf::from(home).join(".local/share")
    });
    base.join("rounds")
}

fn default_user_id() -> String {
    "me".into()
}

fn default_weight_kg() -> f64 {
    crate::bac::DEFAULT_WEIGHT_KG
}

fn default_gender_constant() -> f64 {
    crate::bac::DEFAULT_GENDER_CONSTANT
}

fn default_ride_threshold() -> f64 {
    4.0
}

fn default_food_threshold() -> f64 {
    3.0
}

fn default_notification_threshold() -> f64 {
    5.0
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            let home = std::env::var("HOME").expect("HOME environment variable not set");
            PathBuf::from(home).join(".config")
        });
        base.join("rounds").join("config.toml")
    }

    /// Save the current configuration to the default path
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path();
        self.save_to(&config_path)
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.profile.weight_kg, 70.0);
        assert_eq!(config.profile.gender_constant, 0.68);
        assert_eq!(config.thresholds.ride, 4.0);
        assert_eq!(config.thresholds.food, 3.0);
        assert_eq!(config.thresholds.notification, 5.0);
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(config.profile.weight_kg, parsed.profile.weight_kg);
        assert_eq!(config.thresholds.ride, parsed.thresholds.ride);
        assert_eq!(config.profile.user_id, parsed.profile.user_id);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[profile]
weight_kg = 62.5
gender_constant = 0.55
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.profile.weight_kg, 62.5);
        assert_eq!(config.profile.gender_constant, 0.55);
        assert_eq!(config.thresholds.ride, 4.0); // default
    }

    #[test]
    fn test_thresholds_convert() {
        let config = Config::default();
        let thresholds = config.thresholds.to_thresholds();
        assert_eq!(thresholds, crate::NightThresholds::default());
    }
}
