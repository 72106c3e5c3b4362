//! Configuration for the status formatter and its simulator.
//!
//! Loaded from YAML. Every section is optional and falls back to defaults,
//! so an empty file yields the stock thresholds.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, StatusError};
use crate::logging::parse_log_level;
use crate::logic::Thresholds;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Severity bands for reservoir, battery and pod expiry
    pub thresholds: Thresholds,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// Simulator run parameters
    pub simulation: SimulationConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    pub level: String,

    /// Whether to use JSON format
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "INFO".to_string(),
            json_format: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Steps per trace
    pub max_steps: usize,

    /// Number of traces
    pub max_samples: usize,

    /// Fixed seed; a time-derived seed is used when absent
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_steps: 20,
            max_samples: 10_000,
            seed: None,
        }
    }
}

fn check_bands<T: PartialOrd + std::fmt::Display>(field: &str, critical: T, warning: T) -> Result<()> {
    if critical > warning {
        return Err(StatusError::validation(
            field.to_string(),
            format!(
                "critical bound {} must not exceed warning bound {}",
                critical, warning
            ),
        ));
    }
    Ok(())
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Load and validate, or fall back to defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Config::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let t = &self.thresholds;

        if !t.reservoir.critical.is_finite() || t.reservoir.critical < 0.0 {
            return Err(StatusError::validation(
                "thresholds.reservoir.critical",
                "Must be a non-negative number",
            ));
        }
        if !t.reservoir.warning.is_finite() {
            return Err(StatusError::validation(
                "thresholds.reservoir.warning",
                "Must be a finite number",
            ));
        }
        check_bands("thresholds.reservoir", t.reservoir.critical, t.reservoir.warning)?;

        for (field, value) in [
            ("thresholds.battery.critical", t.battery.critical),
            ("thresholds.battery.warning", t.battery.warning),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(StatusError::validation(field, "Must be within 0..=100"));
            }
        }
        check_bands("thresholds.battery", t.battery.critical, t.battery.warning)?;

        // An expired pod must always read as critical
        if t.expiry.critical < 0 {
            return Err(StatusError::validation(
                "thresholds.expiry.critical",
                "Must not be negative",
            ));
        }
        check_bands("thresholds.expiry", t.expiry.critical, t.expiry.warning)?;

        if parse_log_level(&self.logging.level).is_err() {
            return Err(StatusError::validation(
                "logging.level".to_string(),
                format!("Unknown log level '{}'", self.logging.level),
            ));
        }

        if self.simulation.max_steps == 0 {
            return Err(StatusError::validation(
                "simulation.max_steps",
                "Must be greater than 0",
            ));
        }
        if self.simulation.max_samples == 0 {
            return Err(StatusError::validation(
                "simulation.max_samples",
                "Must be greater than 0",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let yaml = "thresholds:\n  battery:\n    critical: 5\n    warning: 25\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.thresholds.battery.critical, 5.0);
        assert_eq!(config.thresholds.battery.warning, 25.0);
        assert_eq!(config.thresholds.reservoir, Thresholds::default().reservoir);
        assert_eq!(config.logging, LoggingConfig::default());
        assert_eq!(config.simulation.max_steps, 20);
    }

    #[test]
    fn test_inverted_bands_rejected() {
        let mut config = Config::default();
        config.thresholds.reservoir.critical = 40.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("thresholds.reservoir"));
    }

    #[test]
    fn test_bad_log_level_rejected() {
        let mut config = Config::default();
        config.logging.level = "LOUD".to_string();
        assert!(config.validate().is_err());
    }
}
