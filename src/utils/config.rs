use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use crate::core::{ACCURACY_WEIGHT, DEFAULT_PROVIDER, MAX_WIFI_RADIUS_M, MIN_SIGNAL_LEVEL, TRUST_WINDOW_MS};

/// Tunable parameters of the verifying calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Margin added to both accuracy radii when testing compatibility (meters)
    pub max_wifi_radius_m: f64,
    /// How long a verification stays trusted (milliseconds)
    pub trust_window_ms: u64,
    /// Accuracy at or below which a fix gets the full accuracy weight (meters)
    pub accuracy_weight: f64,
    /// Signal level floor used to normalize signal strengths (dBm)
    pub min_signal_level: i32,
    /// Provider name stamped on combined fixes
    pub provider: String,
}

/// Configuration loading and validation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid parameter value
    #[error("invalid {parameter} = {value}: {reason}")]
    InvalidParameter { parameter: String, value: String, reason: String },
    /// Configuration file I/O error
    #[error("config file error: {message}")]
    Io { message: String },
    /// JSON serialization/deserialization error
    #[error("config serialization error: {message}")]
    Serialization { message: String },
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            max_wifi_radius_m: MAX_WIFI_RADIUS_M,
            trust_window_ms: TRUST_WINDOW_MS,
            accuracy_weight: ACCURACY_WEIGHT,
            min_signal_level: MIN_SIGNAL_LEVEL,
            provider: DEFAULT_PROVIDER.to_string(),
        }
    }
}

impl CalculatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_wifi_radius(mut self, radius_m: f64) -> Self {
        self.max_wifi_radius_m = radius_m;
        self
    }

    pub fn with_trust_window(mut self, window_ms: u64) -> Self {
        self.trust_window_ms = window_ms;
        self
    }

    pub fn with_accuracy_weight(mut self, accuracy_weight: f64) -> Self {
        self.accuracy_weight = accuracy_weight;
        self
    }

    pub fn with_min_signal_level(mut self, level: i32) -> Self {
        self.min_signal_level = level;
        self
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = provider.into();
        self
    }

    /// Check every parameter, returning the first violation
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.max_wifi_radius_m.is_finite() || self.max_wifi_radius_m < 0.0 {
            return Err(invalid(
                "max_wifi_radius_m",
                self.max_wifi_radius_m,
                "radius must be a finite, non-negative distance",
            ));
        }
        if self.trust_window_ms == 0 {
            return Err(invalid("trust_window_ms", self.trust_window_ms, "trust window must be positive"));
        }
        if !self.accuracy_weight.is_finite() || self.accuracy_weight <= 0.0 {
            return Err(invalid(
                "accuracy_weight",
                self.accuracy_weight,
                "accuracy weight must be finite and positive",
            ));
        }
        if self.provider.trim().is_empty() {
            return Err(invalid("provider", "\"\"", "provider name must not be empty"));
        }
        Ok(())
    }

    /// Load and validate configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let content = fs::read_to_string(&path).map_err(|e| ConfigError::Io {
            message: format!("Failed to read config file '{}': {}", path_str, e),
        })?;

        let config: CalculatorConfig = serde_json::from_str(&content).map_err(|e| ConfigError::Serialization {
            message: format!("Failed to parse config file '{}': {}", path_str, e),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let content = serde_json::to_string_pretty(self).map_err(|e| ConfigError::Serialization {
            message: format!("Failed to serialize config: {}", e),
        })?;

        fs::write(&path, content).map_err(|e| ConfigError::Io {
            message: format!("Failed to write config file '{}': {}", path_str, e),
        })
    }
}

fn invalid(parameter: &str, value: impl ToString, reason: &str) -> ConfigError {
    ConfigError::InvalidParameter {
        parameter: parameter.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
