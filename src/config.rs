//! Model configuration
//!
//! [`ModelConfig`] is the single tunable surface shared by the forecaster and
//! the anomaly detector. Values outside their documented ranges fail
//! validation before any data is touched.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Minimum number of clean observations required to fit a forecast model
pub const MIN_FORECAST_POINTS: usize = 4;

/// Maximum number of future periods a single forecast may cover
pub const MAX_FORECAST_HORIZON: usize = 24;

/// Default z-score threshold for warning-level anomalies
pub const DEFAULT_Z_WARNING: f64 = 2.0;

/// Default z-score threshold for critical-level anomalies
pub const DEFAULT_Z_CRITICAL: f64 = 3.0;

/// Regression model used for trend fitting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    /// Gradient-boosted regression trees over the time index
    GradientBoosting,
    /// Ordinary least squares linear trend
    Linear,
}

impl Default for ModelKind {
    fn default() -> Self {
        ModelKind::GradientBoosting
    }
}

/// Configuration for forecasting and anomaly detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Number of future periods to forecast (1..=24)
    pub horizon: usize,
    /// Confidence level for forecast bounds, exclusive (0, 1)
    pub confidence_level: f64,
    /// Regression model kind
    pub model_kind: ModelKind,
    /// Seed for stochastic training components
    pub random_seed: u64,
    /// |z| at or above this value flags a warning-level anomaly
    pub z_threshold_warning: f64,
    /// |z| at or above this value flags a critical-level anomaly
    pub z_threshold_critical: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig {
            horizon: 4,
            confidence_level: 0.95,
            model_kind: ModelKind::GradientBoosting,
            random_seed: 42,
            z_threshold_warning: DEFAULT_Z_WARNING,
            z_threshold_critical: DEFAULT_Z_CRITICAL,
        }
    }
}

impl ModelConfig {
    /// Check every field against its documented range.
    ///
    /// Called by [`crate::KpiForecaster::new`] and
    /// [`crate::AnomalyDetector::new`] so that no fitting ever starts from an
    /// out-of-range configuration.
    pub fn validate(&self) -> Result<()> {
        if self.horizon == 0 || self.horizon > MAX_FORECAST_HORIZON {
            return Err(Error::InvalidConfig(format!(
                "horizon must be in 1..={}, got {}",
                MAX_FORECAST_HORIZON, self.horizon
            )));
        }
        if self.confidence_level <= 0.0 || self.confidence_level >= 1.0 {
            return Err(Error::InvalidConfig(format!(
                "confidence_level must be in (0, 1) exclusive, got {}",
                self.confidence_level
            )));
        }
        if self.z_threshold_warning <= 0.0 || self.z_threshold_critical <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "z-score thresholds must be positive, got warning={}, critical={}",
                self.z_threshold_warning, self.z_threshold_critical
            )));
        }
        if self.z_threshold_warning > self.z_threshold_critical {
            return Err(Error::InvalidConfig(format!(
                "z_threshold_warning ({}) must not exceed z_threshold_critical ({})",
                self.z_threshold_warning, self.z_threshold_critical
            )));
        }
        Ok(())
    }
}

/// Builder for ModelConfig
pub struct ModelConfigBuilder {
    config: ModelConfig,
}

impl ModelConfigBuilder {
    pub fn new() -> Self {
        ModelConfigBuilder {
            config: ModelConfig::default(),
        }
    }

    pub fn horizon(mut self, horizon: usize) -> Self {
        self.config.horizon = horizon;
        self
    }

    pub fn confidence_level(mut self, level: f64) -> Self {
        self.config.confidence_level = level;
        self
    }

    pub fn model_kind(mut self, kind: ModelKind) -> Self {
        self.config.model_kind = kind;
        self
    }

    pub fn random_seed(mut self, seed: u64) -> Self {
        self.config.random_seed = seed;
        self
    }

    pub fn z_threshold_warning(mut self, threshold: f64) -> Self {
        self.config.z_threshold_warning = threshold;
        self
    }

    pub fn z_threshold_critical(mut self, threshold: f64) -> Self {
        self.config.z_threshold_critical = threshold;
        self
    }

    /// Validate and return the finished configuration
    pub fn build(self) -> Result<ModelConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for ModelConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
