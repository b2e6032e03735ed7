//! Z-score anomaly detection
//!
//! Flags observations whose standardized deviation from the series mean
//! exceeds the configured warning/critical thresholds. Data-shape problems
//! are never errors here: an empty, fully-missing, or constant series simply
//! has no anomalies to report, which from the caller's perspective is
//! indistinguishable from "nothing unusual found".

use crate::config::ModelConfig;
use crate::error::Result;
use crate::series::{Period, Series};
use crate::stats;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Anomaly severity classification
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AnomalySeverity {
    /// Within normal dispersion; never emitted by `detect`
    Info,
    /// |z| at or above the warning threshold
    Warning,
    /// |z| at or above the critical threshold
    Critical,
}

impl AnomalySeverity {
    /// Classify an absolute z-score against the two thresholds
    pub fn classify(abs_z: f64, warning: f64, critical: f64) -> Self {
        if abs_z >= critical {
            AnomalySeverity::Critical
        } else if abs_z >= warning {
            AnomalySeverity::Warning
        } else {
            AnomalySeverity::Info
        }
    }
}

impl fmt::Display for AnomalySeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnomalySeverity::Info => write!(f, "INFO"),
            AnomalySeverity::Warning => write!(f, "WARNING"),
            AnomalySeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Which side of the expected value an anomaly lies on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Observed above the expected value
    High,
    /// Observed below the expected value
    Low,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::High => write!(f, "high"),
            Direction::Low => write!(f, "low"),
        }
    }
}

/// One flagged observation.
///
/// Plain typed numbers only; all presentation (badges, messages, colors)
/// belongs to the rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyRecord {
    pub period: Period,
    pub observed_value: f64,
    /// Series mean over the clean observations
    pub expected_value: f64,
    /// observed_value - expected_value
    pub deviation: f64,
    /// Signed standardized deviation
    pub z_score: f64,
    pub severity: AnomalySeverity,
    pub direction: Direction,
}

/// Z-score anomaly detector.
///
/// Stateless and pure: each `detect` call works on its own copy of the input
/// and reads no shared state, so concurrent use only requires per-call
/// instances or a shared reference.
#[derive(Debug, Clone)]
pub struct AnomalyDetector {
    config: ModelConfig,
}

impl AnomalyDetector {
    /// Create a detector, validating the threshold configuration up front
    pub fn new(config: ModelConfig) -> Result<Self> {
        config.validate()?;
        Ok(AnomalyDetector { config })
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Detect anomalies over one series, preserving input order.
    ///
    /// NaN/Inf observations are dropped first. An empty or zero-variance
    /// clean series yields an empty result. Only warning- and critical-level
    /// points are returned.
    pub fn detect(&self, series: &Series) -> Vec<AnomalyRecord> {
        let clean = series.cleaned();
        if clean.is_empty() {
            return Vec::new();
        }

        let values = clean.values();
        if stats::is_constant(&values) {
            log::debug!(
                "KPI '{}' has zero variance over {} observations; no anomalies to detect",
                clean.kpi_id,
                clean.len()
            );
            return Vec::new();
        }

        let mean = stats::mean(&values);
        let std = stats::population_std(&values);

        let mut records = Vec::new();
        for obs in clean.observations() {
            let z_score = (obs.value - mean) / std;
            let severity = AnomalySeverity::classify(
                z_score.abs(),
                self.config.z_threshold_warning,
                self.config.z_threshold_critical,
            );
            if severity == AnomalySeverity::Info {
                continue;
            }

            records.push(AnomalyRecord {
                period: obs.period,
                observed_value: obs.value,
                expected_value: mean,
                deviation: obs.value - mean,
                z_score,
                severity,
                direction: if z_score > 0.0 {
                    Direction::High
                } else {
                    Direction::Low
                },
            });
        }

        log::debug!(
            "KPI '{}': {} of {} observations flagged",
            clean.kpi_id,
            records.len(),
            clean.len()
        );
        records
    }
}

/// One-shot convenience: validate the config and run detection on `series`.
///
/// Configuration problems are the only error this component can produce.
pub fn detect_anomalies(series: &Series, config: &ModelConfig) -> Result<Vec<AnomalyRecord>> {
    let detector = AnomalyDetector::new(config.clone())?;
    Ok(detector.detect(series))
}
