//! # kpicore
//!
//! Forecasting and anomaly detection core for KPI analytics dashboards.
//!
//! Two independent, stateless components operate on an ordered series of
//! `(period, value)` observations supplied by an upstream repository layer:
//!
//! - [`KpiForecaster`] fits a regression model over the time index and
//!   produces point forecasts with confidence bounds
//! - [`AnomalyDetector`] flags observations whose z-score against the series
//!   mean exceeds configurable thresholds
//!
//! Both return plain typed structures for a rendering layer to present; this
//! crate performs no I/O, holds no state between invocations, and uses no
//! global randomness (stochastic training is seeded through [`ModelConfig`]).
//!
//! # Example
//!
//! ```rust
//! use kpicore::{fit_and_forecast, detect_anomalies, ModelConfig, Period, Series};
//!
//! let start = Period::new(2022, 1).unwrap();
//! let series = Series::from_values(
//!     "gdp_growth",
//!     "region-01",
//!     start,
//!     &[2.1, 2.4, 2.2, 2.8, 3.0, 2.9, 3.3, 3.5],
//! );
//! let config = ModelConfig::default();
//!
//! let points = fit_and_forecast(&series, &config).unwrap();
//! assert_eq!(points.len(), config.horizon);
//! for p in &points {
//!     assert!(p.lower_bound <= p.predicted_value && p.predicted_value <= p.upper_bound);
//! }
//!
//! let anomalies = detect_anomalies(&series, &config).unwrap();
//! assert!(anomalies.is_empty());
//! ```

pub mod anomaly;
pub mod config;
pub mod error;
pub mod forecast;
pub mod series;
pub mod stats;

// Re-export commonly used types
pub use anomaly::{detect_anomalies, AnomalyDetector, AnomalyRecord, AnomalySeverity, Direction};
pub use config::{
    ModelConfig, ModelConfigBuilder, ModelKind, MAX_FORECAST_HORIZON, MIN_FORECAST_POINTS,
};
pub use error::{Error, Result};
pub use forecast::{fit_and_forecast, ForecastMetrics, ForecastPoint, KpiForecaster};
pub use series::{Observation, Period, Series};

// Export version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
