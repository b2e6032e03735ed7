//! KPI forecasting
//!
//! Fits a regression model over a historical series and produces point
//! forecasts with confidence bounds for a requested horizon. Supported model
//! kinds:
//!
//! - Gradient-boosted regression trees (default)
//! - Linear trend (ordinary least squares)
//!
//! Both regress the observed value on the integer time index alone; there are
//! no external regressors. Models are fitted per request and never persisted.
//!
//! # Confidence bounds
//!
//! The band around each point forecast is symmetric and constant across the
//! horizon: `z * residual_std`, where `residual_std` is the population
//! standard deviation of the in-sample residuals and `z` is the two-sided
//! normal quantile for the configured confidence level. The same policy
//! applies to both model kinds, so switching kinds never changes the band
//! semantics.

mod boosting;
mod linear;

use crate::config::{ModelConfig, ModelKind, MIN_FORECAST_POINTS};
use crate::error::{Error, Result};
use crate::series::{Period, Series};
use crate::stats;
use crate::forecast::boosting::{BoostingParams, GradientBoostedTrend};
use crate::forecast::linear::LinearTrend;
use serde::{Deserialize, Serialize};

/// One forecasted period with its confidence bounds.
///
/// Invariant: `lower_bound <= predicted_value <= upper_bound`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// Future period, strictly after the last observed period
    pub period: Period,
    pub predicted_value: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

/// In-sample fit quality measures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastMetrics {
    /// Mean absolute error of the training fit
    pub mae: f64,
    /// Root mean squared error of the training fit
    pub rmse: f64,
    /// Population standard deviation of the training residuals
    pub residual_std: f64,
}

/// Trend model dispatch: the configured kind selects an implementation at
/// call time.
#[derive(Debug, Clone)]
enum TrendModel {
    Linear(LinearTrend),
    GradientBoosting(GradientBoostedTrend),
}

impl TrendModel {
    fn predict(&self, x: f64) -> f64 {
        match self {
            TrendModel::Linear(model) => model.predict(x),
            TrendModel::GradientBoosting(model) => model.predict(x),
        }
    }
}

/// State captured by a successful fit
#[derive(Debug, Clone)]
struct FittedState {
    model: TrendModel,
    last_period: Period,
    n_obs: usize,
    residuals: Vec<f64>,
    residual_std: f64,
}

/// Per-KPI forecasting engine.
///
/// Stateless between requests: construct, fit on one series, forecast, drop.
/// Safe to use from multiple threads as long as each invocation owns its own
/// instance.
#[derive(Debug, Clone)]
pub struct KpiForecaster {
    config: ModelConfig,
    state: Option<FittedState>,
}

impl KpiForecaster {
    /// Create a forecaster, validating the configuration up front so that no
    /// fitting ever starts from an out-of-range config.
    pub fn new(config: ModelConfig) -> Result<Self> {
        config.validate()?;
        Ok(KpiForecaster {
            config,
            state: None,
        })
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Fit the configured model on one series.
    ///
    /// NaN/Inf observations are dropped first; the minimum-count and
    /// zero-variance checks then apply to the cleaned series.
    pub fn fit(&mut self, series: &Series) -> Result<()> {
        let clean = series.cleaned();
        let n = clean.len();
        if n < MIN_FORECAST_POINTS {
            return Err(Error::InsufficientData {
                required: MIN_FORECAST_POINTS,
                actual: n,
            });
        }

        let values = clean.values();
        if stats::is_constant(&values) {
            return Err(Error::DegenerateSeries(format!(
                "all {} observations of KPI '{}' share the value {}; a flat line cannot be forecast",
                n, clean.kpi_id, values[0]
            )));
        }

        log::debug!(
            "fitting {:?} model for KPI '{}' ({} clean of {} raw observations)",
            self.config.model_kind,
            clean.kpi_id,
            n,
            series.len()
        );

        let xs: Vec<f64> = (0..n).map(|i| i as f64).collect();
        let model = match self.config.model_kind {
            ModelKind::Linear => TrendModel::Linear(LinearTrend::fit(&xs, &values)),
            ModelKind::GradientBoosting => TrendModel::GradientBoosting(GradientBoostedTrend::fit(
                &xs,
                &values,
                &BoostingParams::default(),
                self.config.random_seed,
            )),
        };

        let residuals: Vec<f64> = xs
            .iter()
            .zip(&values)
            .map(|(&x, &y)| y - model.predict(x))
            .collect();
        let residual_std = stats::population_std(&residuals);

        // n >= MIN_FORECAST_POINTS, so the last observation exists
        let last_period = clean.observations()[n - 1].period;

        self.state = Some(FittedState {
            model,
            last_period,
            n_obs: n,
            residuals,
            residual_std,
        });
        Ok(())
    }

    /// Produce `horizon` forecast points, labelled by consecutive quarters
    /// continuing directly after the last observed period.
    pub fn forecast(&self) -> Result<Vec<ForecastPoint>> {
        let state = self.state.as_ref().ok_or(Error::NotFitted)?;

        let margin = stats::two_sided_z(self.config.confidence_level) * state.residual_std;
        let mut points = Vec::with_capacity(self.config.horizon);
        let mut period = state.last_period;

        for h in 0..self.config.horizon {
            period = period.next();
            let x = (state.n_obs + h) as f64;
            let predicted_value = state.model.predict(x);
            points.push(ForecastPoint {
                period,
                predicted_value,
                lower_bound: predicted_value - margin,
                upper_bound: predicted_value + margin,
            });
        }
        Ok(points)
    }

    /// Fit and forecast in one call
    pub fn fit_and_forecast(&mut self, series: &Series) -> Result<Vec<ForecastPoint>> {
        self.fit(series)?;
        self.forecast()
    }

    /// In-sample fit metrics of the last `fit`
    pub fn training_metrics(&self) -> Result<ForecastMetrics> {
        let state = self.state.as_ref().ok_or(Error::NotFitted)?;
        let n = state.residuals.len() as f64;
        let mae = state.residuals.iter().map(|r| r.abs()).sum::<f64>() / n;
        let mse = state.residuals.iter().map(|r| r * r).sum::<f64>() / n;
        Ok(ForecastMetrics {
            mae,
            rmse: mse.sqrt(),
            residual_std: state.residual_std,
        })
    }
}

/// One-shot convenience: validate the config, fit on `series`, forecast.
pub fn fit_and_forecast(series: &Series, config: &ModelConfig) -> Result<Vec<ForecastPoint>> {
    let mut forecaster = KpiForecaster::new(config.clone())?;
    forecaster.fit_and_forecast(series)
}
