//! Time series primitives
//!
//! A [`Series`] is an ordered sequence of [`Observation`]s for exactly one
//! KPI under one filter context (tenant, region). Values may arrive with
//! NaN/Inf entries from upstream queries; [`Series::cleaned`] drops them
//! before any statistics are computed. These are transient value objects:
//! nothing here is cached or persisted across requests.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Calendar-quarter period label
///
/// Ordering follows (year, quarter), so derived `Ord` matches chronological
/// order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Period {
    pub year: i32,
    /// Quarter within the year, 1..=4
    pub quarter: u8,
}

impl Period {
    /// Create a period, rejecting quarters outside 1..=4
    pub fn new(year: i32, quarter: u8) -> Result<Self> {
        if !(1..=4).contains(&quarter) {
            return Err(Error::InvalidInput(format!(
                "quarter must be in 1..=4, got {}",
                quarter
            )));
        }
        Ok(Period { year, quarter })
    }

    /// The immediately following quarter, wrapping Q4 into Q1 of the next year
    pub fn next(self) -> Self {
        if self.quarter >= 4 {
            Period {
                year: self.year + 1,
                quarter: 1,
            }
        } else {
            Period {
                year: self.year,
                quarter: self.quarter + 1,
            }
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-Q{}", self.year, self.quarter)
    }
}

/// A single (period, value) data point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub period: Period,
    /// May be NaN or infinite before cleaning
    pub value: f64,
}

impl Observation {
    pub fn new(period: Period, value: f64) -> Self {
        Observation { period, value }
    }

    /// Whether the value is finite (neither NaN nor infinite)
    pub fn is_valid(&self) -> bool {
        self.value.is_finite()
    }
}

/// Ordered observations for one KPI under one filter context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    /// Opaque KPI identifier, echoed through to result consumers
    pub kpi_id: String,
    /// Opaque region identifier from the upstream filter context
    pub region_id: String,
    observations: Vec<Observation>,
}

impl Series {
    /// Create an empty series
    pub fn new(kpi_id: impl Into<String>, region_id: impl Into<String>) -> Self {
        Series {
            kpi_id: kpi_id.into(),
            region_id: region_id.into(),
            observations: Vec::new(),
        }
    }

    /// Create a series from pre-built observations, preserving their order
    pub fn from_observations(
        kpi_id: impl Into<String>,
        region_id: impl Into<String>,
        observations: Vec<Observation>,
    ) -> Self {
        Series {
            kpi_id: kpi_id.into(),
            region_id: region_id.into(),
            observations,
        }
    }

    /// Create a series of consecutive quarters starting at `start`
    pub fn from_values(
        kpi_id: impl Into<String>,
        region_id: impl Into<String>,
        start: Period,
        values: &[f64],
    ) -> Self {
        let mut observations = Vec::with_capacity(values.len());
        let mut period = start;
        for (i, &value) in values.iter().enumerate() {
            if i > 0 {
                period = period.next();
            }
            observations.push(Observation::new(period, value));
        }
        Series::from_observations(kpi_id, region_id, observations)
    }

    /// Append an observation
    pub fn push(&mut self, period: Period, value: f64) {
        self.observations.push(Observation::new(period, value));
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// The period of the final observation, if any
    pub fn last_period(&self) -> Option<Period> {
        self.observations.last().map(|obs| obs.period)
    }

    /// Values in observation order
    pub fn values(&self) -> Vec<f64> {
        self.observations.iter().map(|obs| obs.value).collect()
    }

    /// A copy with NaN/Inf observations dropped, order preserved.
    ///
    /// Cleaning is idempotent: running it on an already-clean series returns
    /// an identical series.
    pub fn cleaned(&self) -> Series {
        Series {
            kpi_id: self.kpi_id.clone(),
            region_id: self.region_id.clone(),
            observations: self
                .observations
                .iter()
                .copied()
                .filter(Observation::is_valid)
                .collect(),
        }
    }
}
