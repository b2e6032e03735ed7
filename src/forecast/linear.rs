//! Ordinary least squares linear trend

/// Linear trend model `y = intercept + slope * x`
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LinearTrend {
    pub intercept: f64,
    pub slope: f64,
}

impl LinearTrend {
    /// Fit by least squares.
    ///
    /// Callers guarantee `xs` contains at least two distinct values (time
    /// indices are 0, 1, 2, ...), so the x-variance is never zero.
    pub fn fit(xs: &[f64], ys: &[f64]) -> Self {
        let n = xs.len() as f64;
        let mean_x = xs.iter().sum::<f64>() / n;
        let mean_y = ys.iter().sum::<f64>() / n;

        let mut sxx = 0.0;
        let mut sxy = 0.0;
        for (&x, &y) in xs.iter().zip(ys) {
            let dx = x - mean_x;
            sxx += dx * dx;
            sxy += dx * (y - mean_y);
        }

        let slope = sxy / sxx;
        LinearTrend {
            intercept: mean_y - slope * mean_x,
            slope,
        }
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}
