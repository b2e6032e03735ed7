use thiserror::Error;

/// Error type for the KPI analytics core.
///
/// Data-shape errors (`InsufficientData`, `DegenerateSeries`) are recoverable:
/// the consuming layer is expected to render an explanatory empty state rather
/// than surface them to the end user. `InvalidConfig` indicates an integration
/// bug in the caller and may be propagated as a hard failure.
#[derive(Error, Debug)]
pub enum Error {
    /// A ModelConfig field is outside its documented valid range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Fewer clean observations than the minimum required for fitting
    #[error("Insufficient data: need at least {required} observations, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// Clean observations exist but have zero variance
    #[error("Degenerate series: {0}")]
    DegenerateSeries(String),

    /// A forecast was requested before the model was fitted
    #[error("Model not fitted. Call fit() first")]
    NotFitted,

    /// A domain value is malformed (e.g. a quarter outside 1..=4)
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, Error>;
