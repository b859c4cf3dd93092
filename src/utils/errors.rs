use thiserror::Error;

/// Errors raised by the trend and range pipeline
///
/// None of these are fatal: the renderer degrades (skips the trend curve or
/// draws a placeholder) instead of aborting.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    #[error("Singular system: pivot {pivot} in column {column} is too close to zero")]
    SingularSystem { column: usize, pivot: f64 },
    #[error("Empty dataset: no points to derive a range from")]
    EmptyDataset,
    #[error("Degree {degree} needs at least {required} distinct mileage values, found {distinct}")]
    InsufficientDataForDegree {
        degree: usize,
        required: usize,
        distinct: usize,
    },
    #[error("Dimension mismatch: {rows}x{cols} matrix with vector of length {len}")]
    DimensionMismatch { rows: usize, cols: usize, len: usize },
    #[error("Invalid point #{index}: mileage={mileage}, price={price}")]
    InvalidPoint { index: usize, mileage: f64, price: f64 },
}

impl ChartError {
    /// True for every failure that means "no trend curve can be fitted"
    pub fn is_singular(&self) -> bool {
        matches!(
            self,
            ChartError::SingularSystem { .. } | ChartError::InsufficientDataForDegree { .. }
        )
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: '{value}' ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Dataset loading errors
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse dataset: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Dataset rejected: {0}")]
    Invalid(#[from] ChartError),
}

/// Rendering errors
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to draw chart: {0}")]
    Drawing(String),
    #[error("Render task failed: {0}")]
    Task(String),
}
