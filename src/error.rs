use thiserror::Error;

/// Errors produced by the engine and its supporting modules.
#[derive(Debug, Error)]
pub enum LifeError {
    #[error("cell ({row}, {col}) is outside of the {rows}x{cols} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    #[error("grid dimensions must be positive, got {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },
    #[error("probability {0} must be between 0.0 and 1.0")]
    InvalidProbability(f64),
    #[error("could not parse grid: {0}")]
    Parse(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LifeError>;
