//! Error types for the editor boundaries.
//!
//! The routing engine itself is infallible. Errors only surface where data
//! enters the core: pointer input, settings and document JSON.

use thiserror::Error;

/// Editor errors.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("Non-finite coordinate: ({x}, {y})")]
    NonFiniteCoordinate { x: f64, y: f64 },
    #[error("Invalid grid size: {0}")]
    InvalidGridSize(f64),
    #[error("Invalid setting: {0}")]
    InvalidSetting(String),
    #[error("Invalid shape: {0}")]
    InvalidShape(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for editor operations.
pub type EditorResult<T> = Result<T, EditorError>;

/// Reject points that are not finite on both axes.
pub fn ensure_finite(point: kurbo::Point) -> EditorResult<kurbo::Point> {
    if point.x.is_finite() && point.y.is_finite() {
        Ok(point)
    } else {
        Err(EditorError::NonFiniteCoordinate { x: point.x, y: point.y })
    }
}
