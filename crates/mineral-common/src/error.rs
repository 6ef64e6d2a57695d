//! Error types for mineral analysis.

use thiserror::Error;

/// Result type alias using MineralError.
pub type MineralResult<T> = Result<T, MineralError>;

/// Primary error type for analysis operations.
///
/// Numeric degeneracy (division by zero, flat rasters) is never reported
/// through this type; those cases are recovered in place by each stage.
#[derive(Debug, Error)]
pub enum MineralError {
    // === Precondition Errors ===
    #[error("Band shape mismatch: expected {expected}, got {actual} for band '{band}'")]
    ShapeMismatch {
        band: String,
        expected: String,
        actual: String,
    },

    #[error("Raster is empty: {0}")]
    EmptyRaster(String),

    #[error("Invalid bounding box: {0}")]
    InvalidBoundingBox(String),

    #[error("Invalid parameter value for '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    #[error("Geotransform is not invertible")]
    DegenerateTransform,

    // === Data Errors ===
    #[error("Scene not found: {0}")]
    SceneNotFound(String),

    #[error("Failed to load scene: {0}")]
    SceneLoad(String),

    // === Rendering Errors ===
    #[error("Rendering failed: {0}")]
    RenderError(String),

    // === Infrastructure Errors ===
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl MineralError {
    /// Shorthand for an `InvalidParameter` error.
    pub fn invalid_parameter(param: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            param: param.into(),
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            MineralError::ShapeMismatch { .. }
            | MineralError::EmptyRaster(_)
            | MineralError::InvalidBoundingBox(_)
            | MineralError::InvalidParameter { .. }
            | MineralError::DegenerateTransform
            | MineralError::SceneLoad(_) => 400,

            MineralError::SceneNotFound(_) => 404,

            _ => 500,
        }
    }
}

/// IO and JSON failures reached through `?` are server-side faults. Readers
/// of caller-supplied input map their errors to `SceneNotFound` or
/// `SceneLoad` explicitly.
impl From<std::io::Error> for MineralError {
    fn from(err: std::io::Error) -> Self {
        MineralError::InternalError(format!("I/O error: {}", err))
    }
}

impl From<serde_json::Error> for MineralError {
    fn from(err: serde_json::Error) -> Self {
        MineralError::InternalError(format!("JSON error: {}", err))
    }
}
