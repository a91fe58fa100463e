//! Error types shared across SmoothCam crates.

use std::path::PathBuf;

/// Top-level error type for SmoothCam operations.
#[derive(Debug, thiserror::Error)]
pub enum SmoothCamError {
    #[error("Scene error: {message}")]
    Scene { message: String },

    #[error("Simulation error: {message}")]
    Simulation { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using SmoothCamError.
pub type SmoothCamResult<T> = Result<T, SmoothCamError>;

impl SmoothCamError {
    pub fn scene(msg: impl Into<String>) -> Self {
        Self::Scene {
            message: msg.into(),
        }
    }

    pub fn simulation(msg: impl Into<String>) -> Self {
        Self::Simulation {
            message: msg.into(),
        }
    }
}
