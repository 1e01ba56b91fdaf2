use std::path::PathBuf;

use flexsort_core::{GridModelError, MetricsError};
use flexsort_runtime::SessionError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DemoError>;

#[derive(Debug, Error)]
pub enum DemoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid metrics: {0}")]
    Metrics(#[from] MetricsError),

    #[error("grid model error: {0}")]
    Model(#[from] GridModelError),

    #[error("drag session error: {0}")]
    Session(#[from] SessionError),

    #[error("cannot read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid trace: {message}")]
    InvalidTrace { message: String },
}

impl DemoError {
    /// Process exit code: 2 for bad input files, 1 otherwise.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Json(_) | Self::Metrics(_) | Self::InvalidTrace { .. } | Self::ReadFile { .. } => 2,
            _ => 1,
        }
    }

    #[must_use]
    pub fn invalid_trace(message: impl Into<String>) -> Self {
        Self::InvalidTrace {
            message: message.into(),
        }
    }
}
