use crate::domain::errors::DomainError;
use std::path::PathBuf;
use thiserror::Error;

/// Errores de infraestructura.
#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("External service error: {0}")]
    ExternalService(String),

    #[error("{program} not found at '{}'. Install it or set its path", path.display())]
    ToolNotFound { program: String, path: PathBuf },

    #[error("{program} exited with {status}: {detail}")]
    ProcessFailed {
        program: String,
        status: String,
        detail: String,
    },

    #[error("Invalid response from {program}: {detail}")]
    InvalidResponse { program: String, detail: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
