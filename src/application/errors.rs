use crate::domain::errors::DomainError;
use std::path::PathBuf;
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errores de una descarga completa.
#[derive(Error, Debug)]
pub enum DownloadError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Failed to create output directory {}: {source}", path.display())]
    OutputDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Resolver error: {0}")]
    Resolver(#[source] BoxError),

    #[error("Transcoder error: {0}")]
    Transcoder(#[source] BoxError),

    #[error("Failed to remove intermediate file {}: {source}", path.display())]
    Cleanup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DownloadError {
    pub(crate) fn resolver<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Resolver(Box::new(err))
    }

    pub(crate) fn transcoder<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Transcoder(Box::new(err))
    }

    /// Fallo previo a cualquier escritura de datos.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::Domain(DomainError::NoAudioTrack(_))
                | Self::Domain(DomainError::StreamNotFound(_))
                | Self::Domain(DomainError::NoMatchingStream { .. })
        )
    }
}
