use crate::domain::value_objects::Itag;
use thiserror::Error;

/// Errores del dominio.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid video source: {0}")]
    InvalidVideoSource(String),

    #[error("Invalid itag: {0}")]
    InvalidItag(String),

    #[error("Invalid MIME type: {0}")]
    InvalidMimeType(String),

    #[error("Invalid proxy configuration: {0}")]
    InvalidProxy(String),

    #[error("No stream with itag {0}")]
    StreamNotFound(Itag),

    #[error("No stream matches the requested filter (audio_only={audio_only})")]
    NoMatchingStream { audio_only: bool },

    #[error("The stream with itag {0} has no audio")]
    NoAudioTrack(Itag),
}
