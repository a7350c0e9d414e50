use crate::domain::filename::safe_filename;
use crate::domain::request::ProgressCallback;
use crate::domain::stream::{StreamInfo, VideoInfo};
use crate::domain::value_objects::{ProxyConfig, VideoSource};
use async_trait::async_trait;
use std::path::Path;

/// Contrato para resolver videos y descargar sus streams.
#[async_trait]
pub trait VideoSourceResolver: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Obtiene titulo y streams disponibles del video.
    /// # Arguments
    /// - `source`: origen normalizado.
    /// - `proxies`: proxies por protocolo, si los hay.
    /// # Returns
    /// - Streams en el orden preferido (mejor primero).
    /// # Errors
    /// - `Self::Error` si el video no esta disponible o falla la consulta.
    async fn fetch_video(
        &self,
        source: &VideoSource,
        proxies: Option<&ProxyConfig>,
    ) -> Result<VideoInfo, Self::Error>;

    /// Escribe los bytes del stream en `output_path`.
    /// # Arguments
    /// - `progress`: callback registrado antes de iniciar la transferencia.
    /// # Errors
    /// - `Self::Error` si falla la transferencia.
    async fn download_stream(
        &self,
        source: &VideoSource,
        stream: &StreamInfo,
        output_path: &Path,
        proxies: Option<&ProxyConfig>,
        progress: Option<ProgressCallback>,
    ) -> Result<(), Self::Error>;

    /// Sanea un nombre de archivo propuesto por el llamador.
    fn safe_filename(&self, raw: &str) -> String {
        safe_filename(raw)
    }
}
