use crate::application::errors::DownloadError;
use crate::domain::filename::filename_with_extension;
use crate::domain::repositories::{AudioFormat, MediaTranscoder, VideoSourceResolver};
use crate::domain::value_objects::{ProxyConfig, VideoSource};
use crate::domain::{DomainError, DownloadRequest, StreamInfo, VideoInfo};
use std::path::{Path, PathBuf};

/// Que hacer con el archivo intermedio cuando se convierte a MP3.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IntermediateCleanup {
    /// Se elimina en toda salida, incluso si la conversion falla.
    #[default]
    Always,
    /// Se conserva si la conversion falla.
    KeepOnFailure,
}

/// Orquesta resolucion, descarga y conversion opcional de un video.
pub struct VideoDownloader<R, T> {
    resolver: R,
    transcoder: T,
    cleanup: IntermediateCleanup,
}

impl<R, T> VideoDownloader<R, T>
where
    R: VideoSourceResolver,
    T: MediaTranscoder,
{
    pub fn new(resolver: R, transcoder: T) -> Self {
        Self {
            resolver,
            transcoder,
            cleanup: IntermediateCleanup::default(),
        }
    }

    /// Configura la politica del archivo intermedio.
    pub fn with_cleanup(mut self, cleanup: IntermediateCleanup) -> Self {
        self.cleanup = cleanup;
        self
    }

    pub fn cleanup(&self) -> IntermediateCleanup {
        self.cleanup
    }

    /// Consulta los streams disponibles sin descargar nada.
    /// # Errors
    /// - `DownloadError::Resolver` si falla la consulta.
    pub async fn list_streams(
        &self,
        source: &VideoSource,
        proxies: Option<&ProxyConfig>,
    ) -> Result<VideoInfo, DownloadError> {
        self.resolver
            .fetch_video(source, proxies)
            .await
            .map_err(DownloadError::resolver)
    }

    /// Descarga el stream pedido y, si se solicita, lo convierte a MP3.
    /// # Arguments
    /// - `request`: peticion normalizada.
    /// # Returns
    /// - Ruta del artefacto final: el archivo descargado o el `.mp3`.
    /// # Errors
    /// - `DownloadError::OutputDirectory` si no se puede crear el directorio.
    /// - `DownloadError::Domain` si el stream no existe o no tiene audio para MP3.
    /// - `DownloadError::Resolver` / `DownloadError::Transcoder` sin modificar.
    pub async fn download(&self, request: &DownloadRequest) -> Result<PathBuf, DownloadError> {
        if let Some(dir) = &request.output_dir {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|source| DownloadError::OutputDirectory {
                    path: dir.clone(),
                    source,
                })?;
        }

        let proxies = request.proxies.as_ref();
        let video = self.list_streams(&request.source, proxies).await?;
        let stream = seleccionar_stream(&video, request)?;

        log::info!("Download started: {}", video.title);

        let filename = self.nombre_final(&video, stream, request.filename.as_deref());
        let ruta = match &request.output_dir {
            Some(dir) => dir.join(&filename),
            None => PathBuf::from(&filename),
        };

        self.resolver
            .download_stream(
                &request.source,
                stream,
                &ruta,
                proxies,
                request.progress.clone(),
            )
            .await
            .map_err(DownloadError::resolver)?;

        if !request.to_mp3 {
            log::info!("Download complete, saved to {}", ruta.display());
            return Ok(ruta);
        }

        if stream.extension() == AudioFormat::Mp3.extension() {
            log::info!("Stream is already MP3, skipping conversion");
            return Ok(ruta);
        }

        let destino = ruta.with_extension(AudioFormat::Mp3.extension());
        self.convertir_a_mp3(&ruta, &destino).await?;
        log::info!("Conversion complete, saved to {}", destino.display());
        Ok(destino)
    }

    fn nombre_final(
        &self,
        video: &VideoInfo,
        stream: &StreamInfo,
        sobrescrito: Option<&str>,
    ) -> String {
        let base = sobrescrito
            .map(|nombre| self.resolver.safe_filename(nombre))
            .filter(|nombre| !nombre.is_empty());
        match base {
            Some(base) => filename_with_extension(&base, stream.extension()),
            None => video.default_filename(stream),
        }
    }

    async fn convertir_a_mp3(
        &self,
        original: &Path,
        destino: &Path,
    ) -> Result<(), DownloadError> {
        let resultado = self
            .transcoder
            .extract_audio(original, destino, AudioFormat::Mp3)
            .await
            .map_err(DownloadError::transcoder);

        let eliminar = resultado.is_ok() || self.cleanup == IntermediateCleanup::Always;
        if !eliminar {
            log::warn!(
                "Conversion failed, keeping intermediate file {}",
                original.display()
            );
            return resultado;
        }

        if let Err(source) = tokio::fs::remove_file(original).await {
            if resultado.is_ok() {
                return Err(DownloadError::Cleanup {
                    path: original.to_path_buf(),
                    source,
                });
            }
            log::warn!(
                "Failed to remove intermediate file {}: {}",
                original.display(),
                source
            );
        }

        resultado
    }
}

fn seleccionar_stream<'a>(
    video: &'a VideoInfo,
    request: &DownloadRequest,
) -> Result<&'a StreamInfo, DomainError> {
    let stream = match request.itag {
        Some(itag) => video
            .get_by_itag(itag)
            .ok_or(DomainError::StreamNotFound(itag))?,
        None => video
            .first(request.audio_only)
            .ok_or(DomainError::NoMatchingStream {
                audio_only: request.audio_only,
            })?,
    };

    if request.to_mp3 && !stream.has_audio() {
        return Err(DomainError::NoAudioTrack(stream.itag));
    }

    Ok(stream)
}
