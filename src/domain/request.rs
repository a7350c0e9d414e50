use crate::domain::value_objects::{Itag, ProxyConfig, VideoSource};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Avance de una transferencia.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownloadProgress {
    pub itag: Itag,
    pub downloaded_bytes: u64,
    pub total_bytes: Option<u64>,
}

impl DownloadProgress {
    pub fn bytes_remaining(&self) -> Option<u64> {
        self.total_bytes
            .map(|total| total.saturating_sub(self.downloaded_bytes))
    }

    /// Porcentaje completado, si se conoce el total.
    pub fn percent(&self) -> Option<f64> {
        match self.total_bytes {
            Some(total) if total > 0 => {
                Some((self.downloaded_bytes as f64 / total as f64 * 100.0).min(100.0))
            }
            _ => None,
        }
    }
}

/// Callback invocado por el resolutor durante la transferencia.
pub type ProgressCallback = Arc<dyn Fn(DownloadProgress) + Send + Sync>;

/// Peticion de descarga; vive solo durante una llamada.
#[derive(Clone)]
pub struct DownloadRequest {
    pub source: VideoSource,
    pub itag: Option<Itag>,
    pub audio_only: bool,
    pub output_dir: Option<PathBuf>,
    pub filename: Option<String>,
    pub proxies: Option<ProxyConfig>,
    pub progress: Option<ProgressCallback>,
    pub to_mp3: bool,
}

impl DownloadRequest {
    pub fn new(source: VideoSource) -> Self {
        Self {
            source,
            itag: None,
            audio_only: false,
            output_dir: None,
            filename: None,
            proxies: None,
            progress: None,
            to_mp3: false,
        }
    }

    pub fn with_itag(mut self, itag: Itag) -> Self {
        self.itag = Some(itag);
        self
    }

    pub fn with_audio_only(mut self, audio_only: bool) -> Self {
        self.audio_only = audio_only;
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Sobrescribe el nombre base; la extension siempre sale del MIME del stream.
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn with_proxies(mut self, proxies: ProxyConfig) -> Self {
        self.proxies = (!proxies.is_empty()).then_some(proxies);
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress = Some(callback);
        self
    }

    pub fn with_mp3(mut self, to_mp3: bool) -> Self {
        self.to_mp3 = to_mp3;
        self
    }
}

impl fmt::Debug for DownloadRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DownloadRequest")
            .field("source", &self.source)
            .field("itag", &self.itag)
            .field("audio_only", &self.audio_only)
            .field("output_dir", &self.output_dir)
            .field("filename", &self.filename)
            .field("proxies", &self.proxies)
            .field("progress", &self.progress.is_some())
            .field("to_mp3", &self.to_mp3)
            .finish()
    }
}
