use crate::domain::filename::{filename_with_extension, safe_filename};
use crate::domain::value_objects::{Itag, MimeType};
use serde::{Deserialize, Serialize};

/// Una codificacion seleccionable de un video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamInfo {
    pub itag: Itag,
    pub mime_type: MimeType,
    pub audio_codec: Option<String>,
    pub video_codec: Option<String>,
    pub resolution: Option<String>,
    pub bitrate_kbps: Option<f64>,
    pub filesize: Option<u64>,
}

impl StreamInfo {
    pub fn has_audio(&self) -> bool {
        self.audio_codec.is_some()
    }

    pub fn has_video(&self) -> bool {
        self.video_codec.is_some()
    }

    pub fn is_audio_only(&self) -> bool {
        self.has_audio() && !self.has_video()
    }

    /// Audio y video en el mismo archivo.
    pub fn is_progressive(&self) -> bool {
        self.has_audio() && self.has_video()
    }

    pub fn extension(&self) -> &str {
        self.mime_type.extension()
    }

    /// Nombre por defecto: titulo saneado mas la extension del MIME.
    /// Si el titulo queda vacio al sanearlo, usa el itag.
    pub fn default_filename(&self, title: &str) -> String {
        let base = safe_filename(title);
        if base.is_empty() {
            return filename_with_extension(&self.itag.to_string(), self.extension());
        }
        filename_with_extension(&base, self.extension())
    }
}

/// Metadatos de un video y sus streams, en el orden preferido por el resolutor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoInfo {
    pub id: String,
    pub title: String,
    pub streams: Vec<StreamInfo>,
}

impl VideoInfo {
    pub fn get_by_itag(&self, itag: Itag) -> Option<&StreamInfo> {
        self.streams.iter().find(|s| s.itag == itag)
    }

    /// Primer stream del filtro: solo audio si `audio_only`, si no el primero.
    pub fn first(&self, audio_only: bool) -> Option<&StreamInfo> {
        self.streams
            .iter()
            .find(|s| !audio_only || s.is_audio_only())
    }

    /// Nombre por defecto de un stream de este video.
    /// Titulo saneado; si queda vacio, el id del video; si no, el itag.
    pub fn default_filename(&self, stream: &StreamInfo) -> String {
        if safe_filename(&self.title).is_empty() {
            return stream.default_filename(&self.id);
        }
        stream.default_filename(&self.title)
    }
}
