use crate::domain::errors::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tipo MIME de un stream (`type/subtype` con parametros opcionales).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MimeType {
    kind: String,
    subtype: String,
}

impl MimeType {
    /// Interpreta un tipo MIME como `video/mp4; codecs="avc1"`.
    /// # Errors
    /// - `DomainError::InvalidMimeType` si falta el tipo o el subtipo.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let esencia = raw.split(';').next().unwrap_or_default().trim();
        let (kind, subtype) = esencia
            .split_once('/')
            .ok_or_else(|| DomainError::InvalidMimeType(raw.to_string()))?;
        let kind = kind.trim().to_ascii_lowercase();
        let subtype = subtype.trim().to_ascii_lowercase();

        let valido = |s: &str| {
            !s.is_empty()
                && s.chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '+' | '.'))
        };
        if !valido(&kind) || !valido(&subtype) {
            return Err(DomainError::InvalidMimeType(raw.to_string()));
        }

        Ok(Self { kind, subtype })
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn subtype(&self) -> &str {
        &self.subtype
    }

    /// Extension de archivo derivada del subtipo (`audio/mpeg` es `mp3`).
    pub fn extension(&self) -> &str {
        match (self.kind.as_str(), self.subtype.as_str()) {
            ("audio", "mpeg") => "mp3",
            _ => self.subtype.as_str(),
        }
    }
}

impl fmt::Display for MimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.subtype)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_type_with_codecs() {
        let mime = MimeType::parse("video/mp4; codecs=\"avc1.42001E, mp4a.40.2\"").unwrap();
        assert_eq!(mime.kind(), "video");
        assert_eq!(mime.extension(), "mp4");
        assert_eq!(mime.to_string(), "video/mp4");
    }

    #[test]
    fn test_mime_type_audio_webm() {
        let mime = MimeType::parse("AUDIO/WebM").unwrap();
        assert_eq!(mime.extension(), "webm");
    }

    #[test]
    fn test_mime_type_audio_mpeg_is_mp3() {
        assert_eq!(MimeType::parse("audio/mpeg").unwrap().extension(), "mp3");
        assert_eq!(MimeType::parse("audio/mp3").unwrap().extension(), "mp3");
        assert_eq!(MimeType::parse("video/mpeg").unwrap().extension(), "mpeg");
    }

    #[test]
    fn test_mime_type_invalid_fails() {
        for raw in ["", "video", "video/", "/mp4", "video/mp 4"] {
            assert!(MimeType::parse(raw).is_err(), "Expected {} to fail", raw);
        }
    }
}
