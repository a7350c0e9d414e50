use crate::domain::errors::DomainError;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fmt;

const WATCH_URL_PREFIX: &str = "https://www.youtube.com/watch?v=";

/// Origen de video normalizado: siempre una URL absoluta.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VideoSource(String);

impl VideoSource {
    /// Crea un origen a partir de una URL o de un id de video.
    /// # Arguments
    /// - `raw`: URL completa o id de video.
    /// # Notas
    /// - Si no contiene `http` se trata como id y se expande a la URL de watch.
    /// # Errors
    /// - `DomainError::InvalidVideoSource` si el formato es invalido.
    pub fn new(raw: impl Into<String>) -> Result<Self, DomainError> {
        let raw = raw.into().trim().to_string();

        if raw.is_empty() {
            return Err(DomainError::InvalidVideoSource(
                "Source cannot be empty".to_string(),
            ));
        }

        if !raw.contains("http") {
            if !es_id_valido(&raw) {
                return Err(DomainError::InvalidVideoSource(format!(
                    "'{}' is neither a URL nor a video id",
                    raw
                )));
            }
            return Ok(Self(format!("{}{}", WATCH_URL_PREFIX, raw)));
        }

        let url = Url::parse(&raw)
            .map_err(|e| DomainError::InvalidVideoSource(format!("{}: {}", raw, e)))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(DomainError::InvalidVideoSource(
                "URL must start with http:// or https://".to_string(),
            ));
        }

        Ok(Self(raw))
    }

    /// Devuelve la URL como `&str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Esquema de la URL (`http` o `https`).
    pub fn scheme(&self) -> &str {
        self.0.split("://").next().unwrap_or("https")
    }

    /// Id del video si la URL tiene una forma conocida.
    pub fn video_id(&self) -> Option<String> {
        let url = Url::parse(&self.0).ok()?;
        if let Some((_, id)) = url.query_pairs().find(|(k, _)| k == "v") {
            return Some(id.into_owned()).filter(|id| es_id_valido(id));
        }
        if url.host_str() == Some("youtu.be") {
            let id = url.path().trim_start_matches('/');
            return Some(id.to_string()).filter(|id| es_id_valido(id));
        }
        None
    }
}

fn es_id_valido(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

impl TryFrom<&str> for VideoSource {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for VideoSource {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for VideoSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
