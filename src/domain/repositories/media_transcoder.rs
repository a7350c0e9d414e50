use async_trait::async_trait;
use std::fmt;
use std::path::Path;

/// Formatos de audio de salida.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioFormat {
    Mp3,
}

impl AudioFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "mp3",
        }
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Contrato para extraer la pista de audio de un contenedor.
#[async_trait]
pub trait MediaTranscoder: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Abre `input`, extrae su audio y lo escribe en `output` con el formato dado.
    /// # Notas
    /// - Todos los recursos abiertos se liberan antes de retornar, con exito o error.
    /// # Errors
    /// - `Self::Error` si falla la apertura, la extraccion o la codificacion.
    async fn extract_audio(
        &self,
        input: &Path,
        output: &Path,
        format: AudioFormat,
    ) -> Result<(), Self::Error>;
}
