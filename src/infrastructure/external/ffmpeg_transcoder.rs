use crate::domain::repositories::{AudioFormat, MediaTranscoder};
use crate::infrastructure::external::process::{cola_de_texto, error_al_iniciar, render_tail};
use crate::infrastructure::InfrastructureError;
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;

const PROGRAM: &str = "ffmpeg";
pub const DEFAULT_MP3_BITRATE: &str = "192k";

/// Extrae audio con el ejecutable `ffmpeg`.
#[derive(Clone, Debug)]
pub struct FfmpegTranscoder {
    ffmpeg_path: Option<PathBuf>,
    mp3_bitrate: String,
}

impl Default for FfmpegTranscoder {
    fn default() -> Self {
        Self {
            ffmpeg_path: None,
            mp3_bitrate: DEFAULT_MP3_BITRATE.to_string(),
        }
    }
}

impl FfmpegTranscoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configura la ruta de ffmpeg.
    pub fn with_ffmpeg_path(mut self, path: PathBuf) -> Self {
        self.ffmpeg_path = Some(path);
        self
    }

    /// Bitrate del MP3 (`128k`, `192k`, `320k`...).
    pub fn with_bitrate(mut self, bitrate: impl Into<String>) -> Self {
        self.mp3_bitrate = bitrate.into();
        self
    }

    fn binario(&self) -> &Path {
        self.ffmpeg_path
            .as_deref()
            .unwrap_or_else(|| Path::new(PROGRAM))
    }

    /// Comprueba que ffmpeg existe y responde a `-version`.
    /// # Errors
    /// - `InfrastructureError::ToolNotFound` si la ruta o el binario no existen.
    /// - `InfrastructureError::ProcessFailed` si ffmpeg responde con error.
    pub async fn verify(&self) -> Result<(), InfrastructureError> {
        if let Some(ruta) = &self.ffmpeg_path {
            if !ruta.exists() {
                return Err(InfrastructureError::ToolNotFound {
                    program: PROGRAM.to_string(),
                    path: ruta.clone(),
                });
            }
        }

        let salida = tokio::process::Command::new(self.binario())
            .arg("-version")
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| error_al_iniciar(PROGRAM, self.binario(), e))?;

        if !salida.status.success() {
            return Err(InfrastructureError::ProcessFailed {
                program: PROGRAM.to_string(),
                status: salida.status.to_string(),
                detail: render_tail(&cola_de_texto(&salida.stderr)),
            });
        }

        Ok(())
    }

    fn argumentos(&self, input: &Path, output: &Path, format: AudioFormat) -> Vec<OsString> {
        let codec = match format {
            AudioFormat::Mp3 => "libmp3lame",
        };
        let mut args: Vec<OsString> = ["-nostdin", "-hide_banner", "-loglevel", "error", "-y"]
            .into_iter()
            .map(OsString::from)
            .collect();
        args.push(OsString::from("-i"));
        args.push(input.as_os_str().to_os_string());
        for arg in ["-vn", "-acodec", codec, "-b:a", self.mp3_bitrate.as_str(), "-f"] {
            args.push(OsString::from(arg));
        }
        args.push(OsString::from(format.extension()));
        args.push(output.as_os_str().to_os_string());
        args
    }
}

#[async_trait]
impl MediaTranscoder for FfmpegTranscoder {
    type Error = InfrastructureError;

    async fn extract_audio(
        &self,
        input: &Path,
        output: &Path,
        format: AudioFormat,
    ) -> Result<(), InfrastructureError> {
        log::debug!(
            "Extracting {} audio from {} to {}",
            format,
            input.display(),
            output.display()
        );

        // El proceso termina antes de retornar: no quedan descriptores abiertos.
        let salida = tokio::process::Command::new(self.binario())
            .args(self.argumentos(input, output, format))
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| error_al_iniciar(PROGRAM, self.binario(), e))?;

        if !salida.status.success() {
            return Err(InfrastructureError::ProcessFailed {
                program: PROGRAM.to_string(),
                status: salida.status.to_string(),
                detail: render_tail(&cola_de_texto(&salida.stderr)),
            });
        }

        if !tokio::fs::try_exists(output).await.unwrap_or(false) {
            return Err(InfrastructureError::ExternalService(format!(
                "{} finished but {} was not written",
                PROGRAM,
                output.display()
            )));
        }

        Ok(())
    }
}
