use crate::domain::repositories::VideoSourceResolver;
use crate::domain::value_objects::{Itag, MimeType, ProxyConfig, VideoSource};
use crate::domain::{DownloadProgress, ProgressCallback, StreamInfo, VideoInfo};
use crate::infrastructure::external::process::{
    cola_de_texto, error_al_iniciar, leer_lineas, render_tail,
};
use crate::infrastructure::InfrastructureError;
use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

const PROGRAM: &str = "yt-dlp";
const PROGRESS_MARKER: &str = "ytgrab-progress";
const PROGRESS_TEMPLATE: &str = "download:ytgrab-progress %(progress.downloaded_bytes)s \
%(progress.total_bytes)s %(progress.total_bytes_estimate)s";
const CODEC_NONE: &str = "none";

#[derive(Debug, Deserialize)]
struct YtDlpVideo {
    id: String,
    title: String,
    #[serde(default)]
    formats: Vec<YtDlpFormat>,
}

#[derive(Debug, Deserialize)]
struct YtDlpFormat {
    format_id: String,
    ext: String,
    acodec: Option<String>,
    vcodec: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    tbr: Option<f64>,
    filesize: Option<u64>,
    filesize_approx: Option<u64>,
}

/// Resolutor de videos sobre el ejecutable `yt-dlp`.
#[derive(Clone, Debug, Default)]
pub struct YtDlpClient {
    ytdlp_path: Option<PathBuf>,
}

impl YtDlpClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configura la ruta de yt-dlp.
    pub fn with_ytdlp_path(mut self, path: PathBuf) -> Self {
        self.ytdlp_path = Some(path);
        self
    }

    fn binario(&self) -> &Path {
        self.ytdlp_path
            .as_deref()
            .unwrap_or_else(|| Path::new(PROGRAM))
    }

    fn comando_base(&self, source: &VideoSource, proxies: Option<&ProxyConfig>) -> Command {
        let mut command = Command::new(self.binario());
        command.kill_on_drop(true);
        command
            .arg("--no-playlist")
            .arg("--no-warnings")
            .arg("--no-cache-dir");

        if let Some(proxy) = proxies.and_then(|p| p.for_scheme(source.scheme())) {
            command.arg("--proxy").arg(proxy);
        }

        command
    }
}

#[async_trait]
impl VideoSourceResolver for YtDlpClient {
    type Error = InfrastructureError;

    async fn fetch_video(
        &self,
        source: &VideoSource,
        proxies: Option<&ProxyConfig>,
    ) -> Result<VideoInfo, InfrastructureError> {
        log::debug!("Resolving {} with {}", source, self.binario().display());

        let output = self
            .comando_base(source, proxies)
            .arg("-J")
            .arg(source.as_str())
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| error_al_iniciar(PROGRAM, self.binario(), e))?;

        if !output.status.success() {
            return Err(InfrastructureError::ProcessFailed {
                program: PROGRAM.to_string(),
                status: output.status.to_string(),
                detail: render_tail(&cola_de_texto(&output.stderr)),
            });
        }

        parsear_video(&output.stdout)
    }

    async fn download_stream(
        &self,
        source: &VideoSource,
        stream: &StreamInfo,
        output_path: &Path,
        proxies: Option<&ProxyConfig>,
        progress: Option<ProgressCallback>,
    ) -> Result<(), InfrastructureError> {
        let mut child = self
            .comando_base(source, proxies)
            .arg("-f")
            .arg(stream.itag.to_string())
            .arg("-o")
            .arg(escapar_plantilla(output_path))
            .arg("--no-part")
            .arg("--no-mtime")
            .arg("--fixup")
            .arg("never")
            .arg("--newline")
            .arg("--progress-template")
            .arg(PROGRESS_TEMPLATE)
            .arg(source.as_str())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| error_al_iniciar(PROGRAM, self.binario(), e))?;

        log::debug!("{} started (PID: {:?})", PROGRAM, child.id());

        let itag = stream.itag;
        let notificar = |linea: &str| match parsear_progreso(linea, itag) {
            Some(avance) => {
                if let Some(cb) = &progress {
                    cb(avance);
                }
                true
            }
            None => false,
        };

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let (_, cola_stderr) = tokio::join!(
            async move {
                match stdout {
                    Some(out) => leer_lineas(out, notificar).await,
                    None => Default::default(),
                }
            },
            async move {
                match stderr {
                    Some(err) => leer_lineas(err, notificar).await,
                    None => Default::default(),
                }
            },
        );

        let status = child.wait().await.map_err(|e| {
            InfrastructureError::ExternalService(format!("Failed to wait for {}: {}", PROGRAM, e))
        })?;

        if !status.success() {
            return Err(InfrastructureError::ProcessFailed {
                program: PROGRAM.to_string(),
                status: status.to_string(),
                detail: render_tail(&cola_stderr),
            });
        }

        if !tokio::fs::try_exists(output_path).await.unwrap_or(false) {
            return Err(InfrastructureError::ExternalService(format!(
                "{} reported success but {} was not written",
                PROGRAM,
                output_path.display()
            )));
        }

        Ok(())
    }
}

fn parsear_video(json: &[u8]) -> Result<VideoInfo, InfrastructureError> {
    let video: YtDlpVideo =
        serde_json::from_slice(json).map_err(|e| InfrastructureError::InvalidResponse {
            program: PROGRAM.to_string(),
            detail: e.to_string(),
        })?;

    let mut streams: Vec<StreamInfo> = video
        .formats
        .into_iter()
        .rev()
        .filter_map(convertir_formato)
        .collect();
    // Progresivos primero, conservando el orden de calidad.
    streams.sort_by_key(|s| !s.is_progressive());

    Ok(VideoInfo {
        id: video.id,
        title: video.title,
        streams,
    })
}

fn convertir_formato(formato: YtDlpFormat) -> Option<StreamInfo> {
    let itag = match Itag::parse(&formato.format_id) {
        Ok(itag) => itag,
        Err(_) => {
            log::debug!("Skipping non-numeric format {}", formato.format_id);
            return None;
        }
    };

    let audio_codec = codec(formato.acodec);
    let video_codec = codec(formato.vcodec);
    if audio_codec.is_none() && video_codec.is_none() {
        return None;
    }

    let kind = if video_codec.is_some() { "video" } else { "audio" };
    let mime_type = MimeType::parse(&format!("{}/{}", kind, formato.ext)).ok()?;
    let resolution = match (formato.width, formato.height) {
        (Some(w), Some(h)) => Some(format!("{}x{}", w, h)),
        (None, Some(h)) => Some(format!("{}p", h)),
        _ => None,
    };

    Some(StreamInfo {
        itag,
        mime_type,
        audio_codec,
        video_codec,
        resolution,
        bitrate_kbps: formato.tbr,
        filesize: formato.filesize.or(formato.filesize_approx),
    })
}

fn codec(valor: Option<String>) -> Option<String> {
    valor.filter(|c| !c.is_empty() && c != CODEC_NONE)
}

fn parsear_progreso(linea: &str, itag: Itag) -> Option<DownloadProgress> {
    let resto = linea.trim().strip_prefix(PROGRESS_MARKER)?;
    let mut campos = resto.split_whitespace();
    let descargados = numero(campos.next()?)?;
    let total = campos.next().and_then(numero);
    let estimado = campos.next().and_then(numero);

    Some(DownloadProgress {
        itag,
        downloaded_bytes: descargados,
        total_bytes: total.or(estimado),
    })
}

fn numero(campo: &str) -> Option<u64> {
    campo
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite() && *n >= 0.0)
        .map(|n| n as u64)
}

/// `-o` es una plantilla: `%` literal debe duplicarse.
fn escapar_plantilla(ruta: &Path) -> String {
    ruta.to_string_lossy().replace('%', "%%")
}
