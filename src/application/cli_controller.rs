use crate::application::download_orchestrator::{IntermediateCleanup, VideoDownloader};
use crate::domain::value_objects::{Itag, ProxyConfig, VideoSource};
use crate::domain::{DownloadProgress, DownloadRequest, ProgressCallback};
use crate::infrastructure::config::expandir_tilde;
use crate::infrastructure::{AppConfig, FfmpegTranscoder, YtDlpClient};
use crate::presentation::{Cli, Commands, ConsoleOutput};
use std::path::PathBuf;
use std::sync::Arc;

type Downloader = VideoDownloader<YtDlpClient, FfmpegTranscoder>;

/// Orquesta la ejecucion de la CLI.
pub async fn ejecutar_cli(
    cli: Cli,
    config: AppConfig,
    client: YtDlpClient,
    transcoder: FfmpegTranscoder,
) -> anyhow::Result<()> {
    let salida = Arc::new(ConsoleOutput::new());
    let Cli {
        fuentes,
        itag,
        solo_audio,
        output,
        nombre,
        proxies,
        mp3,
        conservar_si_falla,
        listar,
        silencioso,
        ytdlp_path,
        ffmpeg_path,
        command,
    } = cli;

    let proxies = resolver_proxies(&proxies, &config)?;
    let client = match resolver_ruta_opcional(ytdlp_path).or_else(|| config.ytdlp_path.clone()) {
        Some(ruta) => client.with_ytdlp_path(ruta),
        None => client,
    };
    let transcoder = transcoder.with_bitrate(config.mp3_bitrate.clone());
    let transcoder = match resolver_ruta_opcional(ffmpeg_path).or_else(|| config.ffmpeg_path.clone()) {
        Some(ruta) => transcoder.with_ffmpeg_path(ruta),
        None => transcoder,
    };
    let cleanup = if conservar_si_falla || config.keep_intermediate_on_failure {
        IntermediateCleanup::KeepOnFailure
    } else {
        IntermediateCleanup::Always
    };

    if mp3 && !listar && command.is_none() {
        transcoder.verify().await?;
    }
    let downloader = VideoDownloader::new(client, transcoder).with_cleanup(cleanup);

    match command {
        Some(Commands::Streams { source }) => {
            listar_streams(&downloader, salida.as_ref(), &source, proxies.as_ref()).await
        }
        None => {
            if fuentes.is_empty() {
                salida.mostrar_error_sin_fuente();
                std::process::exit(1);
            }

            let (fuentes, duplicados) = deduplicar_fuentes(fuentes);
            if duplicados > 0 {
                salida.advertir_fuentes_duplicadas(duplicados);
            }

            if listar {
                for fuente in &fuentes {
                    listar_streams(&downloader, salida.as_ref(), fuente, proxies.as_ref()).await?;
                }
                return Ok(());
            }

            if !nombre_admite_fuentes(nombre.as_deref(), fuentes.len()) {
                salida.error_nombre_con_varias_fuentes(fuentes.len());
                std::process::exit(1);
            }

            let plantilla = PlantillaPeticion {
                itag,
                solo_audio,
                directorio: resolver_ruta_opcional(output).or_else(|| config.output_root.clone()),
                nombre,
                proxies,
                mp3,
                progreso: (!silencioso).then(|| callback_progreso(Arc::clone(&salida))),
            };
            descargar_fuentes(&downloader, &plantilla, fuentes, salida.as_ref()).await
        }
    }
}

/// Campos comunes a todas las fuentes de una ejecucion.
struct PlantillaPeticion {
    itag: Option<Itag>,
    solo_audio: bool,
    directorio: Option<PathBuf>,
    nombre: Option<String>,
    proxies: Option<ProxyConfig>,
    mp3: bool,
    progreso: Option<ProgressCallback>,
}

impl PlantillaPeticion {
    fn peticion(&self, source: VideoSource) -> DownloadRequest {
        let mut request = DownloadRequest::new(source)
            .with_audio_only(self.solo_audio)
            .with_mp3(self.mp3);
        if let Some(itag) = self.itag {
            request = request.with_itag(itag);
        }
        if let Some(dir) = &self.directorio {
            request = request.with_output_dir(dir.clone());
        }
        if let Some(nombre) = &self.nombre {
            request = request.with_filename(nombre.clone());
        }
        if let Some(proxies) = &self.proxies {
            request = request.with_proxies(proxies.clone());
        }
        if let Some(progreso) = &self.progreso {
            request = request.with_progress_callback(Arc::clone(progreso));
        }
        request
    }
}

async fn descargar_fuentes(
    downloader: &Downloader,
    plantilla: &PlantillaPeticion,
    fuentes: Vec<String>,
    salida: &ConsoleOutput,
) -> anyhow::Result<()> {
    let mut errores = Vec::new();

    for fuente in fuentes {
        salida.mostrar_inicio(&fuente);
        let resultado = match VideoSource::try_from(fuente.as_str()) {
            Ok(source) => downloader
                .download(&plantilla.peticion(source))
                .await
                .map_err(anyhow::Error::from),
            Err(err) => Err(err.into()),
        };

        match resultado {
            Ok(ruta) => salida.mostrar_descarga_completa(&ruta),
            Err(err) => {
                salida.error_fallo_descarga(&fuente, &format!("{:#}", err));
                errores.push(fuente);
            }
        }
    }

    if !errores.is_empty() {
        anyhow::bail!("Fallo la descarga en {} fuente(s)", errores.len());
    }

    Ok(())
}

async fn listar_streams(
    downloader: &Downloader,
    salida: &ConsoleOutput,
    fuente: &str,
    proxies: Option<&ProxyConfig>,
) -> anyhow::Result<()> {
    let source = VideoSource::try_from(fuente)?;
    let video = downloader.list_streams(&source, proxies).await?;
    salida.mostrar_streams(&video);
    Ok(())
}

fn callback_progreso(salida: Arc<ConsoleOutput>) -> ProgressCallback {
    Arc::new(move |progreso: DownloadProgress| salida.mostrar_progreso(&progreso))
}

/// Proxies de la CLI; si no hay, los de la configuracion.
fn resolver_proxies(pares: &[String], config: &AppConfig) -> anyhow::Result<Option<ProxyConfig>> {
    let proxies = if pares.is_empty() {
        config.proxies.clone()
    } else {
        ProxyConfig::from_pairs(pares)?
    };
    Ok((!proxies.is_empty()).then_some(proxies))
}

fn resolver_ruta_opcional(ruta: Option<String>) -> Option<PathBuf> {
    ruta.map(|ruta| expandir_tilde(&ruta))
}

/// Un nombre fijo solo sirve para una fuente: varias escribirian el mismo archivo.
fn nombre_admite_fuentes(nombre: Option<&str>, fuentes: usize) -> bool {
    nombre.is_none() || fuentes <= 1
}

fn deduplicar_fuentes(fuentes: Vec<String>) -> (Vec<String>, usize) {
    let mut vistos = std::collections::HashSet::new();
    let mut unicas = Vec::new();
    let mut duplicados = 0;

    for fuente in fuentes {
        let clave = VideoSource::new(fuente.as_str())
            .map(|s| s.video_id().unwrap_or_else(|| s.as_str().to_string()))
            .unwrap_or_else(|_| fuente.trim().to_string());
        if vistos.insert(clave) {
            unicas.push(fuente);
        } else {
            duplicados += 1;
        }
    }

    (unicas, duplicados)
}
