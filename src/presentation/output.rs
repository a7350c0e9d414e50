use crate::domain::{DownloadProgress, VideoInfo};
use std::io::Write;
use std::path::Path;

const BYTES_PER_MEGABYTE: f64 = 1_048_576.0;

pub struct ConsoleOutput;

impl Default for ConsoleOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleOutput {
    pub fn new() -> Self {
        Self
    }

    pub fn mostrar_error_sin_fuente(&self) {
        println!("Error: Debes especificar una URL o id de video");
        println!("Uso: ytgrab <url|id> [<url|id> ...]");
        println!("     ytgrab streams <url|id>");
    }

    pub fn error_nombre_con_varias_fuentes(&self, fuentes: usize) {
        println!(
            "Error: --filename solo admite una fuente ({} recibidas)",
            fuentes
        );
        println!("Uso: ytgrab <url|id> -f <nombre>");
    }

    pub fn advertir_fuentes_duplicadas(&self, duplicados: usize) {
        println!("[WARN] Se omitieron {} fuente(s) duplicadas", duplicados);
    }

    pub fn mostrar_inicio(&self, fuente: &str) {
        println!("Descargando: {}", fuente);
    }

    pub fn mostrar_progreso(&self, progreso: &DownloadProgress) {
        let descargado = progreso.downloaded_bytes as f64 / BYTES_PER_MEGABYTE;
        let linea = match (progreso.percent(), progreso.total_bytes) {
            (Some(pct), Some(total)) => format!(
                "[{}] {:5.1}% ({:.2} / {:.2} MB)",
                progreso.itag,
                pct,
                descargado,
                total as f64 / BYTES_PER_MEGABYTE
            ),
            _ => format!("[{}] {:.2} MB", progreso.itag, descargado),
        };
        print!("\r{}", linea);
        let _ = std::io::stdout().flush();
    }

    pub fn mostrar_descarga_completa(&self, ruta: &Path) {
        println!("\n[OK] Descarga completa! Guardado en: {}", ruta.display());
    }

    pub fn error_fallo_descarga(&self, fuente: &str, error: &str) {
        println!("\n[ERROR] Fallo descarga de {}: {}", fuente, error);
    }

    pub fn mostrar_streams(&self, video: &VideoInfo) {
        println!("{} ({})", video.title, video.id);
        if video.streams.is_empty() {
            println!("  Sin streams disponibles");
            return;
        }
        for stream in &video.streams {
            let tipo = if stream.is_progressive() {
                "audio+video"
            } else if stream.is_audio_only() {
                "audio"
            } else {
                "video"
            };
            println!(
                "  itag={:<5} {:<12} {:<11} {}",
                stream.itag,
                stream.mime_type.to_string(),
                tipo,
                formatear_detalle(
                    stream.resolution.as_deref(),
                    stream.bitrate_kbps,
                    stream.filesize
                )
            );
        }
    }
}

fn formatear_detalle(
    resolucion: Option<&str>,
    bitrate_kbps: Option<f64>,
    filesize: Option<u64>,
) -> String {
    let mut items = Vec::new();
    if let Some(res) = resolucion {
        items.push(res.to_string());
    }
    if let Some(kbps) = bitrate_kbps {
        items.push(format!("{:.0}kbps", kbps));
    }
    if let Some(bytes) = filesize {
        items.push(format!("{:.2} MB", bytes as f64 / BYTES_PER_MEGABYTE));
    }
    if items.is_empty() {
        return "desconocida".to_string();
    }
    items.join(", ")
}
