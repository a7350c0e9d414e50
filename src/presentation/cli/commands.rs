use crate::domain::value_objects::Itag;
use clap::{Parser, Subcommand};

/// Parametros de linea de comandos.
#[derive(Parser)]
#[command(name = "ytgrab")]
#[command(author, version, about = "Descargador de videos de YouTube simple y eficiente")]
pub struct Cli {
    /// URLs o ids de video a descargar.
    #[arg(value_name = "SOURCE", num_args = 0.., index = 1)]
    pub fuentes: Vec<String>,

    /// Itag del stream a descargar.
    #[arg(short, long, value_parser = Itag::parse)]
    pub itag: Option<Itag>,

    /// Descargar solo el audio.
    #[arg(short = 'a', long = "audio-only")]
    pub solo_audio: bool,

    /// Directorio de salida (se crea si no existe).
    #[arg(short, long)]
    pub output: Option<String>,

    /// Nombre del archivo sin extension (la extension sale del stream).
    #[arg(short = 'f', long = "filename")]
    pub nombre: Option<String>,

    /// Proxy por protocolo, p. ej. `https=http://127.0.0.1:3128`.
    #[arg(long = "proxy", value_name = "PROTO=ADDR", global = true)]
    pub proxies: Vec<String>,

    /// Convertir a MP3 tras la descarga.
    #[arg(long)]
    pub mp3: bool,

    /// Conservar el archivo original si la conversion a MP3 falla.
    #[arg(long = "keep-on-failure")]
    pub conservar_si_falla: bool,

    /// Listar los streams disponibles en vez de descargar.
    #[arg(short = 'l', long = "list", global = true)]
    pub listar: bool,

    /// No mostrar progreso de descarga.
    #[arg(short = 'q', long = "quiet")]
    pub silencioso: bool,

    /// Ruta a yt-dlp.
    #[arg(long, global = true)]
    pub ytdlp_path: Option<String>,

    /// Ruta a ffmpeg.
    #[arg(long, global = true)]
    pub ffmpeg_path: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcomandos disponibles.
#[derive(Subcommand)]
pub enum Commands {
    /// Lista los streams de un video.
    Streams {
        /// URL o id del video.
        source: String,
    },
}
