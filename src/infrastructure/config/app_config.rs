use crate::domain::value_objects::ProxyConfig;
use crate::infrastructure::external::ffmpeg_transcoder::DEFAULT_MP3_BITRATE;
use directories::UserDirs;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_PATH: &str = "config/default.toml";

/// Configuracion de herramientas, salida y red.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub output_root: Option<PathBuf>,
    pub ytdlp_path: Option<PathBuf>,
    pub ffmpeg_path: Option<PathBuf>,
    pub mp3_bitrate: String,
    pub proxies: ProxyConfig,
    pub keep_intermediate_on_failure: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_root: None,
            ytdlp_path: None,
            ffmpeg_path: None,
            mp3_bitrate: DEFAULT_MP3_BITRATE.to_string(),
            proxies: ProxyConfig::new(),
            keep_intermediate_on_failure: false,
        }
    }
}

impl AppConfig {
    /// Carga la configuracion desde `config/default.toml` si existe.
    /// # Notas
    /// - Si el archivo no existe, usa valores por defecto.
    /// - Si no se puede interpretar, avisa y usa valores por defecto.
    pub fn load() -> Self {
        Self::load_from(Path::new(CONFIG_PATH))
    }

    pub fn load_from(ruta: &Path) -> Self {
        let Ok(contenido) = fs::read_to_string(ruta) else {
            return Self::default();
        };

        match Self::from_toml_str(&contenido) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Ignoring invalid config {}: {}", ruta.display(), err);
                Self::default()
            }
        }
    }

    /// Interpreta el contenido TOML sobre los valores por defecto.
    /// # Errors
    /// - `toml::de::Error` si el documento no es valido.
    pub fn from_toml_str(contenido: &str) -> Result<Self, toml::de::Error> {
        let file_config: FileConfig = toml::from_str(contenido)?;
        let mut config = Self::default();

        if let Some(general) = file_config.general {
            if let Some(output_root) = general.output_root {
                config.output_root = Some(expandir_tilde(&output_root));
            }
        }
        if let Some(tools) = file_config.tools {
            config.ytdlp_path = tools.ytdlp_path.as_deref().and_then(ruta_no_vacia);
            config.ffmpeg_path = tools.ffmpeg_path.as_deref().and_then(ruta_no_vacia);
        }
        if let Some(audio) = file_config.audio {
            if let Some(bitrate) = audio.mp3_bitrate {
                config.mp3_bitrate = bitrate;
            }
        }
        if let Some(network) = file_config.network {
            for (protocolo, direccion) in network.proxies.unwrap_or_default() {
                if let Err(err) = config.proxies.insert(protocolo, direccion) {
                    log::warn!("Ignoring proxy from config: {}", err);
                }
            }
        }
        if let Some(cleanup) = file_config.cleanup {
            if let Some(keep) = cleanup.keep_intermediate_on_failure {
                config.keep_intermediate_on_failure = keep;
            }
        }

        Ok(config)
    }
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    general: Option<GeneralConfig>,
    tools: Option<ToolsConfig>,
    audio: Option<AudioConfig>,
    network: Option<NetworkConfig>,
    cleanup: Option<CleanupConfig>,
}

#[derive(Debug, Deserialize)]
struct GeneralConfig {
    output_root: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ToolsConfig {
    ytdlp_path: Option<String>,
    ffmpeg_path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AudioConfig {
    mp3_bitrate: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NetworkConfig {
    proxies: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Deserialize)]
struct CleanupConfig {
    keep_intermediate_on_failure: Option<bool>,
}

fn ruta_no_vacia(ruta: &str) -> Option<PathBuf> {
    let ruta = ruta.trim();
    if ruta.is_empty() {
        None
    } else {
        Some(expandir_tilde(ruta))
    }
}

/// Expande `~/` al directorio personal del usuario.
pub fn expandir_tilde(ruta: &str) -> PathBuf {
    let ruta_normalizada = ruta.trim();
    if let Some(resto) = ruta_normalizada.strip_prefix("~/") {
        if let Some(home) = obtener_home_dir() {
            return home.join(resto);
        }
    }
    if let Some(resto) = ruta_normalizada.strip_prefix("~\\") {
        if let Some(home) = obtener_home_dir() {
            return home.join(resto);
        }
    }

    PathBuf::from(ruta_normalizada)
}

fn obtener_home_dir() -> Option<PathBuf> {
    UserDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_file() {
        let config = AppConfig::load_from(Path::new("/nonexistent/ytgrab.toml"));
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.mp3_bitrate, "192k");
    }

    #[test]
    fn parses_all_sections() {
        let contenido = r#"
[general]
output_root = "/tmp/videos"

[tools]
ytdlp_path = "/opt/bin/yt-dlp"
ffmpeg_path = ""

[audio]
mp3_bitrate = "320k"

[network.proxies]
https = "http://10.0.0.1:3128"

[cleanup]
keep_intermediate_on_failure = true
"#;
        let config = AppConfig::from_toml_str(contenido).unwrap();
        assert_eq!(config.output_root, Some(PathBuf::from("/tmp/videos")));
        assert_eq!(config.ytdlp_path, Some(PathBuf::from("/opt/bin/yt-dlp")));
        assert_eq!(config.ffmpeg_path, None);
        assert_eq!(config.mp3_bitrate, "320k");
        assert_eq!(config.proxies.for_scheme("https"), Some("http://10.0.0.1:3128"));
        assert!(config.keep_intermediate_on_failure);
    }

    #[test]
    fn invalid_proxy_is_skipped() {
        let contenido = "[network.proxies]\nhttp = \"no es url\"\n";
        let config = AppConfig::from_toml_str(contenido).unwrap();
        assert!(config.proxies.is_empty());
    }

    #[test]
    fn invalid_toml_fails() {
        assert!(AppConfig::from_toml_str("general = [").is_err());
    }

    #[test]
    fn expands_tilde() {
        let ruta = expandir_tilde("/abs/path");
        assert_eq!(ruta, PathBuf::from("/abs/path"));
        if let Some(home) = obtener_home_dir() {
            assert_eq!(expandir_tilde("~/videos"), home.join("videos"));
        }
    }
}
