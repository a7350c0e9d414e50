use crate::infrastructure::InfrastructureError;
use std::collections::VecDeque;
use std::path::Path;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

const TAIL_LINES: usize = 20;

/// Traduce un fallo de `spawn` distinguiendo binario ausente.
pub(crate) fn error_al_iniciar(
    program: &str,
    path: &Path,
    err: std::io::Error,
) -> InfrastructureError {
    if err.kind() == std::io::ErrorKind::NotFound {
        InfrastructureError::ToolNotFound {
            program: program.to_string(),
            path: path.to_path_buf(),
        }
    } else {
        InfrastructureError::ExternalService(format!("Failed to start {}: {}", program, err))
    }
}

/// Lee lineas hasta EOF; las no consumidas por `consumir` quedan en la cola.
pub(crate) async fn leer_lineas<R, F>(reader: R, mut consumir: F) -> VecDeque<String>
where
    R: AsyncRead + Unpin,
    F: FnMut(&str) -> bool,
{
    let mut lector = BufReader::new(reader);
    let mut linea = String::new();
    let mut cola = VecDeque::with_capacity(TAIL_LINES);

    loop {
        linea.clear();
        match lector.read_line(&mut linea).await {
            Ok(0) => break,
            Ok(_) => {
                let l = linea.trim_end();
                if l.is_empty() || consumir(l) {
                    continue;
                }
                log::debug!("{}", l);
                if cola.len() >= TAIL_LINES {
                    cola.pop_front();
                }
                cola.push_back(l.to_string());
            }
            Err(_) => break,
        }
    }

    cola
}

/// Ultimas lineas de una salida completa.
pub(crate) fn cola_de_texto(bytes: &[u8]) -> VecDeque<String> {
    let texto = String::from_utf8_lossy(bytes);
    let mut cola: VecDeque<String> = texto
        .lines()
        .map(str::trim_end)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect();
    while cola.len() > TAIL_LINES {
        cola.pop_front();
    }
    cola
}

pub(crate) fn render_tail(cola: &VecDeque<String>) -> String {
    if cola.is_empty() {
        return "no stderr output captured".to_string();
    }
    cola.iter().cloned().collect::<Vec<_>>().join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn leer_lineas_separa_consumidas() {
        let entrada: &[u8] = b"PROG 1\nerror: uno\n\nPROG 2\nerror: dos\n";
        let mut consumidas = Vec::new();
        let cola = leer_lineas(entrada, |l| {
            if let Some(resto) = l.strip_prefix("PROG ") {
                consumidas.push(resto.to_string());
                return true;
            }
            false
        })
        .await;

        assert_eq!(consumidas, vec!["1", "2"]);
        assert_eq!(cola, VecDeque::from(vec!["error: uno".to_string(), "error: dos".to_string()]));
    }

    #[test]
    fn cola_de_texto_limita_lineas() {
        let texto: String = (0..30).map(|i| format!("linea {}\n", i)).collect();
        let cola = cola_de_texto(texto.as_bytes());
        assert_eq!(cola.len(), TAIL_LINES);
        assert_eq!(cola.front().map(String::as_str), Some("linea 10"));
    }

    #[test]
    fn render_tail_vacio() {
        assert_eq!(render_tail(&VecDeque::new()), "no stderr output captured");
    }
}
