/// Longitud maxima de un nombre de archivo, en bytes.
pub const MAX_FILENAME_LENGTH: usize = 255;

const CARACTERES_PROHIBIDOS: &[char] = &[
    '"', '#', '$', '%', '\'', '*', ',', '.', '/', ':', ';', '<', '>', '?', '\\', '^', '|', '~',
];

/// Sanea un nombre de archivo eliminando caracteres de control y signos reservados.
/// # Notas
/// - El punto tambien se elimina: una extension incluida por el llamador no sobrevive.
pub fn safe_filename(raw: &str) -> String {
    safe_filename_with_limit(raw, MAX_FILENAME_LENGTH)
}

/// Como `safe_filename`, con un limite de `max_bytes` bytes en UTF-8.
pub fn safe_filename_with_limit(raw: &str, max_bytes: usize) -> String {
    let limpio: String = raw
        .chars()
        .filter(|c| !c.is_control() && !CARACTERES_PROHIBIDOS.contains(c))
        .collect();
    truncar_bytes(limpio.trim(), max_bytes).trim_end().to_string()
}

/// Une base y extension sin pasar de `MAX_FILENAME_LENGTH` bytes.
/// Recorta la base si hace falta; la extension siempre se conserva.
pub fn filename_with_extension(base: &str, extension: &str) -> String {
    let presupuesto = MAX_FILENAME_LENGTH.saturating_sub(extension.len() + 1);
    let base = truncar_bytes(base, presupuesto).trim_end();
    format!("{}.{}", base, extension)
}

/// Corta en el ultimo limite de caracter que cabe en `max_bytes`.
fn truncar_bytes(texto: &str, max_bytes: usize) -> &str {
    if texto.len() <= max_bytes {
        return texto;
    }
    let mut corte = max_bytes;
    while !texto.is_char_boundary(corte) {
        corte -= 1;
    }
    &texto[..corte]
}
