//! Common utilities for sheet generation.

use crate::models::{Frequency, Installation};

/// Escape text for safe insertion into HTML content.
///
/// `&` is escaped first so ampersands introduced by the later replacements
/// are not escaped twice.
pub fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Sanitize a string for use in filenames.
pub fn sanitize_filename(name: &str, fallback: &str) -> String {
    let mut result = String::new();
    let mut last_dash = false;

    for ch in name.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            result.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if ch.is_whitespace() || ch == '-' || ch == '_' {
            if !last_dash && !result.is_empty() {
                result.push('-');
                last_dash = true;
            }
        }
    }

    if result.is_empty() {
        return fallback.to_string();
    }

    result.trim_matches('-').to_string()
}

/// Default output filename for a sheet when the caller does not supply one,
/// e.g. "scheda-gruppo-elettrogeno-12-mesi.pdf".
pub fn default_sheet_filename(installation: &Installation, frequency: &Frequency) -> String {
    format!(
        "scheda-{}-{}.pdf",
        sanitize_filename(&installation.name, &installation.code.to_lowercase()),
        sanitize_filename(&frequency.label(), "periodica")
    )
}
