use chrono::{DateTime, NaiveDateTime};

use crate::models::PLACEHOLDER;

const DISPLAY_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Formatea una fecha ISO-8601 de la API como `dd/mm/aaaa hh:mm` (pt-BR).
/// Fechas con offset se muestran en su propio offset; ausentes o inválidas → "-"
pub fn format_datetime_pt_br(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return PLACEHOLDER.to_string();
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format(DISPLAY_FORMAT).to_string();
    }

    // FastAPI serializa datetimes sin zona como "2025-03-10T14:30:00[.ffffff]"
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, pattern) {
            return dt.format(DISPLAY_FORMAT).to_string();
        }
    }

    log::debug!("Fecha no reconocida: {}", raw);
    PLACEHOLDER.to_string()
}

/// Valor opcional de texto o "-"
pub fn or_placeholder(value: Option<&str>) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(PLACEHOLDER)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn naive_and_offset_dates() {
        assert_eq!(format_datetime_pt_br(Some("2025-03-10T14:30:00")), "10/03/2025 14:30");
        assert_eq!(format_datetime_pt_br(Some("2025-03-10T14:30:00.123456")), "10/03/2025 14:30");
        assert_eq!(format_datetime_pt_br(Some("2025-12-01T08:05:00-03:00")), "01/12/2025 08:05");
        assert_eq!(format_datetime_pt_br(Some("2025-12-01 08:05:00")), "01/12/2025 08:05");
    }

    #[test]
    fn missing_or_garbage_is_placeholder() {
        assert_eq!(format_datetime_pt_br(None), "-");
        assert_eq!(format_datetime_pt_br(Some("")), "-");
        assert_eq!(format_datetime_pt_br(Some("amanhã")), "-");
    }

    #[test]
    fn text_placeholder() {
        assert_eq!(or_placeholder(Some("CLI-1")), "CLI-1");
        assert_eq!(or_placeholder(Some("  ")), "-");
        assert_eq!(or_placeholder(None), "-");
    }
}
