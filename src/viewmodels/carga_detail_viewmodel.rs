// ============================================================================
// CARGA DETAIL VIEWMODEL - Filas del detalle y resultado del upload
// ============================================================================

use serde_json::Value;

use crate::errors::AppError;
use crate::models::{Carga, CteSubcontratacao, PLACEHOLDER};
use crate::utils::{format_datetime_pt_br, or_placeholder};

pub const UPLOAD_ERROR_PREFIX: &str = "Erro ao enviar o XML";
pub const NO_CTES_MESSAGE: &str = "Nenhum CT-e vinculado.";

/// Par etiqueta/valor de la ficha de la carga
#[derive(Debug, Clone, PartialEq)]
pub struct DetailRow {
    pub label: &'static str,
    pub value: String,
}

fn row(label: &'static str, value: String) -> DetailRow {
    DetailRow { label, value }
}

pub fn detail_rows(carga: &Carga) -> Vec<DetailRow> {
    let agendamento = carga.agendamento.clone().unwrap_or_default();
    vec![
        row("ID 3ZX", or_placeholder(carga.id_3zx.as_deref())),
        row("ID Cliente", or_placeholder(carga.id_cliente.as_deref())),
        row("Origem", carga.origem_label()),
        row("Destino", carga.destino_label()),
        row("ETA Programado", format_datetime_pt_br(agendamento.eta_programado.as_deref())),
        row("ETD Programado", format_datetime_pt_br(agendamento.etd_programado.as_deref())),
        row("ETA Realizado", format_datetime_pt_br(agendamento.eta_realizado.as_deref())),
        row("ETD Realizado", format_datetime_pt_br(agendamento.etd_realizado.as_deref())),
        row("Status", carga.status.label()),
    ]
}

#[derive(Debug, Clone, PartialEq)]
pub struct CteRow {
    pub id: String,
    pub chave: String,
    pub vblog_status: Option<String>,
}

impl From<&CteSubcontratacao> for CteRow {
    fn from(cte: &CteSubcontratacao) -> Self {
        let vblog_status = match (cte.vblog_status_code.as_deref(), cte.vblog_status_desc.as_deref()) {
            (_, Some(desc)) if !desc.is_empty() => Some(desc.to_string()),
            (Some(code), _) if !code.is_empty() => Some(code.to_string()),
            _ => None,
        };
        Self {
            id: cte.id.clone(),
            chave: cte.chave_label().to_string(),
            vblog_status,
        }
    }
}

pub fn cte_rows(carga: &Carga) -> Vec<CteRow> {
    carga.ctes_subcontratacao.iter().map(CteRow::from).collect()
}

// ============================================================================
// UPLOAD
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// Recargar la carga desde el servidor
    Reload,
    /// Mensaje para el usuario; la vista no cambia
    Failed(String),
}

/// Confirmación 2xx que igual reporta error del VBLOG (`{"erro": true, "mensagem": ...}`)
pub fn vblog_rejection(confirmation: &Value) -> Option<String> {
    let rejected = confirmation.get("erro").and_then(Value::as_bool).unwrap_or(false);
    if !rejected {
        return None;
    }
    let message = confirmation
        .get("mensagem")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .unwrap_or(PLACEHOLDER);
    Some(message.to_string())
}

fn upload_error(detail: &str) -> String {
    format!("{}: {}", UPLOAD_ERROR_PREFIX, detail)
}

pub fn upload_outcome(result: &Result<Value, AppError>) -> UploadOutcome {
    match result {
        Ok(confirmation) => match vblog_rejection(confirmation) {
            Some(message) => UploadOutcome::Failed(upload_error(&message)),
            None => UploadOutcome::Reload,
        },
        Err(err) if err.is_session_expired() => UploadOutcome::Failed(err.user_message()),
        Err(err) => UploadOutcome::Failed(upload_error(&err.user_message())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_schedule_renders_dashes() {
        let carga: Carga = serde_json::from_value(json!({"id": "1", "id_3zx": "3ZX-9"})).unwrap();
        let rows = detail_rows(&carga);
        let value = |label: &str| rows.iter().find(|r| r.label == label).unwrap().value.clone();
        assert_eq!(value("ETA Programado"), "-");
        assert_eq!(value("ETD Programado"), "-");
        assert_eq!(value("Origem"), "-");
        assert_eq!(value("ID Cliente"), "-");
        assert_eq!(value("ID 3ZX"), "3ZX-9");
    }

    #[test]
    fn schedule_is_formatted_pt_br() {
        let carga: Carga = serde_json::from_value(json!({
            "id": "1",
            "agendamento": {"eta_programado": "2025-03-10T14:30:00", "etd_programado": "2025-03-09T08:00:00"}
        }))
        .unwrap();
        let rows = detail_rows(&carga);
        assert_eq!(rows[4].value, "10/03/2025 14:30");
        assert_eq!(rows[5].value, "09/03/2025 08:00");
    }

    #[test]
    fn rejected_upload_keeps_view_and_shows_detail() {
        let result = Err(AppError::api(400, Some("invalid XML".into())));
        assert_eq!(
            upload_outcome(&result),
            UploadOutcome::Failed("Erro ao enviar o XML: invalid XML".into())
        );

        let result = Err(AppError::api(500, None));
        assert_eq!(
            upload_outcome(&result),
            UploadOutcome::Failed("Erro ao enviar o XML: Erro na API (HTTP 500)".into())
        );

        let result = Err(AppError::api(401, None));
        assert_eq!(
            upload_outcome(&result),
            UploadOutcome::Failed("Sessão expirada. Faça login novamente.".into())
        );
    }

    #[test]
    fn vblog_error_in_confirmation_is_a_failure() {
        let result = Ok(json!({"erro": true, "mensagem": "Chave duplicada"}));
        assert_eq!(
            upload_outcome(&result),
            UploadOutcome::Failed("Erro ao enviar o XML: Chave duplicada".into())
        );
        assert_eq!(upload_outcome(&Ok(json!({"erro": false}))), UploadOutcome::Reload);
        assert_eq!(upload_outcome(&Ok(Value::Null)), UploadOutcome::Reload);
        assert_eq!(vblog_rejection(&json!({"erro": true})).as_deref(), Some("-"));
    }

    #[test]
    fn cte_rows_prefer_vblog_description() {
        let carga: Carga = serde_json::from_value(json!({
            "id": "1",
            "ctes_subcontratacao": [
                {"id": "a", "chave": "3525", "vblog_status_code": 100, "vblog_status_description": "Autorizado"},
                {"id": "b", "vblog_status_code": "204"},
                {"id": "c", "chave": ""}
            ]
        }))
        .unwrap();
        let rows = cte_rows(&carga);
        assert_eq!(rows[0].vblog_status.as_deref(), Some("Autorizado"));
        assert_eq!(rows[1].chave, "-");
        assert_eq!(rows[1].vblog_status.as_deref(), Some("204"));
        assert_eq!(rows[2].vblog_status, None);
    }
}
