use serde::{Deserialize, Serialize};

use super::{deserialize_code, deserialize_required_code, null_as_default, CteSubcontratacao, PLACEHOLDER};

/// Referencia a una UF (`{cod, uf}`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct UfRef {
    #[serde(default, deserialize_with = "deserialize_code")]
    pub cod: Option<String>,
    #[serde(default)]
    pub uf: Option<String>,
}

/// Referencia a un municipio (`{cod, municipio}`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MunicipioRef {
    #[serde(default, deserialize_with = "deserialize_code")]
    pub cod: Option<String>,
    #[serde(default)]
    pub municipio: Option<String>,
}

/// Programación de la carga (fechas ISO-8601 tal cual vienen de la API)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Agendamento {
    #[serde(default)]
    pub eta_programado: Option<String>,
    #[serde(default)]
    pub eta_realizado: Option<String>,
    #[serde(default)]
    pub etd_programado: Option<String>,
    #[serde(default)]
    pub etd_realizado: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Pendente,
    EmTransito,
    Finalizado,
    Outro,
}

impl StatusKind {
    fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_uppercase().replace(' ', "_").as_str() {
            "PENDENTE" | "PENDING" => Some(StatusKind::Pendente),
            "EM_TRANSITO" | "EM_TRÂNSITO" | "IN_TRANSIT" => Some(StatusKind::EmTransito),
            "FINALIZADO" | "FINISHED" => Some(StatusKind::Finalizado),
            _ => None,
        }
    }

    /// Clase CSS del badge
    pub fn css_class(&self) -> &'static str {
        match self {
            StatusKind::Pendente => "badge badge-pendente",
            StatusKind::EmTransito => "badge badge-transito",
            StatusKind::Finalizado => "badge badge-finalizado",
            StatusKind::Outro => "badge badge-outro",
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StatusRepr {
    Text(String),
    Object {
        #[serde(default, deserialize_with = "deserialize_code")]
        code: Option<String>,
        #[serde(default)]
        message: Option<String>,
        #[serde(default, rename = "type")]
        kind: Option<String>,
    },
    Other(serde_json::Value),
}

/// Estado calculado por la API: `{code, message, type}`.
/// Cualquier valor desconocido se acepta y se muestra como estado genérico
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(from = "StatusRepr")]
pub struct CargaStatus {
    pub code: Option<String>,
    pub message: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl From<StatusRepr> for CargaStatus {
    fn from(repr: StatusRepr) -> Self {
        match repr {
            StatusRepr::Text(message) => CargaStatus {
                code: None,
                message: Some(message),
                kind: None,
            },
            StatusRepr::Object { code, message, kind } => CargaStatus { code, message, kind },
            StatusRepr::Other(_) => CargaStatus::default(),
        }
    }
}

impl CargaStatus {
    /// Texto del badge: `message`, si no `code`
    pub fn label(&self) -> String {
        self.message
            .as_deref()
            .or(self.code.as_deref())
            .filter(|s| !s.is_empty())
            .unwrap_or(PLACEHOLDER)
            .to_string()
    }

    pub fn kind(&self) -> StatusKind {
        self.message
            .as_deref()
            .and_then(StatusKind::from_token)
            .or_else(|| self.code.as_deref().and_then(StatusKind::from_token))
            .unwrap_or(StatusKind::Outro)
    }
}

/// Carga tal como la devuelve `GET /cargas` y `GET /cargas/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Carga {
    #[serde(deserialize_with = "deserialize_required_code")]
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_code")]
    pub id_3zx: Option<String>,
    #[serde(default, deserialize_with = "deserialize_code")]
    pub id_cliente: Option<String>,
    #[serde(default)]
    pub origem_uf: Option<UfRef>,
    #[serde(default)]
    pub origem_municipio: Option<MunicipioRef>,
    #[serde(default)]
    pub destino_uf: Option<UfRef>,
    #[serde(default)]
    pub destino_municipio: Option<MunicipioRef>,
    #[serde(default)]
    pub agendamento: Option<Agendamento>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: CargaStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ctes_subcontratacao: Vec<CteSubcontratacao>,
}

fn location_label(uf: Option<&str>, municipio: Option<&str>) -> String {
    match (uf, municipio) {
        (None, None) => PLACEHOLDER.to_string(),
        (uf, municipio) => format!("{} - {}", uf.unwrap_or(""), municipio.unwrap_or("")),
    }
}

impl Carga {
    pub fn origem_uf_cod(&self) -> Option<&str> {
        self.origem_uf.as_ref().and_then(|u| u.cod.as_deref())
    }

    pub fn destino_uf_cod(&self) -> Option<&str> {
        self.destino_uf.as_ref().and_then(|u| u.cod.as_deref())
    }

    pub fn origem_municipio_cod(&self) -> Option<&str> {
        self.origem_municipio.as_ref().and_then(|m| m.cod.as_deref())
    }

    pub fn destino_municipio_cod(&self) -> Option<&str> {
        self.destino_municipio.as_ref().and_then(|m| m.cod.as_deref())
    }

    /// "UF - Município" de origen
    pub fn origem_label(&self) -> String {
        location_label(
            self.origem_uf.as_ref().and_then(|u| u.uf.as_deref()),
            self.origem_municipio.as_ref().and_then(|m| m.municipio.as_deref()),
        )
    }

    /// "UF - Município" de destino
    pub fn destino_label(&self) -> String {
        location_label(
            self.destino_uf.as_ref().and_then(|u| u.uf.as_deref()),
            self.destino_municipio.as_ref().and_then(|m| m.municipio.as_deref()),
        )
    }

    pub fn eta_programado(&self) -> Option<&str> {
        self.agendamento.as_ref().and_then(|a| a.eta_programado.as_deref())
    }

    pub fn etd_programado(&self) -> Option<&str> {
        self.agendamento.as_ref().and_then(|a| a.etd_programado.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"{
        "id": "5f1c7f6e-3b0a-4b8e-9a51-1f0e2b7c9d10",
        "id_3zx": "3ZX-0001",
        "id_cliente": "CLI-77",
        "origem_uf": {"cod": "35", "uf": "SP"},
        "origem_municipio": {"cod": 3550308, "municipio": "São Paulo"},
        "destino_uf": {"cod": "33", "uf": "RJ"},
        "destino_municipio": {"cod": "3304557", "municipio": "Rio de Janeiro"},
        "agendamento": {"eta_programado": "2025-03-10T14:30:00", "etd_programado": null},
        "status": {"code": "001", "message": "EM_TRANSITO", "type": "info"},
        "ctes_subcontratacao": [{"id": "a1", "chave": "3525"}]
    }"#;

    #[test]
    fn parses_a_full_carga() {
        let carga: Carga = serde_json::from_str(FULL).unwrap();
        assert_eq!(carga.origem_label(), "SP - São Paulo");
        assert_eq!(carga.destino_label(), "RJ - Rio de Janeiro");
        assert_eq!(carga.origem_municipio_cod(), Some("3550308"));
        assert_eq!(carga.status.kind(), StatusKind::EmTransito);
        assert_eq!(carga.status.label(), "EM_TRANSITO");
        assert_eq!(carga.eta_programado(), Some("2025-03-10T14:30:00"));
        assert_eq!(carga.etd_programado(), None);
        assert_eq!(carga.ctes_subcontratacao.len(), 1);
    }

    #[test]
    fn tolerates_missing_and_null_fields() {
        let carga: Carga = serde_json::from_str(
            r#"{"id": 42, "status": null, "ctes_subcontratacao": null, "agendamento": null}"#,
        )
        .unwrap();
        assert_eq!(carga.id, "42");
        assert_eq!(carga.origem_label(), "-");
        assert_eq!(carga.status.label(), "-");
        assert_eq!(carga.status.kind(), StatusKind::Outro);
        assert!(carga.ctes_subcontratacao.is_empty());
        assert_eq!(carga.eta_programado(), None);
    }

    #[test]
    fn unknown_status_never_fails() {
        let carga: Carga = serde_json::from_str(r#"{"id": "1", "status": {"code": "999", "message": "CANCELADO"}}"#).unwrap();
        assert_eq!(carga.status.kind(), StatusKind::Outro);
        assert_eq!(carga.status.label(), "CANCELADO");
        assert_eq!(carga.status.kind().css_class(), "badge badge-outro");

        let carga: Carga = serde_json::from_str(r#"{"id": "1", "status": "FINALIZADO"}"#).unwrap();
        assert_eq!(carga.status.kind(), StatusKind::Finalizado);

        let carga: Carga = serde_json::from_str(r#"{"id": "1", "status": 7}"#).unwrap();
        assert_eq!(carga.status.kind(), StatusKind::Outro);
    }

    #[test]
    fn status_kind_accepts_both_vocabularies() {
        let pending = CargaStatus { code: Some("PENDING".into()), message: None, kind: None };
        assert_eq!(pending.kind(), StatusKind::Pendente);
        let transit = CargaStatus { code: None, message: Some("in transit".into()), kind: None };
        assert_eq!(transit.kind(), StatusKind::EmTransito);
    }

    #[test]
    fn partial_location_keeps_separator() {
        let carga: Carga = serde_json::from_str(r#"{"id": "1", "origem_uf": {"uf": "MG"}}"#).unwrap();
        assert_eq!(carga.origem_label(), "MG - ");
    }
}
