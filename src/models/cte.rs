use serde::{Deserialize, Serialize};

use super::{deserialize_code, deserialize_required_code};

/// CT-e de subcontratación vinculado a una carga (solo lectura en el cliente)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CteSubcontratacao {
    #[serde(deserialize_with = "deserialize_required_code")]
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_code")]
    pub chave: Option<String>,
    #[serde(default, deserialize_with = "deserialize_code")]
    pub vblog_status_code: Option<String>,
    #[serde(default, alias = "vblog_status_description")]
    pub vblog_status_desc: Option<String>,
}

impl CteSubcontratacao {
    pub fn chave_label(&self) -> &str {
        self.chave.as_deref().filter(|c| !c.is_empty()).unwrap_or(super::PLACEHOLDER)
    }
}
