use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Respuesta de `POST /login`: el token puede venir como `access_token` o `token`
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct LoginResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub user: Option<serde_json::Value>,
}

impl LoginResponse {
    pub fn bearer_token(&self) -> Option<&str> {
        self.access_token
            .as_deref()
            .or(self.token.as_deref())
            .filter(|t| !t.trim().is_empty())
    }
}

/// Cuerpo de error de la API (`{"detail": "..."}`)
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct ErrorDetail {
    pub detail: serde_json::Value,
}

impl ErrorDetail {
    /// Solo se devuelve `detail` cuando es texto; los errores de validación
    /// (listas de objetos) no se muestran tal cual
    pub fn message(&self) -> Option<String> {
        self.detail.as_str().map(str::to_string)
    }
}
