// ============================================================================
// ERRORES - Taxonomía de errores del cliente
// ============================================================================
// Auth (credenciales / sesión expirada), Api (HTTP no-2xx), Network (sin
// respuesta) y Decode (respuesta ilegible). Ninguno es fatal: cada vista lo
// convierte en un mensaje.
// ============================================================================

use thiserror::Error;

pub const SESSION_EXPIRED_MESSAGE: &str = "Sessão expirada. Faça login novamente.";
pub const DEFAULT_AUTH_ERROR: &str = "Erro ao autenticar";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Mensaje del servidor tal cual (o el genérico si no vino `detail`)
    #[error("{0}")]
    InvalidCredentials(String),
    #[error("{}", SESSION_EXPIRED_MESSAGE)]
    SessionExpired,
    #[error("Resposta de autenticação sem token")]
    MissingToken,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("API error: {status}{}", detail_suffix(.detail))]
    Api { status: u16, detail: Option<String> },
    #[error("Network error: {0}")]
    Network(String),
    #[error("Parse error: {0}")]
    Decode(String),
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail.as_ref().map(|d| format!(" ({})", d)).unwrap_or_default()
}

impl AppError {
    pub fn api(status: u16, detail: Option<String>) -> Self {
        Self::Api { status, detail }
    }

    /// Sesión expirada: estado no autenticado o 401 del servidor
    pub fn is_session_expired(&self) -> bool {
        matches!(
            self,
            AppError::Auth(AuthError::SessionExpired) | AppError::Api { status: 401, .. }
        )
    }

    /// `detail` del servidor cuando existe
    pub fn detail(&self) -> Option<&str> {
        match self {
            AppError::Api { detail, .. } => detail.as_deref(),
            AppError::Auth(AuthError::InvalidCredentials(message)) => Some(message.as_str()),
            _ => None,
        }
    }

    /// Mensaje para mostrar al usuario: `detail` del servidor si existe,
    /// si no un texto genérico según el tipo
    pub fn user_message(&self) -> String {
        if self.is_session_expired() {
            return SESSION_EXPIRED_MESSAGE.to_string();
        }
        if let Some(detail) = self.detail() {
            return detail.to_string();
        }
        match self {
            AppError::Auth(err) => err.to_string(),
            AppError::Api { status, .. } => format!("Erro na API (HTTP {})", status),
            AppError::Network(_) => "Falha de comunicação com o servidor".to_string(),
            AppError::Decode(_) => "Resposta inválida do servidor".to_string(),
        }
    }
}
