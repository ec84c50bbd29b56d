use serde::{Deserialize, Serialize};
use std::fmt;

/// Identidad del usuario logueado. `profile` guarda cualquier otro campo
/// que devuelva la API de login
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub username: String,
    #[serde(flatten)]
    pub profile: serde_json::Map<String, serde_json::Value>,
}

impl UserIdentity {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            profile: serde_json::Map::new(),
        }
    }

    /// Construye la identidad desde el objeto `user` de la respuesta de login.
    /// Acepta `username` o, si falta, `sub`
    pub fn from_login_user(value: &serde_json::Value) -> Option<Self> {
        let object = value.as_object()?;
        let username = object
            .get("username")
            .or_else(|| object.get("sub"))
            .and_then(|v| v.as_str())
            .filter(|u| !u.is_empty())?
            .to_string();

        let profile = object
            .iter()
            .filter(|(key, _)| key.as_str() != "username")
            .map(|(key, v)| (key.clone(), v.clone()))
            .collect();

        Some(Self { username, profile })
    }
}

/// Sesión activa: identidad + token de acceso
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user: UserIdentity,
    pub access_token: String,
    /// Expiración del token (segundos Unix), si el token la declara
    #[serde(default)]
    pub expires_at: Option<i64>,
}

impl Session {
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.expires_at.map(|exp| exp <= now).unwrap_or(false)
    }

    pub fn bearer_header(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

// Nunca imprimir el token en logs
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("user", &self.user.username)
            .field("access_token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnauthenticatedReason {
    /// Nunca hubo sesión o se hizo logout
    SignedOut,
    /// Token vencido o sesión guardada ilegible
    SessionExpired,
}

/// Estado de la sesión: pendiente, autenticado o no autenticado
#[derive(Debug, Clone, PartialEq)]
pub enum SessionStatus {
    Loading,
    Authenticated(Session),
    Unauthenticated(UnauthenticatedReason),
}

impl SessionStatus {
    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionStatus::Authenticated(session) => Some(session),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SessionStatus::Loading)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionStatus::Authenticated(_))
    }

    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, SessionStatus::Unauthenticated(_))
    }
}

impl Default for SessionStatus {
    fn default() -> Self {
        SessionStatus::Loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn identity_keeps_extra_profile_fields() {
        let user = UserIdentity::from_login_user(&json!({
            "username": "operador",
            "email": "op@centauro.com.br",
            "is_admin": true
        }))
        .unwrap();

        assert_eq!(user.username, "operador");
        assert_eq!(user.profile.get("email"), Some(&json!("op@centauro.com.br")));
        assert!(!user.profile.contains_key("username"));
    }

    #[test]
    fn identity_requires_a_name() {
        assert!(UserIdentity::from_login_user(&json!({"email": "x@y.z"})).is_none());
        assert!(UserIdentity::from_login_user(&json!("operador")).is_none());
        let user = UserIdentity::from_login_user(&json!({"sub": "operador"})).unwrap();
        assert_eq!(user.username, "operador");
    }

    #[test]
    fn debug_output_hides_the_token() {
        let session = Session {
            user: UserIdentity::new("ana"),
            access_token: "super-secret".into(),
            expires_at: None,
        };
        let printed = format!("{:?}", session);
        assert!(!printed.contains("super-secret"));
        assert_eq!(session.bearer_header(), "Bearer super-secret");
    }

    #[test]
    fn expiry() {
        let session = Session {
            user: UserIdentity::new("ana"),
            access_token: "t".into(),
            expires_at: Some(100),
        };
        assert!(!session.is_expired_at(99));
        assert!(session.is_expired_at(100));

        let forever = Session { expires_at: None, ..session };
        assert!(!forever.is_expired_at(i64::MAX));
    }
}
