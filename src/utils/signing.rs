// ============================================================================
// SESIÓN FIRMADA - HMAC-SHA256 con AUTH_SECRET
// ============================================================================
// La sesión guardada en localStorage va firmada; si alguien la edita a mano
// la firma no coincide y se descarta.
// ============================================================================

use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::errors::AppError;
use crate::models::Session;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedSession {
    pub payload: String,
    pub signature: String,
}

#[derive(Clone)]
pub struct SessionSigner {
    secret: Vec<u8>,
}

impl SessionSigner {
    pub fn new(secret: &str) -> Self {
        if secret.is_empty() {
            log::warn!("⚠️ AUTH_SECRET vacío: la sesión guardada se firma con clave vacía");
        }
        Self {
            secret: secret.as_bytes().to_vec(),
        }
    }

    fn mac(&self) -> Result<HmacSha256, AppError> {
        HmacSha256::new_from_slice(&self.secret).map_err(|e| AppError::Decode(e.to_string()))
    }

    pub fn seal(&self, session: &Session) -> Result<SignedSession, AppError> {
        let payload = serde_json::to_string(session).map_err(|e| AppError::Decode(e.to_string()))?;
        let mut mac = self.mac()?;
        mac.update(payload.as_bytes());
        let signature = hex::encode(mac.finalize().into_bytes());
        Ok(SignedSession { payload, signature })
    }

    pub fn open(&self, envelope: &SignedSession) -> Result<Session, AppError> {
        let expected = hex::decode(&envelope.signature)
            .map_err(|_| AppError::Decode("firma no hexadecimal".to_string()))?;

        let mut mac = self.mac()?;
        mac.update(envelope.payload.as_bytes());
        // Comparación en tiempo constante
        mac.verify_slice(&expected)
            .map_err(|_| AppError::Decode("firma inválida".to_string()))?;

        serde_json::from_str(&envelope.payload).map_err(|e| AppError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserIdentity;

    fn session() -> Session {
        Session {
            user: UserIdentity::new("operador"),
            access_token: "tok".into(),
            expires_at: Some(1_900_000_000),
        }
    }

    #[test]
    fn sealed_session_opens_with_same_secret() {
        let signer = SessionSigner::new("segredo");
        let envelope = signer.seal(&session()).unwrap();
        assert_eq!(signer.open(&envelope).unwrap(), session());
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let signer = SessionSigner::new("segredo");
        let mut envelope = signer.seal(&session()).unwrap();
        envelope.payload = envelope.payload.replace("operador", "admin");
        assert!(signer.open(&envelope).is_err());
    }

    #[test]
    fn other_secret_is_rejected() {
        let envelope = SessionSigner::new("segredo").seal(&session()).unwrap();
        assert!(SessionSigner::new("outro").open(&envelope).is_err());

        let garbage = SignedSession { payload: "{}".into(), signature: "zz".into() };
        assert!(SessionSigner::new("segredo").open(&garbage).is_err());
    }
}
