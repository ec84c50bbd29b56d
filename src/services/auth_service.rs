// ============================================================================
// AUTH SERVICE - Máquina de estados de la sesión
// ============================================================================
// Loading → Authenticated | Unauthenticated. Es el único dueño del
// SessionWriter: login, logout y expiración son las únicas transiciones.
// El cliente no es frontera de seguridad; el servidor valida cada token.
// ============================================================================

use std::rc::Rc;

use crate::config::AppConfig;
use crate::errors::{AppError, AuthError, DEFAULT_AUTH_ERROR};
use crate::models::{LoginRequest, LoginResponse, Session, SessionStatus, UnauthenticatedReason, UserIdentity};
use crate::services::http::{HttpMethod, HttpRequest, HttpTransport, RequestBody};
use crate::services::session_persistence::SessionPersistence;
use crate::state::{session_store, SessionReader, SessionWriter};
use crate::utils::jwt::decode_claims;
use crate::utils::signing::SessionSigner;

type Clock = Rc<dyn Fn() -> i64>;

fn system_clock() -> i64 {
    chrono::Utc::now().timestamp()
}

pub struct AuthService {
    login_url: String,
    timeout_ms: Option<u32>,
    transport: Rc<dyn HttpTransport>,
    persistence: Rc<dyn SessionPersistence>,
    signer: SessionSigner,
    writer: SessionWriter,
    clock: Clock,
}

impl AuthService {
    pub fn new(
        config: &AppConfig,
        transport: Rc<dyn HttpTransport>,
        persistence: Rc<dyn SessionPersistence>,
    ) -> Self {
        let (_, writer) = session_store();
        Self {
            login_url: config.endpoint("/login"),
            timeout_ms: config.request_timeout_ms,
            transport,
            persistence,
            signer: SessionSigner::new(&config.auth_secret),
            writer,
            clock: Rc::new(system_clock),
        }
    }

    #[cfg(test)]
    pub fn with_clock(mut self, clock: impl Fn() -> i64 + 'static) -> Self {
        self.clock = Rc::new(clock);
        self
    }

    /// Handle de solo lectura para vistas y ApiClient
    pub fn reader(&self) -> SessionReader {
        self.writer.reader()
    }

    pub fn status(&self) -> SessionStatus {
        self.writer.status()
    }

    /// Resuelve `Loading` leyendo la sesión guardada. Idempotente
    pub fn restore(&self) -> SessionStatus {
        if !self.status().is_loading() {
            return self.status();
        }

        let next = match self.persistence.load() {
            Ok(None) => {
                log::info!("ℹ️ No hay sesión guardada");
                SessionStatus::Unauthenticated(UnauthenticatedReason::SignedOut)
            }
            Ok(Some(envelope)) => match self.signer.open(&envelope) {
                Ok(session) if session.is_expired_at((self.clock)()) => {
                    log::warn!("⚠️ Sesión guardada con token vencido");
                    self.persistence.clear();
                    SessionStatus::Unauthenticated(UnauthenticatedReason::SessionExpired)
                }
                Ok(session) => {
                    log::info!("✅ Sesión restaurada: {}", session.user.username);
                    SessionStatus::Authenticated(session)
                }
                Err(e) => {
                    log::warn!("⚠️ Sesión guardada descartada: {}", e);
                    self.persistence.clear();
                    SessionStatus::Unauthenticated(UnauthenticatedReason::SessionExpired)
                }
            },
            Err(e) => {
                log::error!("❌ No se pudo leer la sesión guardada: {}", e);
                self.persistence.clear();
                SessionStatus::Unauthenticated(UnauthenticatedReason::SessionExpired)
            }
        };

        self.writer.set(next.clone());
        next
    }

    /// Sesión actual o `None`. Nunca falla; un token vencido pasa a
    /// `Unauthenticated(SessionExpired)`
    pub fn get_session(&self) -> Option<Session> {
        match self.restore() {
            SessionStatus::Authenticated(session) => {
                if session.is_expired_at((self.clock)()) {
                    self.expire();
                    None
                } else {
                    Some(session)
                }
            }
            _ => None,
        }
    }

    /// Login contra `POST /login`. En error devuelve el `detail` del servidor tal cual
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, AppError> {
        log::info!("🔐 Login para usuario: {}", username);

        let result = self.request_login(username, password).await;
        match &result {
            Ok(session) => {
                match self.signer.seal(session) {
                    Ok(envelope) => {
                        if let Err(e) = self.persistence.save(&envelope) {
                            log::error!("❌ Error guardando sesión: {}", e);
                        }
                    }
                    Err(e) => log::error!("❌ Error firmando sesión: {}", e),
                }
                log::info!("✅ Login exitoso: {}", session.user.username);
                self.writer.set(SessionStatus::Authenticated(session.clone()));
            }
            Err(e) => {
                log::error!("❌ Login fallido: {}", e);
                // Un intento fallido no deja viva la sesión anterior
                let status = self.status();
                if status.is_authenticated() {
                    self.persistence.clear();
                }
                if !status.is_unauthenticated() {
                    self.writer
                        .set(SessionStatus::Unauthenticated(UnauthenticatedReason::SignedOut));
                }
            }
        }
        result
    }

    async fn request_login(&self, username: &str, password: &str) -> Result<Session, AppError> {
        let body = serde_json::to_string(&LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        })
        .map_err(|e| AppError::Decode(e.to_string()))?;

        let mut request = HttpRequest::new(HttpMethod::Post, self.login_url.clone());
        request.set_header("Content-Type", "application/json");
        request.body = RequestBody::Json(body);
        request.timeout_ms = self.timeout_ms;

        let response = self.transport.send(request).await?;

        if !response.is_success() {
            let message = response
                .error_detail()
                .unwrap_or_else(|| DEFAULT_AUTH_ERROR.to_string());
            return Err(AuthError::InvalidCredentials(message).into());
        }

        let payload: LoginResponse =
            serde_json::from_str(&response.body).map_err(|e| AppError::Decode(e.to_string()))?;
        let token = payload.bearer_token().ok_or(AuthError::MissingToken)?.to_string();
        let claims = decode_claims(&token).unwrap_or_default();

        // La API actual no devuelve `user`: se usa `sub` del token o el usuario tecleado
        let user = payload
            .user
            .as_ref()
            .and_then(UserIdentity::from_login_user)
            .unwrap_or_else(|| {
                let mut identity =
                    UserIdentity::new(claims.sub.clone().unwrap_or_else(|| username.to_string()));
                if let Some(is_admin) = claims.is_admin {
                    identity
                        .profile
                        .insert("is_admin".to_string(), serde_json::Value::Bool(is_admin));
                }
                identity
            });

        Ok(Session {
            user,
            access_token: token,
            expires_at: claims.expires_at(),
        })
    }

    /// Cierra la sesión. Seguro de llamar sin sesión
    pub fn logout(&self) {
        self.persistence.clear();
        if self.status().is_unauthenticated() {
            return;
        }
        log::info!("👋 Logout");
        self.writer
            .set(SessionStatus::Unauthenticated(UnauthenticatedReason::SignedOut));
    }

    fn expire(&self) {
        log::warn!("⚠️ Token vencido, sesión expirada");
        self.persistence.clear();
        self.writer
            .set(SessionStatus::Unauthenticated(UnauthenticatedReason::SessionExpired));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::http::testing::MockTransport;
    use crate::services::session_persistence::testing::MemoryPersistence;
    use crate::utils::jwt::fake_jwt;
    use futures::executor::block_on;
    use serde_json::json;
    use std::cell::RefCell;

    const NOW: i64 = 1_800_000_000;

    fn config() -> AppConfig {
        AppConfig {
            api_url: "http://api.test".into(),
            auth_secret: "segredo".into(),
            ..AppConfig::default()
        }
    }

    fn service(transport: &Rc<MockTransport>, persistence: &Rc<MemoryPersistence>) -> AuthService {
        let transport: Rc<dyn HttpTransport> = transport.clone();
        let persistence: Rc<dyn SessionPersistence> = persistence.clone();
        AuthService::new(&config(), transport, persistence).with_clock(|| NOW)
    }

    #[test]
    fn rejected_credentials_keep_unauthenticated_and_return_detail_verbatim() {
        for detail in ["Usuário ou senha inválidos", "Conta bloqueada até 12:00", ""] {
            let transport = MockTransport::new();
            let persistence = MemoryPersistence::new();
            let auth = service(&transport, &persistence);
            auth.restore();

            transport.respond(401, &json!({ "detail": detail }).to_string());
            let err = block_on(auth.login("ana", "errada")).unwrap_err();

            assert_eq!(err, AppError::Auth(AuthError::InvalidCredentials(detail.to_string())));
            assert_eq!(err.user_message(), detail);
            assert_eq!(
                auth.status(),
                SessionStatus::Unauthenticated(UnauthenticatedReason::SignedOut)
            );
            assert!(persistence.slot.borrow().is_none());
        }
    }

    #[test]
    fn failure_without_detail_uses_generic_message() {
        let transport = MockTransport::new();
        let auth = service(&transport, &MemoryPersistence::new());
        transport.respond(500, "Internal Server Error");

        let err = block_on(auth.login("ana", "x")).unwrap_err();
        assert_eq!(err.user_message(), DEFAULT_AUTH_ERROR);
        assert!(auth.status().is_unauthenticated());
    }

    #[test]
    fn successful_login_posts_credentials_and_stores_session() {
        let transport = MockTransport::new();
        let persistence = MemoryPersistence::new();
        let auth = service(&transport, &persistence);
        auth.restore();

        let token = fake_jwt(&json!({"sub": "operador", "is_admin": true, "exp": NOW + 3600}));
        transport.respond(200, &json!({"access_token": token, "token_type": "bearer"}).to_string());

        let session = block_on(auth.login("operador", "123")).unwrap();
        assert_eq!(session.user.username, "operador");
        assert_eq!(session.user.profile.get("is_admin"), Some(&json!(true)));
        assert_eq!(session.expires_at, Some(NOW + 3600));
        assert_eq!(auth.status(), SessionStatus::Authenticated(session.clone()));
        assert!(persistence.slot.borrow().is_some());

        let sent = transport.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].url, "http://api.test/login");
        assert_eq!(sent[0].method, HttpMethod::Post);
        assert_eq!(sent[0].header("authorization"), None);
        match &sent[0].body {
            RequestBody::Json(body) => {
                let value: serde_json::Value = serde_json::from_str(body).unwrap();
                assert_eq!(value, json!({"username": "operador", "password": "123"}));
            }
            other => panic!("unexpected body {:?}", other),
        }
    }

    #[test]
    fn login_accepts_token_alias_and_user_object() {
        let transport = MockTransport::new();
        let auth = service(&transport, &MemoryPersistence::new());
        transport.respond(
            200,
            &json!({"token": "opaco", "user": {"username": "maria", "email": "m@x.com"}}).to_string(),
        );

        let session = block_on(auth.login("ignorado", "x")).unwrap();
        assert_eq!(session.access_token, "opaco");
        assert_eq!(session.user.username, "maria");
        assert_eq!(session.expires_at, None);
    }

    #[test]
    fn login_without_token_is_an_auth_error() {
        let transport = MockTransport::new();
        let auth = service(&transport, &MemoryPersistence::new());
        transport.respond(200, r#"{"token_type":"bearer"}"#);

        let err = block_on(auth.login("ana", "x")).unwrap_err();
        assert_eq!(err, AppError::Auth(AuthError::MissingToken));
        assert!(auth.status().is_unauthenticated());
    }

    #[test]
    fn network_failure_on_login_is_reported() {
        let transport = MockTransport::new();
        let auth = service(&transport, &MemoryPersistence::new());
        transport.fail(AppError::Network("offline".into()));

        let err = block_on(auth.login("ana", "x")).unwrap_err();
        assert_eq!(err, AppError::Network("offline".into()));
        assert!(auth.status().is_unauthenticated());
    }

    #[test]
    fn restore_round_trips_a_stored_session() {
        let transport = MockTransport::new();
        let persistence = MemoryPersistence::new();
        let first = service(&transport, &persistence);
        transport.respond(200, r#"{"access_token":"abc"}"#);
        let session = block_on(first.login("ana", "x")).unwrap();

        // Nueva carga de página: mismo storage, servicio nuevo
        let second = service(&transport, &persistence);
        assert!(second.status().is_loading());
        assert_eq!(second.restore(), SessionStatus::Authenticated(session.clone()));
        assert_eq!(second.get_session(), Some(session));
    }

    #[test]
    fn restore_without_storage_is_signed_out() {
        let auth = service(&MockTransport::new(), &MemoryPersistence::new());
        assert_eq!(auth.get_session(), None);
        assert_eq!(
            auth.status(),
            SessionStatus::Unauthenticated(UnauthenticatedReason::SignedOut)
        );
    }

    #[test]
    fn tampered_or_unreadable_storage_means_session_expired() {
        let transport = MockTransport::new();
        let persistence = MemoryPersistence::new();
        let first = service(&transport, &persistence);
        transport.respond(200, r#"{"access_token":"abc"}"#);
        block_on(first.login("ana", "x")).unwrap();

        if let Some(envelope) = persistence.slot.borrow_mut().as_mut() {
            envelope.payload = envelope.payload.replace("ana", "admin");
        }
        let second = service(&transport, &persistence);
        assert_eq!(
            second.restore(),
            SessionStatus::Unauthenticated(UnauthenticatedReason::SessionExpired)
        );
        assert!(persistence.slot.borrow().is_none());

        let persistence = MemoryPersistence::new();
        *persistence.corrupted.borrow_mut() = true;
        let third = service(&transport, &persistence);
        assert_eq!(
            third.restore(),
            SessionStatus::Unauthenticated(UnauthenticatedReason::SessionExpired)
        );
    }

    #[test]
    fn expired_token_is_dropped_by_get_session() {
        let transport = MockTransport::new();
        let persistence = MemoryPersistence::new();
        let now = Rc::new(RefCell::new(NOW));
        let auth = {
            let now = now.clone();
            let t: Rc<dyn HttpTransport> = transport.clone();
            let p: Rc<dyn SessionPersistence> = persistence.clone();
            AuthService::new(&config(), t, p).with_clock(move || *now.borrow())
        };

        let token = fake_jwt(&json!({"sub": "ana", "exp": NOW + 60}));
        transport.respond(200, &json!({"access_token": token}).to_string());
        block_on(auth.login("ana", "x")).unwrap();
        assert!(auth.get_session().is_some());

        *now.borrow_mut() = NOW + 61;
        assert_eq!(auth.get_session(), None);
        assert_eq!(
            auth.status(),
            SessionStatus::Unauthenticated(UnauthenticatedReason::SessionExpired)
        );
        assert!(persistence.slot.borrow().is_none());
    }

    #[test]
    fn failed_login_over_an_active_session_signs_out() {
        let transport = MockTransport::new();
        let persistence = MemoryPersistence::new();
        let auth = service(&transport, &persistence);
        auth.restore();

        let token = fake_jwt(&json!({"sub": "ana", "exp": NOW + 3600}));
        transport.respond(200, &json!({"access_token": token}).to_string());
        block_on(auth.login("ana", "123")).unwrap();
        assert!(auth.status().is_authenticated());

        transport.respond(401, &json!({"detail": "Senha incorreta"}).to_string());
        let err = block_on(auth.login("bruno", "errada")).unwrap_err();

        assert_eq!(err.user_message(), "Senha incorreta");
        assert_eq!(
            auth.status(),
            SessionStatus::Unauthenticated(UnauthenticatedReason::SignedOut)
        );
        assert!(persistence.slot.borrow().is_none());
        assert_eq!(auth.get_session(), None);
    }

    #[test]
    fn failed_login_keeps_the_expired_reason() {
        let transport = MockTransport::new();
        let persistence = MemoryPersistence::new();
        let auth = service(&transport, &persistence);
        auth.expire();

        transport.respond(401, &json!({"detail": "Senha incorreta"}).to_string());
        block_on(auth.login("ana", "errada")).unwrap_err();
        assert_eq!(
            auth.status(),
            SessionStatus::Unauthenticated(UnauthenticatedReason::SessionExpired)
        );
    }

    #[test]
    fn logout_is_idempotent_and_observable() {
        let transport = MockTransport::new();
        let persistence = MemoryPersistence::new();
        let auth = service(&transport, &persistence);
        let reader = auth.reader();

        let notifications = Rc::new(RefCell::new(0));
        let _sub = {
            let notifications = notifications.clone();
            reader.subscribe(move |_| *notifications.borrow_mut() += 1)
        };

        transport.respond(200, r#"{"access_token":"abc"}"#);
        block_on(auth.login("ana", "x")).unwrap();
        assert!(reader.status().is_authenticated());

        auth.logout();
        auth.logout();
        assert_eq!(
            reader.status(),
            SessionStatus::Unauthenticated(UnauthenticatedReason::SignedOut)
        );
        // login + un único logout
        assert_eq!(*notifications.borrow(), 2);
        assert!(persistence.slot.borrow().is_none());
    }
}
