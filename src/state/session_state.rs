// ============================================================================
// SESSION STATE - Estado de sesión con frontera lectura/escritura
// ============================================================================
// `SessionReader` se reparte a las vistas (solo lectura + suscripción).
// `SessionWriter` lo posee únicamente el AuthService (login/logout/expiración).
// ============================================================================

use std::rc::Rc;

use super::reactivity::{ReactiveState, Subscription};
use crate::models::{Session, SessionStatus};

/// Crea el almacén de sesión en estado `Loading`
pub fn session_store() -> (SessionReader, SessionWriter) {
    let state = ReactiveState::new(SessionStatus::Loading);
    (
        SessionReader { state: Rc::clone(&state) },
        SessionWriter { state },
    )
}

/// Vista de solo lectura del estado de sesión
#[derive(Clone)]
pub struct SessionReader {
    state: Rc<ReactiveState<SessionStatus>>,
}

impl SessionReader {
    pub fn status(&self) -> SessionStatus {
        self.state.get()
    }

    pub fn session(&self) -> Option<Session> {
        self.status().session().cloned()
    }

    pub fn subscribe<F>(&self, callback: F) -> Subscription<SessionStatus>
    where
        F: Fn(&SessionStatus) + 'static,
    {
        self.state.subscribe(callback)
    }
}

impl PartialEq for SessionReader {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}

/// Único punto de escritura del estado de sesión (no es Clone)
pub struct SessionWriter {
    state: Rc<ReactiveState<SessionStatus>>,
}

impl SessionWriter {
    pub fn status(&self) -> SessionStatus {
        self.state.get()
    }

    pub fn set(&self, status: SessionStatus) {
        self.state.set(status);
    }

    pub fn reader(&self) -> SessionReader {
        SessionReader {
            state: Rc::clone(&self.state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{UnauthenticatedReason, UserIdentity};
    use std::cell::RefCell;

    #[test]
    fn starts_loading_and_broadcasts_transitions() {
        let (reader, writer) = session_store();
        assert!(reader.status().is_loading());

        let seen = Rc::new(RefCell::new(Vec::new()));
        let _sub = {
            let seen = seen.clone();
            reader.subscribe(move |s| seen.borrow_mut().push(s.clone()))
        };

        let session = Session {
            user: UserIdentity::new("ana"),
            access_token: "t".into(),
            expires_at: None,
        };
        writer.set(SessionStatus::Authenticated(session.clone()));
        writer.set(SessionStatus::Unauthenticated(UnauthenticatedReason::SignedOut));

        assert_eq!(
            *seen.borrow(),
            vec![
                SessionStatus::Authenticated(session),
                SessionStatus::Unauthenticated(UnauthenticatedReason::SignedOut),
            ]
        );
        assert_eq!(reader.session(), None);
    }

    #[test]
    fn readers_of_the_same_store_are_equal() {
        let (reader, writer) = session_store();
        assert!(reader == writer.reader());
        let (other, _w) = session_store();
        assert!(reader != other);
    }
}
