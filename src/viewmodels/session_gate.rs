// ============================================================================
// SESSION GATE - Cuándo una vista puede pedir datos
// ============================================================================
// Una vista montada observa el estado de sesión y pide sus datos una sola vez
// por montaje autenticado. Cada pedido lleva un token de generación: si la
// sesión cambia o la vista se desmonta, las respuestas viejas se descartan.
// ============================================================================

use crate::errors::SESSION_EXPIRED_MESSAGE;
use crate::models::{SessionStatus, UnauthenticatedReason};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchToken(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Sesión sin resolver: mostrar "cargando"
    Wait,
    /// Sin sesión: no pedir nada
    Deny(UnauthenticatedReason),
    /// Pedir los datos con este token
    Fetch(FetchToken),
    /// Ya se pidió en este montaje
    Settled,
}

#[derive(Debug, Default)]
pub struct SessionGate {
    generation: u64,
    fetched: bool,
}

impl SessionGate {
    pub fn observe(&mut self, status: &SessionStatus) -> GateDecision {
        match status {
            SessionStatus::Loading => GateDecision::Wait,
            SessionStatus::Unauthenticated(reason) => {
                self.invalidate();
                GateDecision::Deny(*reason)
            }
            SessionStatus::Authenticated(_) if self.fetched => GateDecision::Settled,
            SessionStatus::Authenticated(_) => GateDecision::Fetch(self.next_token()),
        }
    }

    /// Token vigente, para atar una acción larga (upload) a este montaje
    pub fn current(&self) -> Option<FetchToken> {
        self.fetched.then_some(FetchToken(self.generation))
    }

    /// Recarga explícita (p.ej. después de un upload exitoso).
    /// Solo si `since` sigue vigente: tras logout, cambio de `key` o
    /// desmontaje no se recarga nada
    pub fn reload(&mut self, since: FetchToken) -> Option<FetchToken> {
        if !self.is_current(since) {
            return None;
        }
        Some(self.next_token())
    }

    /// La respuesta del pedido `token` todavía le sirve a la vista
    pub fn is_current(&self, token: FetchToken) -> bool {
        self.fetched && token.0 == self.generation
    }

    /// Desmontaje o cambio de sesión: todo pedido en vuelo queda obsoleto
    pub fn invalidate(&mut self) {
        if self.fetched {
            self.generation += 1;
            self.fetched = false;
        }
    }

    fn next_token(&mut self) -> FetchToken {
        self.generation += 1;
        self.fetched = true;
        FetchToken(self.generation)
    }
}

/// Mensaje de las vistas protegidas cuando no hay sesión
pub fn denied_message(_reason: UnauthenticatedReason) -> &'static str {
    SESSION_EXPIRED_MESSAGE
}
