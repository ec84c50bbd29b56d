use yew::prelude::*;

use crate::hooks::session_context::SessionContext;

/// Contexto de sesión. `None` fuera del provider
#[hook]
pub fn use_session() -> Option<SessionContext> {
    use_context::<SessionContext>()
}

