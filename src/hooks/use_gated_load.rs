// ============================================================================
// USE GATED LOAD - Pedir datos cuando la sesión lo permite
// ============================================================================
// Loading → "carregando", Unauthenticated → denegado sin pedir nada,
// Authenticated → un pedido por montaje. Respuestas de pedidos viejos
// (logout, cambio de `key`, desmontaje) se descartan.
// ============================================================================

use std::future::Future;
use std::rc::Rc;

use yew::prelude::*;

use crate::errors::AppError;
use crate::hooks::use_session::use_session;
use crate::models::{SessionStatus, UnauthenticatedReason};
use crate::services::ApiClient;
use crate::viewmodels::{FetchToken, GateDecision, LoadState, SessionGate};

#[derive(Debug, Clone, PartialEq)]
pub enum GatedView<T> {
    Waiting,
    Denied(UnauthenticatedReason),
    Ready(LoadState<T>),
}

#[derive(Clone)]
pub struct UseGatedLoadHandle<T> {
    pub view: GatedView<T>,
    /// Token vigente del montaje (`None` sin pedido activo)
    pub current: Callback<(), Option<FetchToken>>,
    /// Recarga atada al token tomado con `current`
    pub reload: Callback<FetchToken>,
}

#[hook]
pub fn use_gated_load<T, F, Fut>(key: String, loader: F) -> UseGatedLoadHandle<T>
where
    T: Clone + PartialEq + 'static,
    F: Fn(ApiClient) -> Fut + 'static,
    Fut: Future<Output = Result<T, AppError>> + 'static,
{
    let session = use_session();
    let status = session.as_ref().map(|s| s.status.clone()).unwrap_or_default();
    let api = session.map(|s| s.api());

    let gate = use_mut_ref(SessionGate::default);
    let state = use_state(|| LoadState::<T>::Loading);

    let start: Rc<dyn Fn(FetchToken)> = {
        let gate = gate.clone();
        let state = state.clone();
        let loader = Rc::new(loader);
        Rc::new(move |token: FetchToken| {
            let Some(api) = api.clone() else {
                return;
            };
            let pending = loader(api);
            let gate = gate.clone();
            let state = state.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = pending.await;
                if !gate.borrow().is_current(token) {
                    log::debug!("Respuesta descartada: la vista ya no la espera");
                    return;
                }
                match result {
                    Ok(value) => state.set(LoadState::Loaded(value)),
                    Err(e) => {
                        log::error!("❌ Error cargando datos: {}", e);
                        state.set(LoadState::Failed(e.user_message()));
                    }
                }
            });
        })
    };

    {
        let gate = gate.clone();
        let state = state.clone();
        let start = start.clone();
        use_effect_with((status.clone(), key), move |(status, _key)| {
            let decision = gate.borrow_mut().observe(status);
            if let GateDecision::Fetch(token) = decision {
                state.set(LoadState::Loading);
                start(token);
            }
            move || gate.borrow_mut().invalidate()
        });
    }

    // El token se toma al iniciar la acción y se valida al terminarla
    let current = {
        let gate = gate.clone();
        Callback::from(move |_: ()| gate.borrow().current())
    };

    let reload = {
        let gate = gate.clone();
        Callback::from(move |since: FetchToken| {
            let next = gate.borrow_mut().reload(since);
            match next {
                Some(token) => start(token),
                None => log::debug!("Recarga descartada: la vista cambió de carga o de sesión"),
            }
        })
    };

    let view = match status {
        SessionStatus::Loading => GatedView::Waiting,
        SessionStatus::Unauthenticated(reason) => GatedView::Denied(reason),
        SessionStatus::Authenticated(_) => GatedView::Ready((*state).clone()),
    };

    UseGatedLoadHandle { view, current, reload }
}
