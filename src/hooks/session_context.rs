// ============================================================================
// SESSION CONTEXT - Compartir estado de sesión entre componentes
// ============================================================================
// El provider crea AuthService + ApiClient una sola vez, se suscribe al
// SessionReader y re-renderiza la app en cada transición. Las vistas reciben
// el estado y las acciones (login/logout), nunca el SessionWriter.
// ============================================================================

use std::rc::Rc;

use yew::prelude::*;

use crate::config::CONFIG;
use crate::errors::AppError;
use crate::models::{Session, SessionStatus};
use crate::services::{
    ApiClient, AuthService, GlooTransport, HttpTransport, LocalStoragePersistence, SessionPersistence,
};

/// Lo que ven las vistas: estado actual + acciones
#[derive(Clone)]
pub struct SessionContext {
    pub status: SessionStatus,
    auth: Rc<AuthService>,
    api: ApiClient,
}

impl PartialEq for SessionContext {
    fn eq(&self, other: &Self) -> bool {
        self.status == other.status && Rc::ptr_eq(&self.auth, &other.auth)
    }
}

impl SessionContext {
    pub fn api(&self) -> ApiClient {
        self.api.clone()
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<Session, AppError> {
        self.auth.login(username, password).await
    }

    pub fn logout(&self) {
        self.auth.logout();
    }
}

#[derive(Properties, PartialEq)]
pub struct SessionContextProviderProps {
    pub children: Children,
}

/// Provider component que envuelve la app y proporciona el estado de sesión
#[function_component(SessionContextProvider)]
pub fn session_context_provider(props: &SessionContextProviderProps) -> Html {
    let services = use_memo((), |_| {
        let transport: Rc<dyn HttpTransport> = Rc::new(GlooTransport);
        let persistence: Rc<dyn SessionPersistence> = Rc::new(LocalStoragePersistence);
        let auth = Rc::new(AuthService::new(&CONFIG, transport.clone(), persistence));
        let api = ApiClient::new(&CONFIG, auth.clone(), transport);
        (auth, api)
    });

    let status = use_state(|| services.0.status());

    {
        let services = services.clone();
        let status = status.clone();
        use_effect_with((), move |_| {
            let subscription = services.0.reader().subscribe(move |next| status.set(next.clone()));
            // Primero suscribirse, después resolver Loading
            services.0.restore();
            move || drop(subscription)
        });
    }

    let context = SessionContext {
        status: (*status).clone(),
        auth: services.0.clone(),
        api: services.1.clone(),
    };

    html! {
        <ContextProvider<SessionContext> context={context}>
            {props.children.clone()}
        </ContextProvider<SessionContext>>
    }
}
