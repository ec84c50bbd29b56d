pub mod carga_detail_viewmodel;
pub mod cargas_viewmodel;
pub mod login_viewmodel;
pub mod session_gate;

pub use carga_detail_viewmodel::*;
pub use cargas_viewmodel::*;
pub use login_viewmodel::{LoginForm, LoginPhase};
pub use session_gate::{denied_message, FetchToken, GateDecision, SessionGate};

/// Estado de un pedido hecho por una vista
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        LoadState::Loading
    }
}
