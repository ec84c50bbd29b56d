pub mod session_context;
pub mod use_gated_load;
pub mod use_session;

pub use session_context::{SessionContext, SessionContextProvider};
pub use use_gated_load::{use_gated_load, GatedView, UseGatedLoadHandle};
pub use use_session::use_session;
