pub mod api_client;
pub mod auth_service;
pub mod http;
pub mod session_persistence;

pub use api_client::*;
pub use auth_service::*;
pub use http::{GlooTransport, HttpMethod, HttpTransport, RequestBody, UploadFile};
pub use session_persistence::{LocalStoragePersistence, SessionPersistence};
