use crate::utils::signing::SignedSession;
use crate::utils::{load_from_storage, remove_from_storage, save_to_storage, STORAGE_KEY_SESSION};

/// Dónde se guarda la sesión firmada entre recargas de página
pub trait SessionPersistence {
    /// `Ok(None)`: no hay sesión guardada. `Err`: hay algo pero ilegible
    fn load(&self) -> Result<Option<SignedSession>, String>;
    fn save(&self, envelope: &SignedSession) -> Result<(), String>;
    fn clear(&self);
}

/// Persistencia en localStorage del navegador
#[derive(Clone, Copy, Default)]
pub struct LocalStoragePersistence;

impl SessionPersistence for LocalStoragePersistence {
    fn load(&self) -> Result<Option<SignedSession>, String> {
        load_from_storage::<SignedSession>(STORAGE_KEY_SESSION)
    }

    fn save(&self, envelope: &SignedSession) -> Result<(), String> {
        save_to_storage(STORAGE_KEY_SESSION, envelope)
    }

    fn clear(&self) {
        remove_from_storage(STORAGE_KEY_SESSION);
    }
}
