use gloo_storage::errors::StorageError;
use gloo_storage::{LocalStorage, Storage};
use serde::{de::DeserializeOwned, Serialize};

pub fn save_to_storage<T: Serialize>(key: &str, value: &T) -> Result<(), String> {
    LocalStorage::set(key, value).map_err(|e| format!("Error guardando en localStorage: {}", e))
}

/// `Ok(None)` si la clave no existe; `Err` si existe pero no se puede leer
pub fn load_from_storage<T: DeserializeOwned>(key: &str) -> Result<Option<T>, String> {
    match LocalStorage::get::<T>(key) {
        Ok(value) => Ok(Some(value)),
        Err(StorageError::KeyNotFound(_)) => Ok(None),
        Err(e) => Err(format!("Error leyendo '{}' de localStorage: {}", key, e)),
    }
}

pub fn remove_from_storage(key: &str) {
    LocalStorage::delete(key);
}
