pub mod auth;
pub mod carga;
pub mod cte;
pub mod session;

pub use auth::{ErrorDetail, LoginRequest, LoginResponse};
pub use carga::{Agendamento, Carga, CargaStatus, MunicipioRef, StatusKind, UfRef};
pub use cte::CteSubcontratacao;
pub use session::{Session, SessionStatus, UnauthenticatedReason, UserIdentity};

use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;
use std::fmt;

/// Texto mostrado cuando falta un valor
pub const PLACEHOLDER: &str = "-";

/// Deserializador para códigos que la API puede mandar como string, número o null
/// (códigos IBGE, UUIDs, ids numéricos)
pub(crate) fn deserialize_code<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct CodeVisitor;

    impl<'de> Visitor<'de> for CodeVisitor {
        type Value = Option<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("string, number or null")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_any(CodeVisitor)
        }
    }

    deserializer.deserialize_any(CodeVisitor)
}

/// Igual que `deserialize_code` pero para campos obligatorios (id)
pub(crate) fn deserialize_required_code<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_code(deserializer)?.ok_or_else(|| de::Error::custom("missing identifier"))
}

/// `null` se trata como el valor por defecto (listas vacías, etc.)
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
