/// Clave de localStorage donde se guarda la sesión firmada
pub const STORAGE_KEY_SESSION: &str = "cargasPainel_session";

/// Cargas por página en el listado
pub const PAGE_SIZE: usize = 10;

/// Campo multipart que espera el endpoint de upload
pub const UPLOAD_FIELD_NAME: &str = "arquivo";

pub const XML_CONTENT_TYPE: &str = "application/xml";
