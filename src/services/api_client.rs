// ============================================================================
// API CLIENT - Fetch autenticado (sin estado propio)
// ============================================================================
// Inyecta `Authorization: Bearer <token>` si hay sesión y normaliza las
// respuestas no-2xx en `AppError::Api`. Sin retry, sin cache, sin dedup.
// ============================================================================

use std::rc::Rc;

use serde::de::DeserializeOwned;

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::models::Carga;
use crate::services::auth_service::AuthService;
use crate::services::http::{method_name, HttpMethod, HttpRequest, HttpTransport, RequestBody, UploadFile};
use crate::utils::UPLOAD_FIELD_NAME;

#[derive(Clone)]
pub struct ApiClient {
    config: AppConfig,
    auth: Rc<AuthService>,
    transport: Rc<dyn HttpTransport>,
}

impl PartialEq for ApiClient {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.auth, &other.auth)
    }
}

impl ApiClient {
    pub fn new(config: &AppConfig, auth: Rc<AuthService>, transport: Rc<dyn HttpTransport>) -> Self {
        Self {
            config: config.clone(),
            auth,
            transport,
        }
    }

    /// Request genérico contra la API. `path` es relativo a `API_URL`
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: &str,
        body: RequestBody,
        extra_headers: &[(&str, &str)],
    ) -> Result<T, AppError> {
        let mut request = HttpRequest::new(method, self.config.endpoint(path));
        for (name, value) in extra_headers {
            request.set_header(name, *value);
        }

        // El Authorization del llamador nunca se respeta
        request.remove_header("Authorization");
        if let Some(session) = self.auth.get_session() {
            request.set_header("Authorization", session.bearer_header());
        }

        match &body {
            RequestBody::Json(_) => request.set_header("Content-Type", "application/json"),
            // multipart: el navegador pone el boundary
            RequestBody::Multipart { .. } => request.remove_header("Content-Type"),
            RequestBody::Empty => {}
        }
        request.body = body;
        request.timeout_ms = self.config.request_timeout_ms;

        log::debug!("🌐 {} {}", method_name(method), request.url);
        let response = self.transport.send(request).await?;

        if !response.is_success() {
            let error = AppError::api(response.status, response.error_detail());
            log::error!("❌ {} {} → {}", method_name(method), path, error);
            return Err(error);
        }

        let body = if response.body.trim().is_empty() {
            "null"
        } else {
            response.body.as_str()
        };
        serde_json::from_str(body).map_err(|e| AppError::Decode(e.to_string()))
    }

    /// Listar cargas
    pub async fn list_cargas(&self) -> Result<Vec<Carga>, AppError> {
        log::info!("📦 Cargando lista de cargas");
        let cargas: Vec<Carga> = self.request(HttpMethod::Get, "/cargas", RequestBody::Empty, &[]).await?;
        log::info!("✅ {} cargas recibidas", cargas.len());
        Ok(cargas)
    }

    /// Obtener una carga con sus CT-e
    pub async fn get_carga(&self, id: &str) -> Result<Carga, AppError> {
        log::info!("📦 Cargando carga {}", id);
        let path = format!("/cargas/{}", encode_path_segment(id));
        self.request(HttpMethod::Get, &path, RequestBody::Empty, &[]).await
    }

    /// Subir el XML de un CT-e de subcontratación. Devuelve la confirmación tal cual
    pub async fn upload_cte_xml(&self, carga_id: &str, file: UploadFile) -> Result<serde_json::Value, AppError> {
        log::info!("📤 Subiendo XML {} para carga {}", file.file_name, carga_id);
        let query: String = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("carga_id", carga_id)
            .finish();
        let path = format!("/subcontratacao/upload-xml?{}", query);
        let body = RequestBody::Multipart {
            field: UPLOAD_FIELD_NAME.to_string(),
            file,
        };
        self.request(HttpMethod::Post, &path, body, &[]).await
    }
}

fn encode_path_segment(segment: &str) -> String {
    url::form_urlencoded::byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
