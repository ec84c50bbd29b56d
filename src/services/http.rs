// ============================================================================
// HTTP TRANSPORT - Frontera entre el cliente y el navegador
// ============================================================================
// `HttpTransport` solo envía y devuelve status + cuerpo. La normalización de
// errores y el header Authorization viven en ApiClient / AuthService.
// ============================================================================

use async_trait::async_trait;
use gloo_net::http::Request;
use gloo_timers::callback::Timeout;
use wasm_bindgen::JsValue;
use web_sys::{AbortController, FormData};

use crate::errors::AppError;
use crate::models::ErrorDetail;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

/// Archivo ya leído en memoria, listo para multipart
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(String),
    Multipart { field: String, file: UploadFile },
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
    pub timeout_ms: Option<u32>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: RequestBody::Empty,
            timeout_ms: None,
        }
    }

    /// Agrega un header reemplazando cualquier otro con el mismo nombre
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        self.headers.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
        self.headers.push((name.to_string(), value.into()));
    }

    pub fn remove_header(&mut self, name: &str) {
        self.headers.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn header_count(&self, name: &str) -> usize {
        self.headers.iter().filter(|(n, _)| n.eq_ignore_ascii_case(name)).count()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// `detail` del cuerpo de error, si vino como texto
    pub fn error_detail(&self) -> Option<String> {
        serde_json::from_str::<ErrorDetail>(&self.body)
            .ok()
            .and_then(|e| e.message())
    }
}

/// Envía un request. Solo falla con `AppError::Network` (sin respuesta)
#[async_trait(?Send)]
pub trait HttpTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, AppError>;
}

/// Transporte real sobre `fetch` del navegador (gloo-net)
#[derive(Clone, Copy, Default)]
pub struct GlooTransport;

fn js_error(value: JsValue) -> AppError {
    AppError::Network(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}

fn multipart_form(field: &str, file: &UploadFile) -> Result<FormData, AppError> {
    let form = FormData::new().map_err(js_error)?;
    let blob = gloo_file::Blob::new_with_options(file.bytes.as_slice(), Some(file.content_type.as_str()));
    let blob: web_sys::Blob = blob.into();
    form.append_with_blob_and_filename(field, &blob, &file.file_name)
        .map_err(js_error)?;
    Ok(form)
}

#[async_trait(?Send)]
impl HttpTransport for GlooTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, AppError> {
        let HttpRequest { method, url, headers, body, timeout_ms } = request;

        let mut builder = match method {
            HttpMethod::Get => Request::get(&url),
            HttpMethod::Post => Request::post(&url),
            HttpMethod::Put => Request::put(&url),
            HttpMethod::Patch => Request::patch(&url),
            HttpMethod::Delete => Request::delete(&url),
        };
        for (name, value) in &headers {
            builder = builder.header(name, value);
        }

        // Timeout opcional: AbortController + timer. Sin timeout se usa el del navegador
        let controller = match timeout_ms {
            Some(_) => Some(AbortController::new().map_err(js_error)?),
            None => None,
        };
        let signal = controller.as_ref().map(|c| c.signal());
        builder = builder.abort_signal(signal.as_ref());
        let _timer = match (timeout_ms, controller) {
            (Some(ms), Some(controller)) => Some(Timeout::new(ms, move || controller.abort())),
            _ => None,
        };

        let prepared = match body {
            RequestBody::Empty => builder.build(),
            RequestBody::Json(json) => builder.body(json),
            RequestBody::Multipart { field, file } => builder.body(multipart_form(&field, &file)?),
        }
        .map_err(|e| AppError::Network(format!("Request build error: {}", e)))?;

        let response = prepared.send().await.map_err(|e| {
            if signal.as_ref().map(|s| s.aborted()).unwrap_or(false) {
                log::warn!("⏱️ Timeout en {} {}", method_name(method), url);
                AppError::Network("timeout".to_string())
            } else {
                AppError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}

pub fn method_name(method: HttpMethod) -> &'static str {
    match method {
        HttpMethod::Get => "GET",
        HttpMethod::Post => "POST",
        HttpMethod::Put => "PUT",
        HttpMethod::Patch => "PATCH",
        HttpMethod::Delete => "DELETE",
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    /// Transporte en memoria: devuelve respuestas encoladas y guarda los requests
    #[derive(Default)]
    pub struct MockTransport {
        responses: RefCell<VecDeque<Result<HttpResponse, AppError>>>,
        requests: RefCell<Vec<HttpRequest>>,
    }

    impl MockTransport {
        pub fn new() -> Rc<Self> {
            Rc::new(Self::default())
        }

        pub fn respond(&self, status: u16, body: &str) {
            self.responses.borrow_mut().push_back(Ok(HttpResponse {
                status,
                body: body.to_string(),
            }));
        }

        pub fn fail(&self, error: AppError) {
            self.responses.borrow_mut().push_back(Err(error));
        }

        pub fn requests(&self) -> Vec<HttpRequest> {
            self.requests.borrow().clone()
        }
    }

    #[async_trait(?Send)]
    impl HttpTransport for MockTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, AppError> {
            self.requests.borrow_mut().push(request);
            self.responses
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(AppError::Network("no mock response".into())))
        }
    }
}
