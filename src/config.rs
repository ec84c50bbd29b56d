use serde::{Deserialize, Serialize};

const DEFAULT_API_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    pub api_url: String,
    pub auth_secret: String,
    pub request_timeout_ms: Option<u32>,
    pub environment: String,
    pub enable_logging: bool,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            auth_secret: String::new(),
            request_timeout_ms: None,
            environment: "development".to_string(),
            enable_logging: true,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        Self::from_values(
            option_env!("API_URL"),
            option_env!("AUTH_SECRET"),
            option_env!("REQUEST_TIMEOUT_MS"),
            option_env!("ENVIRONMENT"),
            option_env!("ENABLE_LOGGING"),
            option_env!("LOG_LEVEL"),
        )
    }

    fn from_values(
        api_url: Option<&str>,
        auth_secret: Option<&str>,
        request_timeout_ms: Option<&str>,
        environment: Option<&str>,
        enable_logging: Option<&str>,
        log_level: Option<&str>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            api_url: api_url
                .map(|url| url.trim().trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty())
                .unwrap_or(defaults.api_url),
            auth_secret: auth_secret.unwrap_or("").to_string(),
            // 0 o vacío = usar el timeout por defecto del transporte
            request_timeout_ms: request_timeout_ms
                .and_then(|v| v.trim().parse::<u32>().ok())
                .filter(|ms| *ms > 0),
            environment: environment
                .filter(|v| !v.is_empty())
                .unwrap_or("development")
                .to_string(),
            enable_logging: enable_logging
                .unwrap_or("true")
                .parse()
                .unwrap_or(true),
            log_level: log_level
                .filter(|v| !v.is_empty())
                .unwrap_or("info")
                .to_string(),
        }
    }

    /// Construye la URL absoluta para un path relativo de la API
    pub fn endpoint(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.api_url, path)
        } else {
            format!("{}/{}", self.api_url, path)
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Nivel de log para wasm_logger
    pub fn log_level(&self) -> log::Level {
        match self.log_level.to_lowercase().as_str() {
            "error" => log::Level::Error,
            "warn" => log::Level::Warn,
            "debug" => log::Level::Debug,
            "trace" => log::Level::Trace,
            _ => log::Level::Info,
        }
    }
}

// Configuración global estática (único punto de la URL de la API)
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}
