// ============================================================================
// PAINEL DE CARGAS - Frontend Yew (WASM)
// ============================================================================
// - Models: estructuras de la API
// - Services: transporte HTTP, auth y fetch autenticado
// - State: estado de sesión reactivo (lectura/escritura separadas)
// - ViewModels: lógica pura de las vistas
// - Hooks / Components: Yew
// ============================================================================

mod components;
mod config;
mod errors;
mod hooks;
mod models;
mod services;
mod state;
mod utils;
mod viewmodels;

use components::App;
use config::CONFIG;

fn main() {
    console_error_panic_hook::set_once();

    if CONFIG.enable_logging {
        wasm_logger::init(wasm_logger::Config::new(CONFIG.log_level()));
    }
    log::info!("🚀 Painel de Cargas iniciando ({})", CONFIG.environment);
    log::info!("🌐 API: {}", CONFIG.api_url);

    yew::Renderer::<App>::new().render();
}
