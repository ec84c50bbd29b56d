pub mod app;
pub mod carga_details;
pub mod cargas_list;
pub mod login_screen;
pub mod navbar;
pub mod routes;
pub mod sidebar;
pub mod ui;

pub use app::App;
pub use carga_details::CargaDetails;
pub use cargas_list::CargasList;
pub use login_screen::LoginScreen;
pub use navbar::Navbar;
pub use routes::Route;
pub use sidebar::Sidebar;
