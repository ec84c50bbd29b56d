use yew::prelude::*;
use yew_router::prelude::*;

use super::{CargaDetails, CargasList, LoginScreen};

#[derive(Routable, Debug, Clone, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[at("/cargas")]
    Cargas,
    #[at("/cargas/:id/visualizar")]
    CargaVisualizar { id: String },
    #[not_found]
    #[at("/404")]
    NotFound,
}

pub fn switch(route: Route) -> Html {
    match route {
        Route::Home => html! { <Redirect<Route> to={Route::Cargas} /> },
        Route::Login => html! { <LoginScreen /> },
        Route::Cargas => html! { <CargasList /> },
        Route::CargaVisualizar { id } => html! { <CargaDetails {id} /> },
        Route::NotFound => html! {
            <div class="page not-found">
                <h1>{"404"}</h1>
                <p>{"Página não encontrada."}</p>
                <Link<Route> to={Route::Cargas}>{"Voltar para cargas"}</Link<Route>>
            </div>
        },
    }
}
