use yew::prelude::*;
use yew_router::prelude::*;

use super::routes::Route;
use crate::hooks::use_session;

#[derive(Properties, PartialEq)]
pub struct NavbarProps {
    pub on_toggle_sidebar: Callback<()>,
}

#[function_component(Navbar)]
pub fn navbar(props: &NavbarProps) -> Html {
    let session = use_session();
    let navigator = use_navigator();

    let user = session
        .as_ref()
        .and_then(|ctx| ctx.status.session().map(|s| s.user.username.clone()));

    let on_logout = {
        let session = session.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(ctx) = &session {
                ctx.logout();
            }
            if let Some(navigator) = &navigator {
                navigator.push(&Route::Login);
            }
        })
    };

    html! {
        <header class="navbar">
            <button
                type="button"
                class="navbar-toggle"
                aria-label="Menu"
                onclick={props.on_toggle_sidebar.reform(|_| ())}
            >
                {"☰"}
            </button>
            <Link<Route> to={Route::Cargas} classes="navbar-brand">
                {"📦 Painel de Cargas"}
            </Link<Route>>
            <div class="navbar-end">
                {
                    match user {
                        Some(username) => html! {
                            <>
                                <span class="navbar-user">{username}</span>
                                <button type="button" class="btn btn-outline" onclick={on_logout}>
                                    {"Sair"}
                                </button>
                            </>
                        },
                        None => html! {
                            <Link<Route> to={Route::Login} classes="btn btn-outline">{"Entrar"}</Link<Route>>
                        },
                    }
                }
            </div>
        </header>
    }
}
