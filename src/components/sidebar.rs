use yew::prelude::*;
use yew_router::prelude::*;

use super::routes::Route;

#[derive(Properties, PartialEq)]
pub struct SidebarProps {
    pub open: bool,
    pub on_close: Callback<()>,
}

#[function_component(Sidebar)]
pub fn sidebar(props: &SidebarProps) -> Html {
    let route = use_route::<Route>();

    // Cerrar al navegar
    {
        let on_close = props.on_close.clone();
        use_effect_with(route.clone(), move |_| {
            on_close.emit(());
            || ()
        });
    }

    let item = |to: Route, label: &'static str| {
        let active = match (&route, &to) {
            (Some(Route::CargaVisualizar { .. }), Route::Cargas) => true,
            (Some(current), to) => current == to,
            (None, _) => false,
        };
        html! {
            <li class={classes!("sidebar-item", active.then_some("active"))}>
                <Link<Route> to={to}>{label}</Link<Route>>
            </li>
        }
    };

    html! {
        <>
            if props.open {
                <div class="sidebar-backdrop" onclick={props.on_close.reform(|_| ())}></div>
            }
            <nav class={classes!("sidebar", props.open.then_some("open"))}>
                <ul>
                    {item(Route::Login, "Login")}
                    {item(Route::Cargas, "Cargas")}
                </ul>
            </nav>
        </>
    }
}
