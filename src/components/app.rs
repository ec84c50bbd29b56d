use yew::prelude::*;
use yew_router::prelude::*;

use super::routes::{switch, Route};
use super::{Navbar, Sidebar};
use crate::hooks::SessionContextProvider;

#[function_component(App)]
pub fn app() -> Html {
    let sidebar_open = use_state(|| false);

    let on_toggle = {
        let sidebar_open = sidebar_open.clone();
        Callback::from(move |_| sidebar_open.set(!*sidebar_open))
    };
    let on_close = {
        let sidebar_open = sidebar_open.clone();
        Callback::from(move |_| sidebar_open.set(false))
    };

    html! {
        <BrowserRouter>
            <SessionContextProvider>
                <div class="layout">
                    <Navbar on_toggle_sidebar={on_toggle} />
                    <Sidebar open={*sidebar_open} on_close={on_close} />
                    <main class="content">
                        <Switch<Route> render={switch} />
                    </main>
                </div>
            </SessionContextProvider>
        </BrowserRouter>
    }
}
