use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

use super::routes::Route;
use super::ui::ErrorAlert;
use crate::hooks::use_session;
use crate::viewmodels::{LoginForm, LoginPhase};

#[function_component(LoginScreen)]
pub fn login_screen() -> Html {
    let session = use_session();
    let navigator = use_navigator();
    let form = use_state(LoginForm::default);

    let username_ref = use_node_ref();
    let password_ref = use_node_ref();

    // Login exitoso → /cargas
    {
        let navigator = navigator.clone();
        use_effect_with(form.phase, move |phase| {
            if *phase == LoginPhase::Succeeded {
                if let Some(navigator) = &navigator {
                    navigator.push(&Route::Cargas);
                }
            }
            || ()
        });
    }

    let on_submit = {
        let username_ref = username_ref.clone();
        let password_ref = password_ref.clone();
        let form = form.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let Some(ctx) = session.clone() else {
                log::error!("❌ LoginScreen fuera de SessionContextProvider");
                return;
            };
            let Some(submitting) = form.submit() else {
                return;
            };

            if let (Some(username_input), Some(password_input)) = (
                username_ref.cast::<HtmlInputElement>(),
                password_ref.cast::<HtmlInputElement>(),
            ) {
                let username = username_input.value();
                let password = password_input.value();

                form.set(submitting.clone());
                let form = form.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    let result = ctx.login(&username, &password).await;
                    form.set(submitting.finish(&result));
                });
            }
        })
    };

    let submitting = form.is_submitting();

    html! {
        <div class="login-screen">
            <div class="login-container">
                <div class="login-header">
                    <div class="login-logo">
                        <div class="logo-icon">{"📦"}</div>
                    </div>
                    <h1>{"Painel de Cargas"}</h1>
                    <p>{"Acesse com seu usuário"}</p>
                </div>

                <form class="login-form" onsubmit={on_submit}>
                    if let Some(error) = &form.error {
                        <ErrorAlert message={error.clone()} />
                    }

                    <div class="form-group">
                        <label for="username">{"Usuário"}</label>
                        <input
                            type="text"
                            id="username"
                            name="username"
                            autocomplete="username"
                            ref={username_ref}
                            disabled={submitting}
                        />
                    </div>

                    <div class="form-group">
                        <label for="password">{"Senha"}</label>
                        <input
                            type="password"
                            id="password"
                            name="password"
                            autocomplete="current-password"
                            ref={password_ref}
                            disabled={submitting}
                        />
                    </div>

                    <button type="submit" class="btn btn-primary btn-login" disabled={!form.can_submit()}>
                        <span class="btn-text">
                            { if submitting { "Entrando..." } else { "Entrar" } }
                        </span>
                    </button>
                </form>
            </div>
        </div>
    }
}
