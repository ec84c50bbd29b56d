// ============================================================================
// LISTA DE CARGAS - Filtros + tabla paginada
// ============================================================================
// Una sola descarga por montaje autenticado; filtros y paginación se
// calculan sobre la lista en memoria.
// ============================================================================

use std::rc::Rc;

use yew::prelude::*;
use yew_router::prelude::*;

use super::routes::Route;
use super::ui::{ErrorAlert, SelectFilter, Spinner, StatusBadge, TextFilter};
use crate::hooks::{use_gated_load, GatedView};
use crate::models::Carga;
use crate::services::ApiClient;
use crate::viewmodels::{build_page, denied_message, CargaFilters, FilterField, FilterOptions, LoadState};

#[function_component(CargasList)]
pub fn cargas_list() -> Html {
    let load = use_gated_load(String::new(), |api: ApiClient| async move {
        api.list_cargas().await.map(Rc::new)
    });

    match load.view {
        GatedView::Waiting => html! { <Spinner /> },
        GatedView::Denied(reason) => html! { <SessionDenied message={denied_message(reason)} /> },
        GatedView::Ready(LoadState::Loading) => html! { <Spinner label="Carregando cargas..." /> },
        GatedView::Ready(LoadState::Failed(message)) => html! {
            <div class="page">
                <h1>{"Cargas"}</h1>
                <ErrorAlert message={message} />
            </div>
        },
        GatedView::Ready(LoadState::Loaded(cargas)) => html! { <CargasTable {cargas} /> },
    }
}

#[derive(Properties, PartialEq)]
pub struct SessionDeniedProps {
    pub message: AttrValue,
}

#[function_component(SessionDenied)]
pub fn session_denied(props: &SessionDeniedProps) -> Html {
    html! {
        <div class="page">
            <ErrorAlert message={props.message.clone()}>
                <Link<Route> to={Route::Login} classes="alert-link">{"Entrar"}</Link<Route>>
            </ErrorAlert>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct CargasTableProps {
    cargas: Rc<Vec<Carga>>,
}

#[function_component(CargasTable)]
fn cargas_table(props: &CargasTableProps) -> Html {
    let filters = use_state(CargaFilters::default);
    let page = use_state(|| 1usize);
    let navigator = use_navigator();

    let options = {
        let cargas = props.cargas.clone();
        use_memo(cargas, |cargas| FilterOptions::from_cargas(cargas))
    };

    let view = build_page(&props.cargas, &filters, *page);

    let on_filter = |field: FilterField| {
        let filters = filters.clone();
        Callback::from(move |value: String| filters.set((*filters).with(field, value)))
    };

    let go_to = |target: usize| {
        let page = page.clone();
        Callback::from(move |_: MouseEvent| page.set(target))
    };

    let text = |field: FilterField, label: &'static str| {
        html! {
            <TextFilter
                label={label}
                value={(*filters).get(field).to_string()}
                on_change={on_filter(field)}
            />
        }
    };
    let select = |field: FilterField, label: &'static str| {
        html! {
            <SelectFilter
                label={label}
                value={(*filters).get(field).to_string()}
                options={options.for_field(field).to_vec()}
                on_change={on_filter(field)}
            />
        }
    };

    html! {
        <div class="page cargas">
            <h1>{"Cargas"}</h1>

            <section class="filters">
                {text(FilterField::Id3zx, "ID 3ZX")}
                {text(FilterField::IdCliente, "ID Cliente")}
                {select(FilterField::OrigemUf, "UF Origem")}
                {select(FilterField::OrigemMunicipio, "Município Origem")}
                {select(FilterField::DestinoUf, "UF Destino")}
                {select(FilterField::DestinoMunicipio, "Município Destino")}
            </section>

            <table class="table">
                <thead>
                    <tr>
                        <th>{"ID 3ZX"}</th>
                        <th>{"ID Cliente"}</th>
                        <th>{"Origem"}</th>
                        <th>{"Destino"}</th>
                        <th>{"ETA Programado"}</th>
                        <th>{"ETD Programado"}</th>
                        <th>{"Status"}</th>
                    </tr>
                </thead>
                <tbody>
                    if view.rows.is_empty() {
                        <tr><td colspan="7" class="empty">{"Nenhuma carga encontrada."}</td></tr>
                    }
                    { for view.rows.iter().map(|row| {
                        let onclick = {
                            let navigator = navigator.clone();
                            let id = row.id.clone();
                            Callback::from(move |_: MouseEvent| {
                                if let Some(navigator) = &navigator {
                                    navigator.push(&Route::CargaVisualizar { id: id.clone() });
                                }
                            })
                        };
                        html! {
                            <tr key={row.id.clone()} class="clickable" {onclick}>
                                <td>{row.id_3zx.clone()}</td>
                                <td>{row.id_cliente.clone()}</td>
                                <td>{row.origem.clone()}</td>
                                <td>{row.destino.clone()}</td>
                                <td>{row.eta.clone()}</td>
                                <td>{row.etd.clone()}</td>
                                <td><StatusBadge label={row.status_label.clone()} class={row.status_class} /></td>
                            </tr>
                        }
                    }) }
                </tbody>
            </table>

            <nav class="pagination">
                <button
                    type="button"
                    class="btn"
                    disabled={!view.has_previous()}
                    onclick={go_to(view.page.saturating_sub(1))}
                >
                    {"Anterior"}
                </button>
                <span class="pagination-info">
                    {format!("Página {} de {}", view.page, view.page_count.max(1))}
                </span>
                <button
                    type="button"
                    class="btn"
                    disabled={!view.has_next()}
                    onclick={go_to(view.page + 1)}
                >
                    {"Próxima"}
                </button>
            </nav>
        </div>
    }
}
