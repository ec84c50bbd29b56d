// ============================================================================
// DETALLE DE CARGA - Ficha, CT-e vinculados y upload de XML
// ============================================================================

use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

use super::cargas_list::SessionDenied;
use super::routes::Route;
use super::ui::{ErrorAlert, InfoRow, Spinner, StatusBadge};
use crate::errors::AppError;
use crate::hooks::{use_gated_load, use_session, GatedView};
use crate::models::Carga;
use crate::services::{ApiClient, UploadFile};
use crate::utils::XML_CONTENT_TYPE;
use crate::viewmodels::{
    cte_rows, denied_message, detail_rows, upload_outcome, LoadState, UploadOutcome, NO_CTES_MESSAGE,
};

#[derive(Properties, PartialEq)]
pub struct CargaDetailsProps {
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
struct UploadState {
    uploading: bool,
    error: Option<String>,
}

async fn read_upload(file: web_sys::File) -> Result<UploadFile, AppError> {
    let file = gloo_file::File::from(file);
    let bytes = gloo_file::futures::read_as_bytes(&file)
        .await
        .map_err(|e| AppError::Decode(e.to_string()))?;
    let content_type = match file.raw_mime_type() {
        mime if mime.is_empty() => XML_CONTENT_TYPE.to_string(),
        mime => mime,
    };
    Ok(UploadFile {
        file_name: file.name(),
        content_type,
        bytes,
    })
}

#[function_component(CargaDetails)]
pub fn carga_details(props: &CargaDetailsProps) -> Html {
    let session = use_session();
    let upload = use_state(UploadState::default);
    let file_ref = use_node_ref();

    let load = {
        let id = props.id.clone();
        use_gated_load(props.id.clone(), move |api: ApiClient| {
            let id = id.clone();
            async move { api.get_carga(&id).await }
        })
    };

    let on_pick = {
        let file_ref = file_ref.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(input) = file_ref.cast::<HtmlInputElement>() {
                input.click();
            }
        })
    };

    let on_file = {
        let upload = upload.clone();
        let current = load.current.clone();
        let reload = load.reload.clone();
        let carga_id = props.id.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            // Un archivo por envío
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                return;
            };
            input.set_value("");

            let Some(api) = session.as_ref().map(|ctx| ctx.api()) else {
                return;
            };
            // Sin datos cargados no hay vista a la que atar la recarga
            let Some(since) = current.emit(()) else {
                return;
            };
            upload.set(UploadState {
                uploading: true,
                error: None,
            });

            let upload = upload.clone();
            let reload = reload.clone();
            let carga_id = carga_id.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = match read_upload(file).await {
                    Ok(file) => api.upload_cte_xml(&carga_id, file).await,
                    Err(e) => Err(e),
                };
                match upload_outcome(&result) {
                    UploadOutcome::Reload => {
                        log::info!("✅ XML enviado, recargando carga {}", carga_id);
                        upload.set(UploadState::default());
                        reload.emit(since);
                    }
                    UploadOutcome::Failed(message) => {
                        log::error!("❌ {}", message);
                        upload.set(UploadState {
                            uploading: false,
                            error: Some(message),
                        });
                    }
                }
            });
        })
    };

    let body = match load.view {
        GatedView::Waiting => return html! { <Spinner /> },
        GatedView::Denied(reason) => return html! { <SessionDenied message={denied_message(reason)} /> },
        GatedView::Ready(LoadState::Loading) => html! { <Spinner label="Carregando carga..." /> },
        GatedView::Ready(LoadState::Failed(message)) => html! { <ErrorAlert message={message} /> },
        GatedView::Ready(LoadState::Loaded(carga)) => html! {
            <CargaSheet
                carga={carga}
                uploading={upload.uploading}
                upload_error={upload.error.clone()}
                on_pick={on_pick}
            />
        },
    };

    html! {
        <div class="page carga-details">
            <Link<Route> to={Route::Cargas} classes="back-link">{"← Voltar"}</Link<Route>>
            <input
                type="file"
                accept=".xml,application/xml,text/xml"
                class="hidden"
                ref={file_ref}
                onchange={on_file}
            />
            {body}
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct CargaSheetProps {
    carga: Carga,
    uploading: bool,
    upload_error: Option<String>,
    on_pick: Callback<MouseEvent>,
}

#[function_component(CargaSheet)]
fn carga_sheet(props: &CargaSheetProps) -> Html {
    let carga = &props.carga;
    let ctes = cte_rows(carga);

    html! {
        <>
            <header class="page-header">
                <h1>{format!("Carga {}", carga.id_3zx.as_deref().unwrap_or(&carga.id))}</h1>
                <StatusBadge label={carga.status.label()} class={carga.status.kind().css_class()} />
            </header>

            <dl class="info-grid">
                { for detail_rows(carga).into_iter().map(|row| html! {
                    <InfoRow label={row.label} value={row.value} />
                }) }
            </dl>

            <section class="ctes">
                <div class="section-header">
                    <h2>{"CT-e de subcontratação"}</h2>
                    <button
                        type="button"
                        class="btn btn-primary"
                        disabled={props.uploading}
                        onclick={props.on_pick.clone()}
                    >
                        { if props.uploading { "Enviando..." } else { "Enviar XML" } }
                    </button>
                </div>

                if let Some(error) = &props.upload_error {
                    <ErrorAlert message={error.clone()} />
                }

                if ctes.is_empty() {
                    <p class="empty">{NO_CTES_MESSAGE}</p>
                } else {
                    <ul class="cte-list">
                        { for ctes.into_iter().map(|cte| html! {
                            <li key={cte.id.clone()} class="cte-item">
                                <span class="cte-chave">{cte.chave}</span>
                                if let Some(status) = cte.vblog_status {
                                    <span class="cte-status">{status}</span>
                                }
                            </li>
                        }) }
                    </ul>
                }
            </section>
        </>
    }
}
