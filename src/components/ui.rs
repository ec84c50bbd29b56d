// Componentes de presentación reutilizables (sin estado propio)

use yew::prelude::*;

use crate::viewmodels::FilterOption;

#[derive(Properties, PartialEq)]
pub struct SpinnerProps {
    #[prop_or(AttrValue::Static("Carregando..."))]
    pub label: AttrValue,
}

#[function_component(Spinner)]
pub fn spinner(props: &SpinnerProps) -> Html {
    html! {
        <div class="loading">
            <div class="spinner"></div>
            <p>{props.label.clone()}</p>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct AlertProps {
    pub message: AttrValue,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(ErrorAlert)]
pub fn error_alert(props: &AlertProps) -> Html {
    html! {
        <div class="alert alert-error" role="alert">
            <span>{props.message.clone()}</span>
            {props.children.clone()}
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct StatusBadgeProps {
    pub label: AttrValue,
    pub class: AttrValue,
}

#[function_component(StatusBadge)]
pub fn status_badge(props: &StatusBadgeProps) -> Html {
    html! { <span class={props.class.clone()}>{props.label.clone()}</span> }
}

#[derive(Properties, PartialEq)]
pub struct TextFilterProps {
    pub label: AttrValue,
    pub value: AttrValue,
    pub on_change: Callback<String>,
}

#[function_component(TextFilter)]
pub fn text_filter(props: &TextFilterProps) -> Html {
    let oninput = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            on_change.emit(input.value());
        })
    };
    html! {
        <label class="filter">
            <span>{props.label.clone()}</span>
            <input type="text" value={props.value.clone()} {oninput} />
        </label>
    }
}

#[derive(Properties, PartialEq)]
pub struct SelectFilterProps {
    pub label: AttrValue,
    pub value: AttrValue,
    pub options: Vec<FilterOption>,
    pub on_change: Callback<String>,
}

#[function_component(SelectFilter)]
pub fn select_filter(props: &SelectFilterProps) -> Html {
    let onchange = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let select: web_sys::HtmlSelectElement = e.target_unchecked_into();
            on_change.emit(select.value());
        })
    };
    html! {
        <label class="filter">
            <span>{props.label.clone()}</span>
            <select {onchange}>
                <option value="" selected={props.value.is_empty()}>{"Todos"}</option>
                { for props.options.iter().map(|o| html! {
                    <option value={o.code.clone()} selected={*props.value == *o.code}>
                        {o.label.clone()}
                    </option>
                }) }
            </select>
        </label>
    }
}

#[derive(Properties, PartialEq)]
pub struct InfoRowProps {
    pub label: AttrValue,
    pub value: AttrValue,
}

#[function_component(InfoRow)]
pub fn info_row(props: &InfoRowProps) -> Html {
    html! {
        <div class="info-row">
            <dt>{props.label.clone()}</dt>
            <dd>{props.value.clone()}</dd>
        </div>
    }
}
