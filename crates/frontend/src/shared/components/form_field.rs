use leptos::prelude::*;

/// Labelled form row with the field's validation message under the input
#[component]
pub fn FormField(
    label: &'static str,
    #[prop(into)]
    error: Signal<Option<String>>,
    children: Children,
) -> impl IntoView {
    view! {
        <div class=move || if error.get().is_some() { "form-group form-group--invalid" } else { "form-group" }>
            <label class="form__label">{label}</label>
            {children()}
            {move || error.get().map(|message| view! { <div class="form__error">{message}</div> })}
        </div>
    }
}

/// Form-level message for errors that belong to no single input
#[component]
pub fn FormBanner(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    move || message.get().map(|text| view! { <div class="alert alert--error">{text}</div> })
}

/// "Todos" / yes / no select for a boolean filter; the value is "", "true"
/// or "false"
#[component]
pub fn TriStateSelect(
    label: &'static str,
    value: RwSignal<String>,
    yes: &'static str,
    no: &'static str,
) -> impl IntoView {
    view! {
        <div class="form-group">
            <label class="form__label">{label}</label>
            <select
                class="form__select"
                prop:value=move || value.get()
                on:change=move |ev| value.set(event_target_value(&ev))
            >
                <option value="">"Todos"</option>
                <option value="true">{yes}</option>
                <option value="false">{no}</option>
            </select>
        </div>
    }
}
