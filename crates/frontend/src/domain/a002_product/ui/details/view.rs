use contracts::domain::a001_laboratory::aggregate::Laboratory;
use contracts::domain::a002_product::aggregate::{Product, SERIAL_CODE_MAX_LEN};
use leptos::prelude::*;
use thaw::*;

use super::view_model::ProductDetailsViewModel;
use crate::domain::a001_laboratory;
use crate::domain::a002_product::api::ProductListController;
use crate::shared::components::form_field::{FormBanner, FormField};
use crate::shared::modal::Modal;
use crate::shared::select_options::SelectOptions;

#[component]
pub fn ProductDetails(
    existing: Option<Product>,
    ctl: ProductListController,
    on_close: Callback<()>,
) -> impl IntoView {
    let vm = ProductDetailsViewModel::new(existing.as_ref());
    let laboratories: SelectOptions<Laboratory> =
        SelectOptions::load(a001_laboratory::api::SERVICE);
    let title = if vm.is_edit_mode() {
        "Editar producto"
    } else {
        "Nuevo producto"
    };

    // small helper for the plain text/number inputs
    let text_input = move |kind: &'static str,
                           get: fn(&super::view_model::ProductForm) -> String,
                           set: fn(&mut super::view_model::ProductForm, String)| {
        view! {
            <input
                type=kind
                class="form__input"
                prop:value=move || vm.form.with(get)
                on:input=move |ev| vm.form.update(|f| set(f, event_target_value(&ev)))
            />
        }
    };

    view! {
        <Modal title=title.to_string() on_close=on_close>
            <FormBanner message=Signal::derive(move || vm.errors.with(|e| e.banner())) />

            <div class="details-form">
                <FormField label="Laboratorio" error=vm.field_error("laboratorio")>
                    <select
                        class="form__select"
                        disabled=vm.is_edit_mode()
                        prop:value=move || vm.form.with(|f| f.laboratory_id.clone())
                        on:change=move |ev| vm.form.update(|f| f.laboratory_id = event_target_value(&ev))
                    >
                        <option value="">
                            {move || if laboratories.loading.get() { "Cargando..." } else { "Seleccione un laboratorio" }}
                        </option>
                        {move || {
                            let selected = vm.form.with(|f| f.laboratory_id.clone());
                            laboratories
                                .items
                                .get()
                                .into_iter()
                                .map(|lab| {
                                    let value = lab.id.to_string();
                                    let is_selected = value == selected;
                                    view! { <option value=value selected=is_selected>{lab.name}</option> }
                                })
                                .collect_view()
                        }}
                    </select>
                    {move || laboratories.error.get().map(|e| view! { <div class="form__error">{e}</div> })}
                </FormField>

                <FormField label="Nombre" error=vm.field_error("nombre")>
                    {text_input("text", |f| f.name.clone(), |f, v| f.name = v)}
                </FormField>

                <FormField label="Descripción" error=vm.field_error("descripcion")>
                    <textarea
                        class="form__textarea"
                        prop:value=move || vm.form.with(|f| f.description.clone())
                        on:input=move |ev| vm.form.update(|f| f.description = event_target_value(&ev))
                    />
                </FormField>

                <div class="form-row">
                    <FormField label="Cantidad (mg)" error=vm.field_error("cantidad_mg")>
                        {text_input("number", |f| f.dosage_mg.clone(), |f, v| f.dosage_mg = v)}
                    </FormField>
                    <FormField label="Cápsulas" error=vm.field_error("cantidad_capsulas")>
                        {text_input("number", |f| f.capsule_count.clone(), |f, v| f.capsule_count = v)}
                    </FormField>
                </div>

                <div class="form-row">
                    <FormField label="Código de serie" error=vm.field_error("codigo_serie")>
                        <input
                            type="text"
                            class="form__input"
                            maxlength=SERIAL_CODE_MAX_LEN.to_string()
                            prop:value=move || vm.form.with(|f| f.serial_code.clone())
                            on:input=move |ev| vm.form.update(|f| f.serial_code = event_target_value(&ev))
                        />
                    </FormField>
                    <FormField label="Precio de venta" error=vm.field_error("precio_venta")>
                        {text_input("number", |f| f.sale_price.clone(), |f, v| f.sale_price = v)}
                    </FormField>
                </div>

                <div class="form-row">
                    <label class="form__checkbox">
                        <input
                            type="checkbox"
                            prop:checked=move || vm.form.with(|f| f.bioequivalent)
                            on:change=move |ev| vm.form.update(|f| f.bioequivalent = event_target_checked(&ev))
                        />
                        " Bioequivalente"
                    </label>
                    <label class="form__checkbox">
                        <input
                            type="checkbox"
                            prop:checked=move || vm.form.with(|f| f.active)
                            on:change=move |ev| vm.form.update(|f| f.active = event_target_checked(&ev))
                        />
                        " Activo"
                    </label>
                </div>
            </div>

            <div class="details-actions">
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| vm.save_command(ctl, on_close)
                    disabled=Signal::derive(move || vm.saving.get())
                >
                    {move || if vm.saving.get() { "Guardando..." } else if vm.is_edit_mode() { "Guardar" } else { "Crear" }}
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                    "Cancelar"
                </Button>
            </div>
        </Modal>
    }
}
