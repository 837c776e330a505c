use contracts::domain::a001_laboratory::aggregate::Laboratory;
use leptos::prelude::*;
use thaw::*;

use super::view_model::LaboratoryDetailsViewModel;
use crate::domain::a001_laboratory::api::LaboratoryListController;
use crate::shared::components::form_field::{FormBanner, FormField};
use crate::shared::modal::Modal;

#[component]
pub fn LaboratoryDetails(
    existing: Option<Laboratory>,
    ctl: LaboratoryListController,
    on_close: Callback<()>,
) -> impl IntoView {
    let vm = LaboratoryDetailsViewModel::new(existing.as_ref());
    let title = if vm.is_edit_mode() {
        "Editar laboratorio"
    } else {
        "Nuevo laboratorio"
    };

    view! {
        <Modal title=title.to_string() on_close=on_close>
            <FormBanner message=Signal::derive(move || vm.errors.with(|e| e.banner())) />

            <div class="details-form">
                <FormField label="Nombre" error=vm.field_error("nombre")>
                    <input
                        type="text"
                        class="form__input"
                        prop:value=move || vm.form.with(|f| f.name.clone())
                        on:input=move |ev| vm.form.update(|f| f.name = event_target_value(&ev))
                        placeholder="Nombre del laboratorio"
                    />
                </FormField>

                <FormField label="Dirección" error=vm.field_error("direccion")>
                    <input
                        type="text"
                        class="form__input"
                        prop:value=move || vm.form.with(|f| f.address.clone())
                        on:input=move |ev| vm.form.update(|f| f.address = event_target_value(&ev))
                        placeholder="Opcional"
                    />
                </FormField>

                <FormField label="Teléfono" error=vm.field_error("telefono")>
                    <input
                        type="text"
                        class="form__input"
                        prop:value=move || vm.form.with(|f| f.phone.clone())
                        on:input=move |ev| vm.form.update(|f| f.phone = event_target_value(&ev))
                        placeholder="Opcional"
                    />
                </FormField>
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
