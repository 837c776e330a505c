use contracts::domain::a003_batch::aggregate::Batch;
use leptos::prelude::*;
use thaw::*;

use super::product_picker::ProductPicker;
use super::view_model::BatchDetailsViewModel;
use crate::domain::a003_batch::api::BatchListController;
use crate::shared::components::form_field::{FormBanner, FormField};
use crate::shared::modal::Modal;

#[component]
pub fn BatchDetails(
    existing: Option<Batch>,
    ctl: BatchListController,
    on_close: Callback<()>,
) -> impl IntoView {
    let vm = BatchDetailsViewModel::new(existing.as_ref());
    let locked = vm.is_edit_mode();
    let title = if locked { "Editar lote" } else { "Nuevo lote" };

    view! {
        <Modal title=title.to_string() on_close=on_close>
            <FormBanner message=Signal::derive(move || vm.errors.with(|e| e.banner())) />

            <div class="details-form">
                <FormField label="Producto" error=vm.field_error("producto")>
                    <ProductPicker
                        selected=Signal::derive(move || vm.form.with(|f| f.product_label.clone()))
                        locked=locked
                        on_pick=Callback::new(move |(id, label)| vm.pick_product(id, label))
                    />
                </FormField>

                <FormField label="Código de lote" error=vm.field_error("codigo_lote")>
                    <input
                        type="text"
                        class="form__input"
                        disabled=locked
                        prop:value=move || vm.form.with(|f| f.lot_code.clone())
                        on:input=move |ev| vm.form.update(|f| f.lot_code = event_target_value(&ev))
                    />
                </FormField>

                <div class="form-row">
                    <FormField label="Fecha de creación" error=vm.field_error("fecha_creacion")>
                        <input
                            type="date"
                            class="form__input"
                            disabled=locked
                            prop:value=move || vm.form.with(|f| f.created_on.clone())
                            on:input=move |ev| vm.form.update(|f| f.created_on = event_target_value(&ev))
                        />
                    </FormField>
                    <FormField label="Fecha de vencimiento" error=vm.field_error("fecha_vencimiento")>
                        <input
                            type="date"
                            class="form__input"
                            disabled=locked
                            prop:value=move || vm.form.with(|f| f.expires_on.clone())
                            on:input=move |ev| vm.form.update(|f| f.expires_on = event_target_value(&ev))
                        />
                    </FormField>
                </div>

                <FormField label="Cantidad" error=vm.field_error("cantidad")>
                    <input
                        type="number"
                        min="0"
                        class="form__input"
                        prop:value=move || vm.form.with(|f| f.quantity.clone())
                        on:input=move |ev| vm.form.update(|f| f.quantity = event_target_value(&ev))
                    />
                </FormField>

                <div class="form-row">
                    <label class="form__checkbox">
                        <input
                            type="checkbox"
                            prop:checked=move || vm.form.with(|f| f.defective)
                            on:change=move |ev| vm.form.update(|f| f.defective = event_target_checked(&ev))
                        />
                        " Defectuoso"
                    </label>
                    <label class="form__checkbox">
                        <input
                            type="checkbox"
                            disabled=move || vm.form.with(|f| f.defective)
                            prop:checked=move || vm.form.with(|f| f.active && !f.defective)
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
                    {move || if vm.saving.get() { "Guardando..." } else if locked { "Guardar" } else { "Crear" }}
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                    "Cancelar"
                </Button>
            </div>
        </Modal>
    }
}
