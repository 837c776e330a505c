use contracts::domain::a003_batch::aggregate::Batch;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a003_batch::api::{self, BatchFilter, BatchListController};
use crate::domain::a003_batch::ui::details::BatchDetails;
use crate::layout::global_context::{AppGlobalContext, Section};
use crate::shared::api_error::ApiError;
use crate::shared::api_utils::tri_state;
use crate::shared::components::badge::{ExpiryBadge, FlagBadge};
use crate::shared::components::filter_panel::FilterPanel;
use crate::shared::components::form_field::TriStateSelect;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::date_utils::{format_date, today};
use crate::shared::debounce::{Debouncer, FILTER_DELAY_MS};
use crate::shared::deep_link::watch_edit_marker;
use crate::shared::icons::icon;
use crate::shared::list_controller::{ListController, MutationStrategy};
use crate::shared::modal::{alert, confirm};
use crate::shared::page_frame::{PageFrame, PAGE_CAT_LIST};

type Editing = Option<Option<Batch>>;

#[component]
pub fn BatchList() -> impl IntoView {
    let ctx =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    // producto_nombre and the product's stock change with every save
    let ctl: BatchListController = ListController::new(
        api::SERVICE,
        MutationStrategy::Refetch,
        |b: &Batch| b.id,
        BatchFilter::default(),
    );
    ctl.fetch();

    let editing = RwSignal::new(Editing::None);
    watch_edit_marker(Section::Batches, ctl, move |batch| {
        editing.try_set(Some(Some(batch)));
    });

    let search = RwSignal::new(String::new());
    let active = RwSignal::new(String::new());
    let defective = RwSignal::new(String::new());
    let expires_from = RwSignal::new(String::new());
    let expires_to = RwSignal::new(String::new());
    let is_expanded = RwSignal::new(true);

    let debouncer = Debouncer::new(FILTER_DELAY_MS);
    Effect::new(move |_| {
        let filter = BatchFilter {
            search: search.get(),
            producto: None,
            activo: tri_state(&active.get()),
            defectuoso: tri_state(&defective.get()),
            expires_from: expires_from.get(),
            expires_to: expires_to.get(),
        };
        debouncer.schedule(move || async move {
            ctl.set_filters(filter);
        });
    });

    let active_filters_count = Signal::derive(move || {
        ctl.filters.with(|f| {
            [
                !f.search.trim().is_empty(),
                f.activo.is_some(),
                f.defectuoso.is_some(),
                !f.expires_from.is_empty(),
                !f.expires_to.is_empty(),
            ]
            .into_iter()
            .filter(|on| *on)
            .count()
        })
    });

    let clear_filters = move |_: leptos::ev::MouseEvent| {
        search.set(String::new());
        active.set(String::new());
        defective.set(String::new());
        expires_from.set(String::new());
        expires_to.set(String::new());
    };

    let close = Callback::new(move |_| {
        editing.set(None);
        ctx.clear_edit();
    });

    let delete = move |batch: Batch| {
        if !confirm(&format!("¿Eliminar el lote \"{}\"?", batch.lot_code)) {
            return;
        }
        spawn_local(async move {
            if let Err(ApiError::Forbidden(detail)) = ctl.delete(batch.id).await {
                alert(&detail);
            }
        });
    };

    view! {
        <PageFrame page_id="a003_batch--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    {icon("batch")}
                    <h1 class="page__title">"Lotes"</h1>
                </div>
                <div class="page__header-right">
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| editing.set(Some(None))>
                        {icon("plus")}
                        " Nuevo lote"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| ctl.fetch()
                        disabled=Signal::derive(move || ctl.state.with(|s| s.is_loading()))
                    >
                        {icon("refresh")}
                    </Button>
                </div>
            </div>

            <FilterPanel is_expanded=is_expanded active_filters_count=active_filters_count>
                <Flex gap=FlexGap::Small align=FlexAlign::End>
                    <Flex vertical=true gap=FlexGap::Small>
                        <Label>"Código de lote:"</Label>
                        <Input value=search placeholder="Buscar..." />
                    </Flex>
                    <TriStateSelect label="Estado" value=active yes="Activos" no="Inactivos" />
                    <TriStateSelect label="Defectuoso" value=defective yes="Sí" no="No" />
                    <div class="form-group">
                        <label class="form__label">"Vence desde"</label>
                        <input
                            type="date"
                            class="form__input"
                            prop:value=move || expires_from.get()
                            on:change=move |ev| expires_from.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="form-group">
                        <label class="form__label">"Vence hasta"</label>
                        <input
                            type="date"
                            class="form__input"
                            prop:value=move || expires_to.get()
                            on:change=move |ev| expires_to.set(event_target_value(&ev))
                        />
                    </div>
                    <Button appearance=ButtonAppearance::Secondary on_click=clear_filters>
                        {icon("x")}
                        " Limpiar"
                    </Button>
                </Flex>
            </FilterPanel>

            {move || {
                ctl.state.with(|s| s.error.clone()).map(|err| view! {
                    <div class="alert alert--error">{err}</div>
                })
            }}

            <div class="table-wrapper">
                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell>"Lote"</TableHeaderCell>
                            <TableHeaderCell>"Producto"</TableHeaderCell>
                            <TableHeaderCell>"Creación"</TableHeaderCell>
                            <TableHeaderCell>"Vencimiento"</TableHeaderCell>
                            <TableHeaderCell>"Cantidad"</TableHeaderCell>
                            <TableHeaderCell>"Vigencia"</TableHeaderCell>
                            <TableHeaderCell>"Estado"</TableHeaderCell>
                            <TableHeaderCell>"Defectuoso"</TableHeaderCell>
                            <TableHeaderCell>"Acciones"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || {
                            let items = ctl.state.with(|s| s.items.clone());
                            if items.is_empty() && !ctl.state.with(|s| s.is_loading()) {
                                return view! {
                                    <TableRow>
                                        <TableCell attr:colspan="9">"No se encontraron lotes."</TableCell>
                                    </TableRow>
                                }
                                .into_any();
                            }
                            let today = today();
                            items
                                .into_iter()
                                .map(|batch| {
                                    let status = batch.expiry_status(today);
                                    let for_edit = batch.clone();
                                    let for_delete = batch.clone();
                                    view! {
                                        <TableRow>
                                            <TableCell><code>{batch.lot_code}</code></TableCell>
                                            <TableCell>{batch.product_name}</TableCell>
                                            <TableCell>{format_date(batch.created_on)}</TableCell>
                                            <TableCell>{format_date(batch.expires_on)}</TableCell>
                                            <TableCell>{batch.quantity}</TableCell>
                                            <TableCell><ExpiryBadge status=status /></TableCell>
                                            <TableCell>
                                                <FlagBadge value=batch.active yes="Activo" no="Inactivo" />
                                            </TableCell>
                                            <TableCell>
                                                <FlagBadge value=batch.defective yes="Sí" no="No" danger_when_true=true />
                                            </TableCell>
                                            <TableCell>
                                                <div class="table__actions">
                                                    <button
                                                        class="button button--icon"
                                                        title="Editar"
                                                        on:click=move |_| editing.set(Some(Some(for_edit.clone())))
                                                    >
                                                        {icon("edit")}
                                                    </button>
                                                    <button
                                                        class="button button--icon button--danger"
                                                        title="Eliminar"
                                                        on:click=move |_| delete(for_delete.clone())
                                                    >
                                                        {icon("trash")}
                                                    </button>
                                                </div>
                                            </TableCell>
                                        </TableRow>
                                    }
                                })
                                .collect_view()
                                .into_any()
                        }}
                    </TableBody>
                </Table>
            </div>

            <PaginationControls
                current_page=Signal::derive(move || ctl.state.with(|s| s.page))
                total_pages=Signal::derive(move || ctl.state.with(|s| s.total_pages()))
                total_count=Signal::derive(move || ctl.state.with(|s| s.count))
                on_page_change=Callback::new(move |page| ctl.go_to_page(page))
            />

            {move || {
                editing.get().map(|existing| view! {
                    <BatchDetails existing=existing ctl=ctl on_close=close />
                })
            }}
        </PageFrame>
    }
}
