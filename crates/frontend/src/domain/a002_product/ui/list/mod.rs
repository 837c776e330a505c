use contracts::domain::a001_laboratory::aggregate::Laboratory;
use contracts::domain::a002_product::aggregate::Product;
use contracts::shared::format::format_clp;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a001_laboratory;
use crate::domain::a002_product::api::{self, ProductFilter, ProductListController};
use crate::domain::a002_product::ui::details::ProductDetails;
use crate::layout::global_context::{AppGlobalContext, Section};
use crate::shared::api_error::ApiError;
use crate::shared::api_utils::{selected_id, tri_state};
use crate::shared::components::badge::FlagBadge;
use crate::shared::components::filter_panel::FilterPanel;
use crate::shared::components::form_field::TriStateSelect;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::debounce::{Debouncer, FILTER_DELAY_MS};
use crate::shared::deep_link::watch_edit_marker;
use crate::shared::icons::icon;
use crate::shared::list_controller::{ListController, MutationStrategy};
use crate::shared::modal::{alert, confirm};
use crate::shared::page_frame::{PageFrame, PAGE_CAT_LIST};
use crate::shared::select_options::SelectOptions;

type Editing = Option<Option<Product>>;

const ORDERINGS: &[(&str, &str)] = &[
    ("", "Nombre (A-Z)"),
    ("-nombre", "Nombre (Z-A)"),
    ("precio_venta", "Precio ascendente"),
    ("-precio_venta", "Precio descendente"),
    ("cantidad_mg", "Dosis ascendente"),
    ("-cantidad_mg", "Dosis descendente"),
];

#[component]
pub fn ProductList() -> impl IntoView {
    let ctx =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    let ctl: ProductListController = ListController::new(
        api::SERVICE,
        MutationStrategy::Refetch,
        |p: &Product| p.id,
        ProductFilter::default(),
    );
    ctl.fetch();

    let editing = RwSignal::new(Editing::None);
    watch_edit_marker(Section::Products, ctl, move |product| {
        editing.try_set(Some(Some(product)));
    });

    let laboratories: SelectOptions<Laboratory> =
        SelectOptions::load(a001_laboratory::api::SERVICE);

    // Filter inputs, folded into one ProductFilter
    let search = RwSignal::new(String::new());
    let laboratory = RwSignal::new(String::new());
    let active = RwSignal::new(String::new());
    let bioequivalent = RwSignal::new(String::new());
    let ordering = RwSignal::new(String::new());
    let is_expanded = RwSignal::new(true);

    let debouncer = Debouncer::new(FILTER_DELAY_MS);
    Effect::new(move |_| {
        let filter = ProductFilter {
            search: search.get(),
            laboratorio: selected_id(&laboratory.get()),
            activo: tri_state(&active.get()),
            es_bioequivalente: tri_state(&bioequivalent.get()),
            ordering: ordering.get(),
        };
        debouncer.schedule(move || async move {
            ctl.set_filters(filter);
        });
    });

    let active_filters_count = Signal::derive(move || {
        ctl.filters.with(|f| {
            [
                !f.search.trim().is_empty(),
                f.laboratorio.is_some(),
                f.activo.is_some(),
                f.es_bioequivalente.is_some(),
            ]
            .into_iter()
            .filter(|on| *on)
            .count()
        })
    });

    let close = Callback::new(move |_| {
        editing.set(None);
        ctx.clear_edit();
    });

    let delete = move |product: Product| {
        if !confirm(&format!("¿Eliminar el producto \"{}\"?", product.name)) {
            return;
        }
        spawn_local(async move {
            if let Err(ApiError::Forbidden(detail)) = ctl.delete(product.id).await {
                alert(&detail);
            }
        });
    };

    view! {
        <PageFrame page_id="a002_product--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    {icon("product")}
                    <h1 class="page__title">"Productos"</h1>
                </div>
                <div class="page__header-right">
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| editing.set(Some(None))>
                        {icon("plus")}
                        " Nuevo producto"
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
                        <Label>"Buscar:"</Label>
                        <Input value=search placeholder="Nombre, código o laboratorio..." />
                    </Flex>
                    <div class="form-group">
                        <label class="form__label">"Laboratorio"</label>
                        <select
                            class="form__select"
                            prop:value=move || laboratory.get()
                            on:change=move |ev| laboratory.set(event_target_value(&ev))
                        >
                            <option value="">"Todos"</option>
                            {move || {
                                laboratories
                                    .items
                                    .get()
                                    .into_iter()
                                    .map(|lab| view! { <option value=lab.id.to_string()>{lab.name}</option> })
                                    .collect_view()
                            }}
                        </select>
                    </div>
                    <TriStateSelect label="Estado" value=active yes="Activos" no="Inactivos" />
                    <TriStateSelect label="Bioequivalente" value=bioequivalent yes="Sí" no="No" />
                    <div class="form-group">
                        <label class="form__label">"Orden"</label>
                        <select
                            class="form__select"
                            prop:value=move || ordering.get()
                            on:change=move |ev| ordering.set(event_target_value(&ev))
                        >
                            {ORDERINGS
                                .iter()
                                .map(|(value, label)| view! { <option value=*value>{*label}</option> })
                                .collect_view()}
                        </select>
                    </div>
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
                            <TableHeaderCell>"Código"</TableHeaderCell>
                            <TableHeaderCell>"Nombre"</TableHeaderCell>
                            <TableHeaderCell>"Laboratorio"</TableHeaderCell>
                            <TableHeaderCell>"Dosis"</TableHeaderCell>
                            <TableHeaderCell>"Precio"</TableHeaderCell>
                            <TableHeaderCell>"Stock"</TableHeaderCell>
                            <TableHeaderCell>"Bioeq."</TableHeaderCell>
                            <TableHeaderCell>"Estado"</TableHeaderCell>
                            <TableHeaderCell>"Acciones"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || {
                            let items = ctl.state.with(|s| s.items.clone());
                            if items.is_empty() && !ctl.state.with(|s| s.is_loading()) {
                                return view! {
                                    <TableRow>
                                        <TableCell attr:colspan="9">"No se encontraron productos."</TableCell>
                                    </TableRow>
                                }
                                .into_any();
                            }
                            items
                                .into_iter()
                                .map(|product| {
                                    let for_edit = product.clone();
                                    let for_delete = product.clone();
                                    let stock_class = if product.stock_total == 0 { "stock stock--empty" } else { "stock" };
                                    view! {
                                        <TableRow>
                                            <TableCell><code>{product.serial_code}</code></TableCell>
                                            <TableCell>{product.name}</TableCell>
                                            <TableCell>{product.laboratory_name}</TableCell>
                                            <TableCell>{format!("{} mg x {}", product.dosage_mg, product.capsule_count)}</TableCell>
                                            <TableCell>{format_clp(product.sale_price)}</TableCell>
                                            <TableCell><span class=stock_class>{product.stock_total}</span></TableCell>
                                            <TableCell>
                                                <FlagBadge value=product.bioequivalent yes="Sí" no="No" />
                                            </TableCell>
                                            <TableCell>
                                                <FlagBadge value=product.active yes="Activo" no="Inactivo" />
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
                    <ProductDetails existing=existing ctl=ctl on_close=close />
                })
            }}
        </PageFrame>
    }
}
