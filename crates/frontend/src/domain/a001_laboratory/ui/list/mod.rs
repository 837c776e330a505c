use contracts::domain::a001_laboratory::aggregate::Laboratory;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a001_laboratory::api::{self, LaboratoryFilter, LaboratoryListController};
use crate::domain::a001_laboratory::ui::details::LaboratoryDetails;
use crate::layout::global_context::{AppGlobalContext, Section};
use crate::shared::api_error::ApiError;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::debounce::{Debouncer, FILTER_DELAY_MS};
use crate::shared::deep_link::watch_edit_marker;
use crate::shared::icons::icon;
use crate::shared::list_controller::{ListController, MutationStrategy};
use crate::shared::modal::{alert, confirm};
use crate::shared::page_frame::{PageFrame, PAGE_CAT_LIST};

/// Modal state: closed, creating, or editing a record
type Editing = Option<Option<Laboratory>>;

#[component]
pub fn LaboratoryList() -> impl IntoView {
    let ctx =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    // labs carry no server-computed fields, the response is enough
    let ctl: LaboratoryListController = ListController::new(
        api::SERVICE,
        MutationStrategy::PatchInPlace,
        |lab: &Laboratory| lab.id,
        LaboratoryFilter::default(),
    );
    ctl.fetch();

    let editing = RwSignal::new(Editing::None);
    watch_edit_marker(Section::Laboratories, ctl, move |lab| {
        editing.try_set(Some(Some(lab)));
    });

    let search = RwSignal::new(String::new());
    let debouncer = Debouncer::new(FILTER_DELAY_MS);
    Effect::new(move |_| {
        let text = search.get();
        debouncer.schedule(move || async move {
            ctl.set_filters(LaboratoryFilter { search: text });
        });
    });

    let close = Callback::new(move |_| {
        editing.set(None);
        ctx.clear_edit();
    });

    let delete = move |lab: Laboratory| {
        if !confirm(&format!("¿Eliminar el laboratorio \"{}\"?", lab.name)) {
            return;
        }
        spawn_local(async move {
            if let Err(ApiError::Forbidden(detail)) = ctl.delete(lab.id).await {
                alert(&detail);
            }
        });
    };

    view! {
        <PageFrame page_id="a001_laboratory--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    {icon("laboratory")}
                    <h1 class="page__title">"Laboratorios"</h1>
                </div>
                <div class="page__header-right">
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| editing.set(Some(None))>
                        {icon("plus")}
                        " Nuevo laboratorio"
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

            <div class="filter-bar">
                <Flex gap=FlexGap::Small align=FlexAlign::End>
                    <Flex vertical=true gap=FlexGap::Small>
                        <Label>"Buscar:"</Label>
                        <Input value=search placeholder="Nombre del laboratorio..." />
                    </Flex>
                </Flex>
            </div>

            {move || {
                ctl.state.with(|s| s.error.clone()).map(|err| view! {
                    <div class="alert alert--error">{err}</div>
                })
            }}

            <div class="table-wrapper">
                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell>"Nombre"</TableHeaderCell>
                            <TableHeaderCell>"Dirección"</TableHeaderCell>
                            <TableHeaderCell>"Teléfono"</TableHeaderCell>
                            <TableHeaderCell>"Acciones"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || {
                            let items = ctl.state.with(|s| s.items.clone());
                            if items.is_empty() && !ctl.state.with(|s| s.is_loading()) {
                                return view! {
                                    <TableRow>
                                        <TableCell attr:colspan="4">"No hay laboratorios registrados."</TableCell>
                                    </TableRow>
                                }
                                .into_any();
                            }
                            items
                                .into_iter()
                                .map(|lab| {
                                    let for_edit = lab.clone();
                                    let for_delete = lab.clone();
                                    view! {
                                        <TableRow>
                                            <TableCell>{lab.name}</TableCell>
                                            <TableCell>{lab.address.unwrap_or_else(|| "-".into())}</TableCell>
                                            <TableCell>{lab.phone.unwrap_or_else(|| "-".into())}</TableCell>
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
                    <LaboratoryDetails existing=existing ctl=ctl on_close=close />
                })
            }}
        </PageFrame>
    }
}
