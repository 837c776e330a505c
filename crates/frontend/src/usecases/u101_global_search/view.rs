//! Header search box over products, batches and laboratories

use contracts::shared::search::{GlobalSearchResponse, SearchHit, MIN_QUERY_LEN};
use leptos::prelude::*;
use thaw::*;

use super::api;
use crate::layout::global_context::{AppGlobalContext, Section};
use crate::shared::debounce::{plan_search, Debouncer, SearchPlan, GLOBAL_SEARCH_DELAY_MS};
use crate::shared::icons::icon;

#[component]
pub fn GlobalSearch() -> impl IntoView {
    let ctx =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    let query = RwSignal::new(String::new());
    let results = RwSignal::new(GlobalSearchResponse::default());
    let is_open = RwSignal::new(false);
    let is_loading = RwSignal::new(false);
    let debouncer = Debouncer::new(GLOBAL_SEARCH_DELAY_MS);

    Effect::new(move |_| match plan_search(&query.get(), MIN_QUERY_LEN) {
        SearchPlan::Clear => {
            debouncer.cancel();
            results.set(GlobalSearchResponse::default());
            is_open.set(false);
        }
        SearchPlan::Search(q) => {
            debouncer.schedule(move || async move {
                is_loading.try_set(true);
                match api::global_search(&q).await {
                    // the box may have changed while the request was in flight
                    Ok(found) if query.get_untracked().trim() == q => {
                        results.try_set(found);
                        is_open.try_set(true);
                    }
                    Ok(_) => {}
                    Err(e) => log::warn!("Global search failed: {}", e),
                }
                is_loading.try_set(false);
            });
        }
    });

    let pick = Callback::new(move |(section, id): (Section, i64)| {
        ctx.navigate(section, Some(id));
        is_open.set(false);
        query.set(String::new());
    });

    view! {
        <div class="global-search">
            <div class="global-search__input">
                {icon("search")}
                <Input value=query placeholder="Buscar productos, lotes, laboratorios..." />
            </div>
            <Show when=move || is_open.get()>
                <div class="global-search__results">
                    {move || {
                        let found = results.get();
                        if found.is_empty() {
                            view! {
                                <div class="global-search__empty">
                                    {if is_loading.get() { "Buscando..." } else { "Sin resultados" }}
                                </div>
                            }
                            .into_any()
                        } else {
                            view! {
                                <HitGroup title="Productos" hits=found.products section=Section::Products on_pick=pick />
                                <HitGroup title="Lotes" hits=found.batches section=Section::Batches on_pick=pick />
                                <HitGroup title="Laboratorios" hits=found.laboratories section=Section::Laboratories on_pick=pick />
                            }
                            .into_any()
                        }
                    }}
                </div>
            </Show>
        </div>
    }
}

#[component]
fn HitGroup(
    title: &'static str,
    hits: Vec<SearchHit>,
    section: Section,
    on_pick: Callback<(Section, i64)>,
) -> impl IntoView {
    if hits.is_empty() {
        return ().into_any();
    }
    view! {
        <div class="global-search__group">
            <div class="global-search__group-title">{title}</div>
            {hits
                .into_iter()
                .map(|hit| {
                    let id = hit.id;
                    view! {
                        <div class="global-search__hit" on:click=move |_| on_pick.run((section, id))>
                            <div class="global-search__hit-title">{hit.title}</div>
                            <div class="global-search__hit-subtitle">{hit.subtitle}</div>
                            {hit.extra.map(|extra| view! { <div class="global-search__hit-extra">{extra}</div> })}
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
    .into_any()
}
