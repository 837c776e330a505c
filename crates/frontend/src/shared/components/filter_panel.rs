use crate::shared::icons::icon;
use leptos::prelude::*;

/// Collapsible filter panel
#[component]
pub fn FilterPanel(
    /// Whether the filter panel is expanded
    is_expanded: RwSignal<bool>,

    /// Number of active filters (for badge display)
    #[prop(into)]
    active_filters_count: Signal<usize>,

    /// Filter content (form fields)
    children: ChildrenFn,
) -> impl IntoView {
    let toggle_expanded = move |_| {
        is_expanded.update(|e| *e = !*e);
    };

    view! {
        <div class="filter-panel">
            <div class="filter-panel-header" on:click=toggle_expanded>
                {icon("filter")}
                <span class="filter-panel__title">"Filtros"</span>
                {move || {
                    let count = active_filters_count.get();
                    (count > 0).then(|| view! { <span class="filter-panel__badge">{count}</span> })
                }}
            </div>

            <Show when=move || is_expanded.get()>
                <div class="filter-panel-content">
                    {children()}
                </div>
            </Show>
        </div>
    }
}
