use crate::shared::icons::icon;
use leptos::prelude::*;

/// Page navigation for server-paginated lists
///
/// Pages are 1-based, as the API numbers them.
#[component]
pub fn PaginationControls(
    /// Current page (1-based)
    #[prop(into)]
    current_page: Signal<u64>,

    /// Total number of pages; zero for an empty list
    #[prop(into)]
    total_pages: Signal<u64>,

    /// Total count of records
    #[prop(into)]
    total_count: Signal<u64>,

    /// Callback with the requested page
    on_page_change: Callback<u64>,
) -> impl IntoView {
    let is_first = move || current_page.get() <= 1;
    let is_last = move || current_page.get() >= total_pages.get();

    view! {
        <div class="pagination-controls">
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(1)
                disabled=is_first
                title="Primera página"
            >
                {icon("chevrons-left")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(current_page.get().saturating_sub(1))
                disabled=is_first
                title="Página anterior"
            >
                {icon("chevron-left")}
            </button>
            <span class="pagination-info">
                {move || {
                    format!(
                        "Página {} de {} ({} registros)",
                        current_page.get(),
                        total_pages.get().max(1),
                        total_count.get()
                    )
                }}
            </span>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(current_page.get() + 1)
                disabled=is_last
                title="Página siguiente"
            >
                {icon("chevron-right")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(total_pages.get())
                disabled=is_last
                title="Última página"
            >
                {icon("chevrons-right")}
            </button>
        </div>
    }
}
