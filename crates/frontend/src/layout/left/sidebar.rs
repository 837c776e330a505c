//! Left navigation

use crate::layout::global_context::{AppGlobalContext, Section};
use crate::shared::icons::icon;
use leptos::prelude::*;

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    view! {
        <nav class="sidebar">
            {Section::ALL
                .into_iter()
                .map(|section| {
                    let is_active = move || ctx.section.get() == section;
                    view! {
                        <button
                            class=move || {
                                if is_active() { "sidebar__item sidebar__item--active" } else { "sidebar__item" }
                            }
                            on:click=move |_| ctx.navigate(section, None)
                        >
                            {icon(section.icon())}
                            <span class="sidebar__label">{section.label()}</span>
                        </button>
                    }
                })
                .collect_view()}
        </nav>
    }
}
