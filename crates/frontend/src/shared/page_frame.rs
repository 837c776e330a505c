//! PageFrame — standard root wrapper for every page of the content area.
//!
//! Sets `id` (`"{entity}--{category}"`, e.g. `"a002_product--list"`) and
//! `data-page-category` on the root element, so a page found in the DOM
//! inspector leads straight to its module.

use leptos::prelude::*;

/// List of records with filters and pagination
pub const PAGE_CAT_LIST: &str = "list";
/// Use-case page such as the point of sale
pub const PAGE_CAT_USECASE: &str = "usecase";
/// System administration page
pub const PAGE_CAT_SYSTEM: &str = "system";

#[component]
pub fn PageFrame(
    page_id: &'static str,
    /// One of the PAGE_CAT_* constants
    category: &'static str,
    #[prop(optional)]
    class: &'static str,
    children: Children,
) -> impl IntoView {
    let full_class = if class.is_empty() {
        "page".to_string()
    } else {
        format!("page {}", class)
    };

    view! {
        <div id=page_id class=full_class data-page-category=category>
            {children()}
        </div>
    }
}
