use contracts::domain::a002_product::aggregate::Product;
use leptos::prelude::*;

use crate::domain::a002_product::api::search_products;
use crate::shared::debounce::{
    plan_search, Debouncer, SearchPlan, GLOBAL_SEARCH_DELAY_MS, PRODUCT_PICKER_MIN_LEN,
};

fn product_label(p: &Product) -> String {
    format!("{} {} mg ({})", p.name, p.dosage_mg, p.serial_code)
}

/// Search-as-you-type product selector
///
/// Shows `selected` until the user types; results need at least
/// four characters.
#[component]
pub fn ProductPicker(
    #[prop(into)] selected: Signal<String>,
    locked: bool,
    on_pick: Callback<(i64, String)>,
) -> impl IntoView {
    let query = RwSignal::new(String::new());
    let results = RwSignal::new(Vec::<Product>::new());
    let searching = RwSignal::new(false);
    let open = RwSignal::new(false);
    let debouncer = Debouncer::new(GLOBAL_SEARCH_DELAY_MS);
    let generation = StoredValue::new(0u64);

    Effect::new(move |_| {
        let text = query.get();
        match plan_search(&text, PRODUCT_PICKER_MIN_LEN) {
            SearchPlan::Clear => {
                debouncer.cancel();
                results.set(Vec::new());
                searching.set(false);
            }
            SearchPlan::Search(text) => {
                debouncer.schedule(move || async move {
                    let ticket = generation.get_value() + 1;
                    generation.set_value(ticket);
                    searching.try_set(true);
                    let found = search_products(&text, false).await;
                    // a later query may have finished first
                    if generation.try_get_value() != Some(ticket) {
                        return;
                    }
                    searching.try_set(false);
                    match found {
                        Ok(products) => {
                            results.try_set(products);
                        }
                        Err(e) => {
                            log::warn!("Product search failed: {}", e);
                            results.try_set(Vec::new());
                        }
                    }
                });
            }
        }
    });

    let pick = move |p: Product| {
        on_pick.run((p.id, product_label(&p)));
        query.set(String::new());
        open.set(false);
    };

    view! {
        <div class="picker">
            <input
                type="text"
                class="form__input"
                disabled=locked
                placeholder="Buscar producto (mín. 4 caracteres)..."
                prop:value=move || if open.get() { query.get() } else { selected.get() }
                on:focus=move |_| open.set(!locked)
                on:input=move |ev| {
                    open.set(true);
                    query.set(event_target_value(&ev));
                }
            />
            <Show when=move || open.get() && (searching.get() || !results.with(Vec::is_empty))>
                <ul class="picker__results">
                    {move || {
                        if searching.get() {
                            return view! { <li class="picker__hint">"Buscando..."</li> }.into_any();
                        }
                        results
                            .get()
                            .into_iter()
                            .map(|p| {
                                let label = product_label(&p);
                                view! {
                                    <li class="picker__item" on:mousedown=move |_| pick(p.clone())>
                                        {label}
                                    </li>
                                }
                            })
                            .collect_view()
                            .into_any()
                    }}
                </ul>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_label() {
        let p = Product {
            id: 1,
            laboratory_id: 2,
            laboratory_name: "Chile".into(),
            name: "Ibuprofeno".into(),
            description: String::new(),
            dosage_mg: 400,
            capsule_count: 20,
            bioequivalent: true,
            serial_code: "7800000000011".into(),
            sale_price: 1990,
            active: true,
            stock_total: 12,
        };
        assert_eq!(product_label(&p), "Ibuprofeno 400 mg (7800000000011)");
    }
}
