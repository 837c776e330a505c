use contracts::domain::a004_sale::aggregate::PaymentMethod;
use contracts::shared::format::format_clp;
use leptos::html;
use leptos::prelude::*;
use thaw::*;

use super::view_model::PosViewModel;
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_USECASE};

#[component]
pub fn PointOfSale() -> impl IntoView {
    let vm = PosViewModel::new();
    vm.load_recent();
    let finder_ref = NodeRef::<html::Input>::new();
    let quantity_ref = NodeRef::<html::Input>::new();

    let focus_quantity = move || {
        if let Some(input) = quantity_ref.get() {
            let _ = input.focus();
            input.select();
        }
    };
    let focus_finder = move || {
        if let Some(input) = finder_ref.get() {
            let _ = input.focus();
        }
    };

    let on_finder_key = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Enter" {
            ev.prevent_default();
            if vm.staged.with_untracked(Option::is_some) {
                focus_quantity();
            }
        }
    };
    let on_quantity_key = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Enter" {
            ev.prevent_default();
            if vm.add_staged() {
                focus_finder();
            }
        }
    };

    view! {
        <PageFrame page_id="u102_point_of_sale--main" category=PAGE_CAT_USECASE>
            <div class="page__header">
                <div class="page__header-left">
                    {icon("cart")}
                    <h1 class="page__title">"Punto de Venta"</h1>
                </div>
            </div>

            <div class="pos">
                <div class="pos__finder">
                    <div class="form-group">
                        <label class="form__label">"Producto"</label>
                        <input
                            node_ref=finder_ref
                            type="text"
                            class="form__input"
                            placeholder="Nombre o código de serie..."
                            autofocus=true
                            prop:value=move || vm.query.get()
                            on:input=move |ev| {
                                let text = event_target_value(&ev);
                                vm.query.set(text.clone());
                                vm.search(text);
                            }
                            on:keydown=on_finder_key
                        />
                    </div>
                    <div class="form-group pos__quantity">
                        <label class="form__label">"Cantidad"</label>
                        <input
                            node_ref=quantity_ref
                            type="number"
                            min="1"
                            class="form__input"
                            prop:value=move || vm.quantity.get()
                            on:input=move |ev| vm.quantity.set(event_target_value(&ev))
                            on:keydown=on_quantity_key
                        />
                    </div>
                    <Button
                        appearance=ButtonAppearance::Primary
                        disabled=Signal::derive(move || vm.staged.with(Option::is_none))
                        on_click=move |_| {
                            if vm.add_staged() {
                                focus_finder();
                            }
                        }
                    >
                        {icon("plus")}
                        " Agregar"
                    </Button>
                </div>

                <div class="pos__staged">
                    {move || {
                        if vm.searching.get() {
                            return view! { <span class="pos__hint">"Buscando..."</span> }.into_any();
                        }
                        match vm.staged.get() {
                            Some(p) => view! {
                                <span class="pos__staged-name">{p.name.clone()}</span>
                                <span class="pos__staged-meta">
                                    {format!("{} · {} · stock {}", p.serial_code, format_clp(p.sale_price), p.stock_total)}
                                </span>
                            }
                            .into_any(),
                            None if !vm.query.with(|q| q.trim().is_empty()) => {
                                view! { <span class="pos__hint">"Sin resultados"</span> }.into_any()
                            }
                            None => ().into_any(),
                        }
                    }}
                </div>

                <Show when=move || vm.results.with(|r| r.len() > 1)>
                    <ul class="pos__results">
                        {move || {
                            let staged_id = vm.staged.with(|s| s.as_ref().map(|p| p.id));
                            vm.results
                                .get()
                                .into_iter()
                                .map(|p| {
                                    let class = if Some(p.id) == staged_id {
                                        "pos__result pos__result--staged"
                                    } else {
                                        "pos__result"
                                    };
                                    let label = format!("{} ({})", p.name, format_clp(p.sale_price));
                                    view! {
                                        <li class=class on:click=move |_| {
                                            vm.stage(p.clone());
                                            focus_quantity();
                                        }>
                                            {label}
                                        </li>
                                    }
                                })
                                .collect_view()
                        }}
                    </ul>
                </Show>

                {move || vm.warning.get().map(|w| view! { <div class="alert alert--warning">{w}</div> })}

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"Código"</TableHeaderCell>
                                <TableHeaderCell>"Producto"</TableHeaderCell>
                                <TableHeaderCell>"Precio"</TableHeaderCell>
                                <TableHeaderCell>"Cantidad"</TableHeaderCell>
                                <TableHeaderCell>"Subtotal"</TableHeaderCell>
                                <TableHeaderCell>""</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            {move || {
                                let lines = vm.cart.with(|c| c.lines().to_vec());
                                if lines.is_empty() {
                                    return view! {
                                        <TableRow>
                                            <TableCell attr:colspan="6">"El carro está vacío."</TableCell>
                                        </TableRow>
                                    }
                                    .into_any();
                                }
                                lines
                                    .into_iter()
                                    .map(|line| {
                                        let id = line.product_id;
                                        let qty_class = if line.exceeds_stock() { "qty qty--over" } else { "qty" };
                                        let serial_code = line.serial_code.clone();
                                        let name = line.name.clone();
                                        let unit_price = format_clp(line.unit_price);
                                        let quantity = line.quantity;
                                        let subtotal = format_clp(line.subtotal());
                                        view! {
                                            <TableRow>
                                                <TableCell><code>{serial_code}</code></TableCell>
                                                <TableCell>{name}</TableCell>
                                                <TableCell>{unit_price}</TableCell>
                                                <TableCell><span class=qty_class>{quantity}</span></TableCell>
                                                <TableCell>{subtotal}</TableCell>
                                                <TableCell>
                                                    <button
                                                        class="button button--icon button--danger"
                                                        title="Quitar"
                                                        on:click=move |_| vm.remove(id)
                                                    >
                                                        {icon("trash")}
                                                    </button>
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

                <div class="pos__checkout">
                    <div class="form-group">
                        <label class="form__label">"Método de pago"</label>
                        <select
                            class="form__select"
                            prop:value=move || vm.payment.get().code()
                            on:change=move |ev| {
                                if let Some(method) = PaymentMethod::from_code(&event_target_value(&ev)) {
                                    vm.payment.set(method);
                                }
                            }
                        >
                            {PaymentMethod::ALL
                                .into_iter()
                                .map(|m| view! { <option value=m.code()>{m.label()}</option> })
                                .collect_view()}
                        </select>
                    </div>
                    <div class="pos__total">
                        <span class="pos__total-label">"Total"</span>
                        <span class="pos__total-value">{move || vm.cart.with(|c| format_clp(c.total()))}</span>
                        <span class="pos__total-units">
                            {move || vm.cart.with(|c| format!("{} unidades", c.units()))}
                        </span>
                    </div>
                    <Button
                        appearance=ButtonAppearance::Primary
                        disabled=Signal::derive(move || vm.submitting.get() || vm.cart.with(|c| c.is_empty()))
                        on_click=move |_| vm.confirm_sale()
                    >
                        {move || if vm.submitting.get() { "Procesando..." } else { "Confirmar venta" }}
                    </Button>
                </div>

                <Show when=move || vm.recent.with(|r| !r.is_empty())>
                    <div class="pos__recent">
                        <h2 class="pos__recent-title">"Últimas ventas"</h2>
                        <ul class="pos__recent-list">
                            {move || {
                                vm.recent
                                    .get()
                                    .into_iter()
                                    .take(5)
                                    .map(|sale| {
                                        let when = sale.created_at.format("%d-%m-%Y %H:%M").to_string();
                                        view! {
                                            <li class="pos__recent-item">
                                                <code>{format!("#{}", sale.short_id())}</code>
                                                <span>{when}</span>
                                                <span>{sale.payment_method.label()}</span>
                                                <span class="pos__recent-total">{format_clp(sale.total)}</span>
                                            </li>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </ul>
                    </div>
                </Show>
            </div>
        </PageFrame>
    }
}
