use contracts::domain::a002_product::aggregate::Product;
use contracts::domain::a004_sale::aggregate::{PaymentMethod, Sale};
use contracts::domain::a004_sale::cart::{AddOutcome, Cart};
use contracts::shared::format::format_clp;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::api;
use crate::domain::a002_product::api::search_products;
use crate::shared::api_error::ApiError;
use crate::shared::debounce::{plan_search, Debouncer, SearchPlan, POS_SEARCH_DELAY_MS};
use crate::shared::modal::alert;

/// Units typed in the quantity box; anything else counts as nothing
pub fn parse_quantity(value: &str) -> Option<u32> {
    value.trim().parse::<u32>().ok().filter(|q| *q > 0)
}

pub fn over_stock_warning(name: &str, requested: u32, stock: u64) -> String {
    format!(
        "Atención: \"{}\" tiene {} unidades en stock y el carro lleva {}.",
        name, stock, requested
    )
}

pub fn sale_success_message(sale: &Sale) -> String {
    format!(
        "Venta registrada #{}\nTotal: {}",
        sale.short_id(),
        format_clp(sale.total)
    )
}

/// Flatten a failed sale into one alert text
pub fn sale_error_message(error: &ApiError) -> String {
    match error.field_errors() {
        Some(errors) => {
            let messages: Vec<String> = errors.0.values().flatten().cloned().collect();
            format!("No se pudo registrar la venta:\n{}", messages.join("\n"))
        }
        None => format!("No se pudo registrar la venta: {}", error),
    }
}

#[derive(Clone, Copy)]
pub struct PosViewModel {
    pub query: RwSignal<String>,
    pub results: RwSignal<Vec<Product>>,
    pub searching: RwSignal<bool>,
    /// Product the quantity box applies to
    pub staged: RwSignal<Option<Product>>,
    pub quantity: RwSignal<String>,
    pub cart: RwSignal<Cart>,
    pub payment: RwSignal<PaymentMethod>,
    pub warning: RwSignal<Option<String>>,
    pub submitting: RwSignal<bool>,
    /// Newest sales, first page of `/ventas/`
    pub recent: RwSignal<Vec<Sale>>,
    debouncer: Debouncer,
}

impl PosViewModel {
    pub fn new() -> Self {
        Self {
            query: RwSignal::new(String::new()),
            results: RwSignal::new(Vec::new()),
            searching: RwSignal::new(false),
            staged: RwSignal::new(None),
            quantity: RwSignal::new("1".to_string()),
            cart: RwSignal::new(Cart::new()),
            payment: RwSignal::new(PaymentMethod::default()),
            warning: RwSignal::new(None),
            submitting: RwSignal::new(false),
            recent: RwSignal::new(Vec::new()),
            debouncer: Debouncer::new(POS_SEARCH_DELAY_MS),
        }
    }

    /// Debounced finder; the first hit is staged
    pub fn search(&self, text: String) {
        let this = *self;
        // a staged product always matches the text in the box
        this.staged.set(None);
        match plan_search(&text, 1) {
            SearchPlan::Clear => {
                this.debouncer.cancel();
                this.results.set(Vec::new());
            }
            SearchPlan::Search(text) => {
                this.debouncer.schedule(move || async move {
                    this.searching.try_set(true);
                    let found = search_products(&text, true).await;
                    this.searching.try_set(false);
                    if this.query.try_get_untracked().map(|q| q.trim().to_string()) != Some(text) {
                        return;
                    }
                    match found {
                        Ok(products) => {
                            this.staged.try_set(products.first().cloned());
                            this.results.try_set(products);
                        }
                        Err(e) => {
                            log::warn!("POS product search failed: {}", e);
                            this.results.try_set(Vec::new());
                            this.staged.try_set(None);
                        }
                    }
                });
            }
        }
    }

    pub fn load_recent(&self) {
        let this = *self;
        spawn_local(async move {
            match api::list_sales(1, &api::SaleFilter::default()).await {
                Ok(page) => {
                    this.recent.try_set(page.results);
                }
                Err(e) => log::warn!("Recent sales unavailable: {}", e),
            }
        });
    }

    pub fn stage(&self, product: Product) {
        self.staged.set(Some(product));
    }

    /// Put the staged product in the cart; true when something was added
    pub fn add_staged(&self) -> bool {
        let Some(product) = self.staged.get_untracked() else {
            return false;
        };
        let Some(qty) = parse_quantity(&self.quantity.get_untracked()) else {
            self.warning.set(Some("Ingrese una cantidad mayor a 0.".to_string()));
            return false;
        };

        let outcome = self
            .cart
            .try_update(|cart| cart.add(&product, qty))
            .unwrap_or(AddOutcome::Ignored);
        match outcome {
            AddOutcome::Added => self.warning.set(None),
            // the server has the final word on stock
            AddOutcome::OverStock { requested, stock } => self
                .warning
                .set(Some(over_stock_warning(&product.name, requested, stock))),
            AddOutcome::Ignored => return false,
        }

        self.staged.set(None);
        self.results.set(Vec::new());
        self.query.set(String::new());
        self.quantity.set("1".to_string());
        true
    }

    pub fn remove(&self, product_id: i64) {
        self.cart.update(|cart| cart.remove(product_id));
    }

    pub fn confirm_sale(&self) {
        if self.submitting.get_untracked() || self.cart.with_untracked(Cart::is_empty) {
            return;
        }
        let request = self
            .cart
            .with_untracked(|cart| cart.to_request(self.payment.get_untracked()));
        let this = *self;
        this.submitting.set(true);
        spawn_local(async move {
            match api::create_sale(&request).await {
                Ok(sale) => {
                    log::info!("Sale {} registered, total {}", sale.id, sale.total);
                    this.cart.try_update(Cart::clear);
                    this.warning.try_set(None);
                    alert(&sale_success_message(&sale));
                    this.load_recent();
                }
                Err(e) => {
                    log::error!("Sale failed: {}", e);
                    alert(&sale_error_message(&e));
                }
            }
            this.submitting.try_set(false);
        });
    }
}

impl Default for PosViewModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use contracts::shared::validation::FieldErrors;
    use uuid::Uuid;

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity(" 3 "), Some(3));
        assert_eq!(parse_quantity("0"), None);
        assert_eq!(parse_quantity("-1"), None);
        assert_eq!(parse_quantity("dos"), None);
    }

    #[test]
    fn test_success_message_has_id_prefix_and_total() {
        let sale = Sale {
            id: Uuid::parse_str("3f2a9c1e-0000-4000-8000-000000000000").unwrap(),
            created_at: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
            total: 12580,
            payment_method: PaymentMethod::Debito,
            user_id: 1,
            seller_name: "caja1".into(),
            voided: false,
            lines: vec![],
        };
        assert_eq!(
            sale_success_message(&sale),
            "Venta registrada #3f2a9c1e\nTotal: $12.580"
        );
    }

    #[test]
    fn test_error_message_lists_stock_problems() {
        let err = ApiError::Validation(FieldErrors::single(
            "items",
            "Stock insuficiente para \"Paracetamol\": solicitado 5, disponible 2.",
        ));
        let text = sale_error_message(&err);
        assert!(text.contains("solicitado 5, disponible 2"));

        let text = sale_error_message(&ApiError::Network("offline".into()));
        assert!(text.contains("offline"));
    }
}
