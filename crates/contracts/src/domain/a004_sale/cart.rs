//! Point-of-sale cart arithmetic
//!
//! The cart lives only in the browser until the sale is confirmed; the server
//! recomputes prices and totals on `POST /ventas/`.

use super::aggregate::{CreateSaleRequest, PaymentMethod, SaleItemRequest};
use crate::domain::a002_product::aggregate::Product;

#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub product_id: i64,
    pub name: String,
    pub serial_code: String,
    pub unit_price: u64,
    pub quantity: u32,
    /// Stock reported by the server when the product was staged
    pub stock: u64,
}

impl CartLine {
    pub fn subtotal(&self) -> u64 {
        self.unit_price.saturating_mul(self.quantity as u64)
    }

    pub fn exceeds_stock(&self) -> bool {
        self.quantity as u64 > self.stock
    }
}

/// What happened when a product was added
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// The line is now above the known stock; the sale may still be attempted
    OverStock { requested: u32, stock: u64 },
    Ignored,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add `quantity` units; a product already in the cart accumulates
    pub fn add(&mut self, product: &Product, quantity: u32) -> AddOutcome {
        if quantity == 0 {
            return AddOutcome::Ignored;
        }
        let index = match self.lines.iter().position(|l| l.product_id == product.id) {
            Some(index) => {
                let line = &mut self.lines[index];
                line.quantity = line.quantity.saturating_add(quantity);
                line.stock = product.stock_total;
                index
            }
            None => {
                self.lines.push(CartLine {
                    product_id: product.id,
                    name: product.name.clone(),
                    serial_code: product.serial_code.clone(),
                    unit_price: product.sale_price,
                    quantity,
                    stock: product.stock_total,
                });
                self.lines.len() - 1
            }
        };
        let line = &self.lines[index];
        if line.exceeds_stock() {
            AddOutcome::OverStock {
                requested: line.quantity,
                stock: line.stock,
            }
        } else {
            AddOutcome::Added
        }
    }

    pub fn remove(&mut self, product_id: i64) {
        self.lines.retain(|l| l.product_id != product_id);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn total(&self) -> u64 {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    pub fn units(&self) -> u64 {
        self.lines.iter().map(|l| l.quantity as u64).sum()
    }

    pub fn to_request(&self, payment_method: PaymentMethod) -> CreateSaleRequest {
        CreateSaleRequest {
            payment_method,
            items: self
                .lines
                .iter()
                .map(|l| SaleItemRequest {
                    product_id: l.product_id,
                    quantity: l.quantity,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, price: u64, stock: u64) -> Product {
        Product {
            id,
            laboratory_id: 1,
            laboratory_name: "Lab".into(),
            name: format!("Producto {}", id),
            description: String::new(),
            dosage_mg: 500,
            capsule_count: 10,
            bioequivalent: false,
            serial_code: format!("SKU{}", id),
            sale_price: price,
            active: true,
            stock_total: stock,
        }
    }

    #[test]
    fn test_repeated_product_accumulates() {
        let mut cart = Cart::new();
        let p = product(1, 1290, 10);
        assert_eq!(cart.add(&p, 2), AddOutcome::Added);
        assert_eq!(cart.add(&p, 3), AddOutcome::Added);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 5);
        assert_eq!(cart.total(), 6450);
    }

    #[test]
    fn test_over_stock_is_reported_but_kept() {
        let mut cart = Cart::new();
        let p = product(2, 500, 3);
        assert_eq!(
            cart.add(&p, 4),
            AddOutcome::OverStock {
                requested: 4,
                stock: 3
            }
        );
        assert_eq!(cart.units(), 4);
        assert_eq!(cart.add(&p, 0), AddOutcome::Ignored);
    }

    #[test]
    fn test_remove_and_request() {
        let mut cart = Cart::new();
        cart.add(&product(1, 100, 5), 1);
        cart.add(&product(2, 200, 5), 2);
        cart.remove(1);
        let request = cart.to_request(PaymentMethod::Debito);
        assert_eq!(request.items.len(), 1);
        assert_eq!(request.items[0].product_id, 2);
        assert_eq!(request.items[0].quantity, 2);
        assert!(request.validate().is_ok());
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), 0);
    }
}
