//! Orders joined with a point-in-time product snapshot.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockpulse_core::{Money, ProductId, ValueObject};
use stockpulse_products::Product;

use crate::order::OrderRecord;

/// Name reported for orders whose product could not be joined.
pub const UNKNOWN_PRODUCT: &str = "Unknown";

/// The product as it looked when the order list was fetched.
///
/// This is not a live reference and may be stale relative to the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    pub name: String,
    #[serde(default)]
    pub sku: String,
    pub unit_price: Money,
    pub stock_quantity: u32,
}

impl ValueObject for ProductSnapshot {}

impl From<&Product> for ProductSnapshot {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            sku: product.sku.clone(),
            unit_price: product.price,
            stock_quantity: product.quantity,
        }
    }
}

/// An order plus its joined product snapshot, the sole input of every
/// derived view.
///
/// A missing snapshot is legal; the accessors substitute defaults so that
/// consumers never have to fail or drop the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedOrder {
    pub order: OrderRecord,
    pub product: Option<ProductSnapshot>,
}

impl EnrichedOrder {
    pub fn new(order: OrderRecord, product: Option<ProductSnapshot>) -> Self {
        Self { order, product }
    }

    pub fn quantity(&self) -> u32 {
        self.order.quantity
    }

    pub fn product_id(&self) -> ProductId {
        self.order.product_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.order.created_at
    }

    pub fn product_name(&self) -> &str {
        match &self.product {
            Some(p) if !p.name.is_empty() => &p.name,
            _ => UNKNOWN_PRODUCT,
        }
    }

    pub fn sku(&self) -> &str {
        self.product.as_ref().map(|p| p.sku.as_str()).unwrap_or("")
    }

    pub fn unit_price(&self) -> Money {
        self.product.as_ref().map(|p| p.unit_price).unwrap_or(Money::ZERO)
    }

    pub fn stock_quantity(&self) -> u32 {
        self.product.as_ref().map(|p| p.stock_quantity).unwrap_or(0)
    }

    /// quantity × joined unit price.
    pub fn revenue(&self) -> Money {
        self.unit_price().times(u64::from(self.quantity()))
    }

    /// Stored order total, falling back to [`Self::revenue`] for records
    /// that never stored one.
    pub fn total(&self) -> Money {
        self.order.total.unwrap_or_else(|| self.revenue())
    }
}

/// Join `orders` with the products they reference.
///
/// Order sequence is preserved; orders whose product is absent get `None`.
pub fn enrich<'a>(
    orders: impl IntoIterator<Item = OrderRecord>,
    products: impl IntoIterator<Item = &'a Product>,
) -> Vec<EnrichedOrder> {
    let snapshots: HashMap<ProductId, ProductSnapshot> = products
        .into_iter()
        .map(|p| (p.id, ProductSnapshot::from(p)))
        .collect();

    orders
        .into_iter()
        .map(|order| {
            let product = snapshots.get(&order.product_id).cloned();
            EnrichedOrder::new(order, product)
        })
        .collect()
}
