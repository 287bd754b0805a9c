//! Restock suggestions for products below their stock threshold.

use serde::{Deserialize, Serialize};

use stockpulse_core::ProductId;

use crate::product::Product;

/// Floor for any suggested restock quantity.
pub const MIN_RESTOCK_QUANTITY: u32 = 20;

/// How urgently a low-stock product needs restocking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RestockUrgency {
    /// Out of stock.
    Critical,
    /// Below half of the threshold.
    High,
    Medium,
}

impl RestockUrgency {
    pub fn for_stock(quantity: u32, threshold: u32) -> Self {
        if quantity == 0 {
            RestockUrgency::Critical
        } else if u64::from(quantity) * 2 < u64::from(threshold) {
            RestockUrgency::High
        } else {
            RestockUrgency::Medium
        }
    }
}

/// Suggested restock for one low-stock product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestockSuggestion {
    pub product_id: ProductId,
    pub name: String,
    pub sku: String,
    pub current_stock: u32,
    pub threshold: u32,
    pub suggested_quantity: u32,
    pub urgency: RestockUrgency,
}

/// Bring stock back to twice the threshold, never suggesting fewer than
/// [`MIN_RESTOCK_QUANTITY`] units.
pub fn suggested_restock(threshold: u32, stock: u32) -> u32 {
    threshold
        .saturating_mul(2)
        .saturating_sub(stock)
        .max(MIN_RESTOCK_QUANTITY)
}

/// Suggestions for every product with `quantity < threshold`, in input order.
///
/// An empty result means every stock level is fine.
pub fn suggest_restocks<'a>(products: impl IntoIterator<Item = &'a Product>) -> Vec<RestockSuggestion> {
    products
        .into_iter()
        .filter(|p| p.is_low_stock())
        .map(|p| RestockSuggestion {
            product_id: p.id,
            name: p.name.clone(),
            sku: p.sku.clone(),
            current_stock: p.quantity,
            threshold: p.threshold,
            suggested_quantity: suggested_restock(p.threshold, p.quantity),
            urgency: RestockUrgency::for_stock(p.quantity, p.threshold),
        })
        .collect()
}
