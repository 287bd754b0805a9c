//! Dashboard stat cards computed from the product list.

use serde::{Deserialize, Serialize};

use stockpulse_core::Money;

use crate::product::Product;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryStats {
    pub total_products: usize,
    pub low_stock_items: usize,
    /// Σ price × quantity.
    pub total_value: Money,
    pub total_quantity: u64,
}

impl InventoryStats {
    pub fn from_products<'a>(products: impl IntoIterator<Item = &'a Product>) -> Self {
        products
            .into_iter()
            .fold(InventoryStats::default(), |mut stats, p| {
                stats.total_products += 1;
                if p.is_low_stock() {
                    stats.low_stock_items += 1;
                }
                stats.total_value = stats.total_value + p.stock_value();
                stats.total_quantity += u64::from(p.quantity);
                stats
            })
    }
}
