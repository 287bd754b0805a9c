//! Naive demand forecast: historical units plus a fixed uplift.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use stockpulse_core::ProductId;
use stockpulse_sales::EnrichedOrder;

use crate::tally::OrderedTally;

/// Linear uplift applied to historical quantity.
pub const DEMAND_UPLIFT_PERCENT: u64 = 10;

/// Stock position against predicted demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForecastStatus {
    /// Stock covers predicted demand.
    Good,
    /// Stock is below predicted demand.
    Monitor,
    /// Stock is below half of predicted demand.
    Urgent,
}

impl ForecastStatus {
    pub fn for_stock(current_stock: u32, predicted_demand: u64) -> Self {
        let stock = u64::from(current_stock);
        if stock.saturating_mul(2) < predicted_demand {
            ForecastStatus::Urgent
        } else if stock < predicted_demand {
            ForecastStatus::Monitor
        } else {
            ForecastStatus::Good
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub product_id: ProductId,
    pub product_name: String,
    pub product_sku: String,
    pub total_quantity: u64,
    pub predicted_demand: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_stock: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ForecastStatus>,
}

/// Per-product forecast, in the order products first appear in the batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemandForecast {
    pub entries: Vec<ForecastEntry>,
}

#[derive(Debug, Default)]
struct Group {
    name: String,
    sku: String,
    total: u64,
}

impl DemandForecast {
    /// Group by product id. Name and sku come from the first order seen for
    /// the product.
    pub fn from_orders(orders: &[EnrichedOrder]) -> Self {
        let mut groups: OrderedTally<ProductId, Group> = OrderedTally::new();

        for order in orders {
            let group = groups.slot(&order.product_id());
            if group.name.is_empty() {
                group.name = order.product_name().to_string();
                group.sku = order.sku().to_string();
            }
            group.total += u64::from(order.quantity());
        }

        let entries = groups
            .into_entries()
            .into_iter()
            .map(|(product_id, group)| ForecastEntry {
                product_id,
                product_name: group.name,
                product_sku: group.sku,
                total_quantity: group.total,
                predicted_demand: predicted_demand(group.total),
                current_stock: None,
                status: None,
            })
            .collect();

        Self { entries }
    }

    /// Attach current catalog stock and a status to every entry whose
    /// product is still in `stock`.
    pub fn with_stock(mut self, stock: &HashMap<ProductId, u32>) -> Self {
        for entry in &mut self.entries {
            if let Some(&current) = stock.get(&entry.product_id) {
                entry.current_stock = Some(current);
                entry.status = Some(ForecastStatus::for_stock(current, entry.predicted_demand));
            }
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, product_id: &ProductId) -> Option<&ForecastEntry> {
        self.entries.iter().find(|e| &e.product_id == product_id)
    }
}

/// `round(total × 1.1)`, half rounding up, in integer arithmetic.
pub fn predicted_demand(total_quantity: u64) -> u64 {
    total_quantity
        .saturating_mul(100 + DEMAND_UPLIFT_PERCENT)
        .saturating_add(50)
        / 100
}
