//! Metrics aggregation over enriched orders.
//!
//! One pass over the batch accumulates per-product totals (keyed by joined
//! product name), the hourly histogram and the set of calendar days seen.
//! Everything else is derived from those accumulators.

use std::collections::HashSet;

use chrono::{FixedOffset, NaiveDate, Offset, Timelike, Utc};
use serde::{Deserialize, Serialize};

use stockpulse_core::{Money, ValueObject};
use stockpulse_sales::EnrichedOrder;

use crate::tally::OrderedTally;

/// Number of buckets in [`MetricsSnapshot::orders_by_hour`].
pub const HOURS_PER_DAY: usize = 24;

/// `most_popular_product` for an empty batch.
pub const NO_PRODUCT: &str = "None";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRevenue {
    pub name: String,
    pub revenue: Money,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyCount {
    /// Local hour of day, 0–23.
    pub hour: u8,
    pub count: usize,
}

impl HourlyCount {
    /// Axis label, e.g. `"9:00"`.
    pub fn label(&self) -> String {
        format!("{}:00", self.hour)
    }
}

/// Units sold against the stock level last seen for that product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockVsSales {
    pub name: String,
    pub sold: u64,
    /// Stock snapshot carried by the last order of this product in the batch.
    pub stock: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesVelocity {
    pub name: String,
    /// Units per day, rounded to 2 decimals.
    pub velocity: f64,
}

/// Derived views over one batch of orders.
///
/// Immutable once built; a fresh snapshot is produced for every fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    pub total_revenue: Money,
    pub total_orders: usize,
    pub most_popular_product: String,
    pub revenue_by_product: Vec<ProductRevenue>,
    /// Always [`HOURS_PER_DAY`] entries, hours 0→23.
    pub orders_by_hour: Vec<HourlyCount>,
    pub stock_vs_sales: Vec<StockVsSales>,
    pub sales_velocity: Vec<SalesVelocity>,
    /// Distinct calendar days in the batch, floored at 1. Shared denominator
    /// of every `sales_velocity` entry.
    pub days_observed: usize,
}

impl ValueObject for MetricsSnapshot {}

impl MetricsSnapshot {
    pub fn is_empty(&self) -> bool {
        self.total_orders == 0
    }

    pub fn orders_in_hour(&self, hour: u8) -> usize {
        self.orders_by_hour
            .get(usize::from(hour))
            .map(|h| h.count)
            .unwrap_or(0)
    }

    pub fn velocity_of(&self, name: &str) -> Option<f64> {
        self.sales_velocity
            .iter()
            .find(|v| v.name == name)
            .map(|v| v.velocity)
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct ProductTotals {
    sold: u64,
    revenue: Money,
    last_stock: u32,
}

/// Builds [`MetricsSnapshot`]s.
///
/// Hour-of-day and calendar-day boundaries are taken in `offset`, the
/// dashboard's reporting time zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsAggregator {
    offset: FixedOffset,
}

impl Default for MetricsAggregator {
    fn default() -> Self {
        Self::utc()
    }
}

impl MetricsAggregator {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn utc() -> Self {
        Self::new(Utc.fix())
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Aggregate a batch. Never fails; an empty batch yields the zero
    /// snapshot (24 empty hour buckets, `"None"` as most popular product).
    pub fn aggregate(&self, orders: &[EnrichedOrder]) -> MetricsSnapshot {
        let mut products: OrderedTally<String, ProductTotals> = OrderedTally::new();
        let mut hourly = [0usize; HOURS_PER_DAY];
        let mut days: HashSet<NaiveDate> = HashSet::new();
        let mut total_revenue = Money::ZERO;

        for order in orders {
            let revenue = order.revenue();
            total_revenue = total_revenue + revenue;

            let totals = products.slot(order.product_name());
            totals.sold += u64::from(order.quantity());
            totals.revenue = totals.revenue + revenue;
            totals.last_stock = order.stock_quantity();

            let local = order.created_at().with_timezone(&self.offset);
            // hour() is always < 24
            if let Some(bucket) = hourly.get_mut(local.hour() as usize) {
                *bucket += 1;
            }
            days.insert(local.date_naive());
        }

        let most_popular_product = most_popular(&products);
        let days_observed = days.len().max(1);

        let orders_by_hour = hourly
            .iter()
            .enumerate()
            .map(|(hour, &count)| HourlyCount {
                hour: hour as u8,
                count,
            })
            .collect();

        let entries = products.into_entries();
        let mut revenue_by_product = Vec::with_capacity(entries.len());
        let mut stock_vs_sales = Vec::with_capacity(entries.len());
        let mut sales_velocity = Vec::with_capacity(entries.len());

        for (name, totals) in entries {
            revenue_by_product.push(ProductRevenue {
                name: name.clone(),
                revenue: totals.revenue,
            });
            stock_vs_sales.push(StockVsSales {
                name: name.clone(),
                sold: totals.sold,
                stock: totals.last_stock,
            });
            sales_velocity.push(SalesVelocity {
                name,
                velocity: round_2dp(totals.sold as f64 / days_observed as f64),
            });
        }

        MetricsSnapshot {
            total_revenue,
            total_orders: orders.len(),
            most_popular_product,
            revenue_by_product,
            orders_by_hour,
            stock_vs_sales,
            sales_velocity,
            days_observed,
        }
    }
}

/// Highest summed quantity; the earliest-seen product wins ties.
fn most_popular(products: &OrderedTally<String, ProductTotals>) -> String {
    let mut best: Option<(&String, u64)> = None;
    for (name, totals) in products.iter() {
        match best {
            Some((_, sold)) if totals.sold <= sold => {}
            _ => best = Some((name, totals.sold)),
        }
    }
    best.map(|(name, _)| name.clone())
        .unwrap_or_else(|| NO_PRODUCT.to_string())
}

fn round_2dp(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
