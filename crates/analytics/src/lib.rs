//! `stockpulse-analytics`
//!
//! **Responsibility:** derived views over a batch of enriched orders.
//!
//! - Every view is recomputed from scratch from the batch it is given.
//! - Nothing here performs IO, holds state between calls, or fails: missing
//!   join data is defaulted upstream by `EnrichedOrder`.
//! - Per-product views keep first-seen order; ties never depend on hashing.

pub mod aggregator;
pub mod forecast;
mod tally;

pub use aggregator::{
    HOURS_PER_DAY, HourlyCount, MetricsAggregator, MetricsSnapshot, NO_PRODUCT, ProductRevenue,
    SalesVelocity, StockVsSales,
};
pub use forecast::{
    DEMAND_UPLIFT_PERCENT, DemandForecast, ForecastEntry, ForecastStatus, predicted_demand,
};
