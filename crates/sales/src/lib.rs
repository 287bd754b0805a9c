//! Sales orders domain module.
//!
//! Order records, order placement rules, and the join of orders with the
//! point-in-time product snapshot that every derived view consumes. Pure
//! domain logic (no IO, no HTTP, no storage).

pub mod enriched;
pub mod order;

pub use enriched::{EnrichedOrder, ProductSnapshot, UNKNOWN_PRODUCT, enrich};
pub use order::{OrderPlaced, OrderRecord, OrderStatus, PlaceOrder};
