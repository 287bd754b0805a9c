//! Product catalog domain module.
//!
//! Business rules for catalog products, restock suggestions and inventory
//! stat cards, implemented as deterministic domain logic (no IO, no HTTP, no
//! storage).

pub mod product;
pub mod restock;
pub mod stats;

pub use product::{NewProduct, Product, ProductPatch};
pub use restock::{
    MIN_RESTOCK_QUANTITY, RestockSuggestion, RestockUrgency, suggest_restocks, suggested_restock,
};
pub use stats::InventoryStats;
