//! Owner-scoped record store boundary.
//!
//! The dashboard never talks to a database directly; it goes through
//! [`RecordStore`], which makes no storage assumptions. Every call is async
//! and fallible, and callers must handle failure.

pub mod in_memory;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;

use stockpulse_core::{OwnerId, ProductId};
use stockpulse_products::Product;
use stockpulse_sales::OrderRecord;

pub use in_memory::InMemoryRecordStore;

/// Record store operation error.
///
/// These are infrastructure failures, as opposed to the deterministic
/// domain failures carried by `DomainError`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("record not found: {0}")]
    NotFound(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store backend error: {0}")]
    Backend(String),
}

/// Time window applied to order queries. `from` is inclusive, `to` exclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderFilter {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl OrderFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn since(from: DateTime<Utc>) -> Self {
        Self {
            from: Some(from),
            to: None,
        }
    }

    pub fn between(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }

    pub fn matches(&self, at: DateTime<Utc>) -> bool {
        self.from.is_none_or(|from| at >= from) && self.to.is_none_or(|to| at < to)
    }
}

/// Async, owner-scoped access to products and orders.
///
/// Listings are returned newest first. Implementations must never leak
/// records across owners.
#[async_trait::async_trait]
pub trait RecordStore: Send + Sync {
    async fn list_products(&self, owner_id: OwnerId) -> Result<Vec<Product>, StoreError>;

    /// `StoreError::NotFound` if the product does not exist for this owner.
    async fn get_product(
        &self,
        owner_id: OwnerId,
        product_id: ProductId,
    ) -> Result<Product, StoreError>;

    async fn insert_product(&self, product: Product) -> Result<(), StoreError>;

    /// Replace an existing product. `StoreError::NotFound` if it is missing.
    async fn update_product(&self, product: Product) -> Result<(), StoreError>;

    async fn delete_product(
        &self,
        owner_id: OwnerId,
        product_id: ProductId,
    ) -> Result<(), StoreError>;

    async fn list_orders(
        &self,
        owner_id: OwnerId,
        filter: OrderFilter,
    ) -> Result<Vec<OrderRecord>, StoreError>;

    async fn insert_order(&self, order: OrderRecord) -> Result<(), StoreError>;
}

#[async_trait::async_trait]
impl<S> RecordStore for Arc<S>
where
    S: RecordStore + ?Sized,
{
    async fn list_products(&self, owner_id: OwnerId) -> Result<Vec<Product>, StoreError> {
        (**self).list_products(owner_id).await
    }

    async fn get_product(
        &self,
        owner_id: OwnerId,
        product_id: ProductId,
    ) -> Result<Product, StoreError> {
        (**self).get_product(owner_id, product_id).await
    }

    async fn insert_product(&self, product: Product) -> Result<(), StoreError> {
        (**self).insert_product(product).await
    }

    async fn update_product(&self, product: Product) -> Result<(), StoreError> {
        (**self).update_product(product).await
    }

    async fn delete_product(
        &self,
        owner_id: OwnerId,
        product_id: ProductId,
    ) -> Result<(), StoreError> {
        (**self).delete_product(owner_id, product_id).await
    }

    async fn list_orders(
        &self,
        owner_id: OwnerId,
        filter: OrderFilter,
    ) -> Result<Vec<OrderRecord>, StoreError> {
        (**self).list_orders(owner_id, filter).await
    }

    async fn insert_order(&self, order: OrderRecord) -> Result<(), StoreError> {
        (**self).insert_order(order).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn filter_bounds_are_half_open() {
        let now = Utc::now();
        let filter = OrderFilter::between(now, now + Duration::hours(1));
        assert!(filter.matches(now));
        assert!(filter.matches(now + Duration::minutes(59)));
        assert!(!filter.matches(now + Duration::hours(1)));
        assert!(!filter.matches(now - Duration::seconds(1)));
    }

    #[test]
    fn unbounded_filter_matches_everything() {
        let filter = OrderFilter::all();
        assert!(filter.matches(DateTime::<Utc>::MIN_UTC));
        assert!(filter.matches(Utc::now()));
    }
}
