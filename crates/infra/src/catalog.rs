//! Catalog application service: product CRUD, order placement and restock.
//!
//! Decisions are made by the pure domain types (`NewProduct`, `ProductPatch`,
//! `PlaceOrder`); this module loads state from the [`RecordStore`], applies
//! the decision, and persists the outcome.

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{info, warn};

use stockpulse_core::{DomainError, OrderId, OwnerId, ProductId};
use stockpulse_products::{NewProduct, Product, ProductPatch};
use stockpulse_sales::{EnrichedOrder, OrderRecord, PlaceOrder, enrich};

use crate::store::{OrderFilter, RecordStore, StoreError};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

pub struct CatalogService {
    store: Arc<dyn RecordStore>,
    /// Serializes read-decide-write cycles that touch stock levels.
    stock_guard: Mutex<()>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            stock_guard: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    /// Products for `owner_id`, newest first.
    pub async fn list_products(&self, owner_id: OwnerId) -> CatalogResult<Vec<Product>> {
        Ok(self.store.list_products(owner_id).await?)
    }

    pub async fn get_product(
        &self,
        owner_id: OwnerId,
        product_id: ProductId,
    ) -> CatalogResult<Product> {
        Ok(self.store.get_product(owner_id, product_id).await?)
    }

    pub async fn add_product(
        &self,
        owner_id: OwnerId,
        new_product: NewProduct,
    ) -> CatalogResult<Product> {
        let product = new_product.into_product(ProductId::new(), owner_id, Utc::now())?;
        self.store.insert_product(product.clone()).await?;
        info!(owner = %owner_id, product = %product.id, sku = %product.sku, "product added");
        Ok(product)
    }

    pub async fn update_product(
        &self,
        owner_id: OwnerId,
        product_id: ProductId,
        patch: ProductPatch,
    ) -> CatalogResult<Product> {
        if patch.is_empty() {
            return Err(DomainError::validation("update must change at least one field").into());
        }

        let _guard = self.stock_guard.lock().await;
        let mut product = self.store.get_product(owner_id, product_id).await?;
        patch.apply_to(&mut product, Utc::now())?;
        self.store.update_product(product.clone()).await?;
        info!(owner = %owner_id, product = %product_id, "product updated");
        Ok(product)
    }

    pub async fn delete_product(
        &self,
        owner_id: OwnerId,
        product_id: ProductId,
    ) -> CatalogResult<()> {
        let _guard = self.stock_guard.lock().await;
        self.store.delete_product(owner_id, product_id).await?;
        info!(owner = %owner_id, product = %product_id, "product deleted");
        Ok(())
    }

    /// Place an order: the product's stock is decremented, then the order is
    /// recorded with `status = completed` and `total = price × quantity`.
    /// A failed order insert puts the previous stock back.
    pub async fn place_order(
        &self,
        owner_id: OwnerId,
        product_id: ProductId,
        quantity: u32,
    ) -> CatalogResult<OrderRecord> {
        let _guard = self.stock_guard.lock().await;
        let product = self.store.get_product(owner_id, product_id).await?;

        let command = PlaceOrder {
            owner_id,
            product_id,
            quantity,
            occurred_at: Utc::now(),
        };
        let placed = command.decide(OrderId::new(), &product)?;

        self.store.update_product(placed.product).await?;
        if let Err(e) = self.store.insert_order(placed.order.clone()).await {
            warn!(
                owner = %owner_id,
                order = %placed.order.id,
                error = %e,
                "order insert failed, restoring stock"
            );
            if let Err(restore) = self.store.update_product(product).await {
                warn!(
                    owner = %owner_id,
                    product = %product_id,
                    error = %restore,
                    "stock restore failed"
                );
            }
            return Err(e.into());
        }

        info!(
            owner = %owner_id,
            order = %placed.order.id,
            product = %product_id,
            quantity,
            "order placed"
        );
        Ok(placed.order)
    }

    pub async fn restock(
        &self,
        owner_id: OwnerId,
        product_id: ProductId,
        quantity: u32,
    ) -> CatalogResult<Product> {
        let _guard = self.stock_guard.lock().await;
        let mut product = self.store.get_product(owner_id, product_id).await?;
        product.restock(quantity, Utc::now())?;
        self.store.update_product(product.clone()).await?;
        info!(owner = %owner_id, product = %product_id, quantity, "product restocked");
        Ok(product)
    }

    /// Orders in `filter`, newest first, joined with the current catalog.
    pub async fn list_orders(
        &self,
        owner_id: OwnerId,
        filter: OrderFilter,
    ) -> CatalogResult<Vec<EnrichedOrder>> {
        let orders = self.store.list_orders(owner_id, filter).await?;
        let products = self.store.list_products(owner_id).await?;
        Ok(enrich(orders, &products))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryRecordStore;
    use std::sync::atomic::{AtomicBool, Ordering};
    use stockpulse_core::Money;
    use stockpulse_sales::{OrderStatus, UNKNOWN_PRODUCT};

    fn service() -> CatalogService {
        CatalogService::new(Arc::new(InMemoryRecordStore::new()))
    }

    /// Store wrapper whose product updates or order inserts can be made to fail.
    #[derive(Default)]
    struct FailingStore {
        inner: InMemoryRecordStore,
        fail_update: AtomicBool,
        fail_order_insert: AtomicBool,
    }

    #[async_trait::async_trait]
    impl RecordStore for FailingStore {
        async fn list_products(&self, owner_id: OwnerId) -> Result<Vec<Product>, StoreError> {
            self.inner.list_products(owner_id).await
        }

        async fn get_product(
            &self,
            owner_id: OwnerId,
            product_id: ProductId,
        ) -> Result<Product, StoreError> {
            self.inner.get_product(owner_id, product_id).await
        }

        async fn insert_product(&self, product: Product) -> Result<(), StoreError> {
            self.inner.insert_product(product).await
        }

        async fn update_product(&self, product: Product) -> Result<(), StoreError> {
            if self.fail_update.load(Ordering::SeqCst) {
                return Err(StoreError::Unavailable("write timed out".to_string()));
            }
            self.inner.update_product(product).await
        }

        async fn delete_product(
            &self,
            owner_id: OwnerId,
            product_id: ProductId,
        ) -> Result<(), StoreError> {
            self.inner.delete_product(owner_id, product_id).await
        }

        async fn list_orders(
            &self,
            owner_id: OwnerId,
            filter: OrderFilter,
        ) -> Result<Vec<OrderRecord>, StoreError> {
            self.inner.list_orders(owner_id, filter).await
        }

        async fn insert_order(&self, order: OrderRecord) -> Result<(), StoreError> {
            if self.fail_order_insert.load(Ordering::SeqCst) {
                return Err(StoreError::Unavailable("write timed out".to_string()));
            }
            self.inner.insert_order(order).await
        }
    }

    fn widget(quantity: u32) -> NewProduct {
        NewProduct {
            name: "Widget".to_string(),
            sku: "WID-1".to_string(),
            quantity,
            price: Money::from_units(25),
            threshold: 5,
        }
    }

    #[tokio::test]
    async fn add_product_validates_input() {
        let catalog = service();
        let owner = OwnerId::new();

        let mut blank = widget(1);
        blank.name = "   ".to_string();
        match catalog.add_product(owner, blank).await {
            Err(CatalogError::Domain(DomainError::Validation(msg))) => {
                assert_eq!(msg, "name cannot be empty")
            }
            other => panic!("expected validation error, got {other:?}"),
        }

        let added = catalog.add_product(owner, widget(10)).await.unwrap();
        let listed = catalog.list_products(owner).await.unwrap();
        assert_eq!(listed, vec![added]);
    }

    #[tokio::test]
    async fn place_order_records_total_and_decrements_stock() {
        let catalog = service();
        let owner = OwnerId::new();
        let product = catalog.add_product(owner, widget(10)).await.unwrap();

        let order = catalog.place_order(owner, product.id, 4).await.unwrap();
        assert_eq!(order.status, OrderStatus::Completed);
        assert_eq!(order.total, Some(Money::from_units(100)));

        let after = catalog.get_product(owner, product.id).await.unwrap();
        assert_eq!(after.quantity, 6);

        let orders = catalog.list_orders(owner, OrderFilter::all()).await.unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].product_name(), "Widget");
        assert_eq!(orders[0].stock_quantity(), 6);
    }

    #[tokio::test]
    async fn place_order_rejects_overselling_without_side_effects() {
        let catalog = service();
        let owner = OwnerId::new();
        let product = catalog.add_product(owner, widget(3)).await.unwrap();

        match catalog.place_order(owner, product.id, 4).await {
            Err(CatalogError::Domain(DomainError::InvariantViolation(_))) => {}
            other => panic!("expected invariant violation, got {other:?}"),
        }
        match catalog.place_order(owner, product.id, 0).await {
            Err(CatalogError::Domain(DomainError::Validation(_))) => {}
            other => panic!("expected validation error, got {other:?}"),
        }

        assert!(catalog
            .list_orders(owner, OrderFilter::all())
            .await
            .unwrap()
            .is_empty());
        assert_eq!(catalog.get_product(owner, product.id).await.unwrap().quantity, 3);
    }

    #[tokio::test]
    async fn failed_stock_write_records_no_order() {
        let store = Arc::new(FailingStore::default());
        let catalog = CatalogService::new(store.clone());
        let owner = OwnerId::new();
        let product = catalog.add_product(owner, widget(3)).await.unwrap();

        store.fail_update.store(true, Ordering::SeqCst);
        match catalog.place_order(owner, product.id, 3).await {
            Err(CatalogError::Store(StoreError::Unavailable(_))) => {}
            other => panic!("expected Unavailable, got {other:?}"),
        }

        assert!(catalog
            .list_orders(owner, OrderFilter::all())
            .await
            .unwrap()
            .is_empty());
        assert_eq!(catalog.get_product(owner, product.id).await.unwrap().quantity, 3);
    }

    #[tokio::test]
    async fn failed_order_insert_restores_stock() {
        let store = Arc::new(FailingStore::default());
        let catalog = CatalogService::new(store.clone());
        let owner = OwnerId::new();
        let product = catalog.add_product(owner, widget(3)).await.unwrap();

        store.fail_order_insert.store(true, Ordering::SeqCst);
        assert!(matches!(
            catalog.place_order(owner, product.id, 2).await,
            Err(CatalogError::Store(StoreError::Unavailable(_)))
        ));

        assert!(catalog
            .list_orders(owner, OrderFilter::all())
            .await
            .unwrap()
            .is_empty());
        assert_eq!(catalog.get_product(owner, product.id).await.unwrap().quantity, 3);

        store.fail_order_insert.store(false, Ordering::SeqCst);
        catalog.place_order(owner, product.id, 2).await.unwrap();
        assert_eq!(catalog.get_product(owner, product.id).await.unwrap().quantity, 1);
    }

    #[tokio::test]
    async fn place_order_for_unknown_product_is_not_found() {
        let catalog = service();
        match catalog.place_order(OwnerId::new(), ProductId::new(), 1).await {
            Err(CatalogError::Store(StoreError::NotFound(_))) => {}
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn other_owners_cannot_touch_a_product() {
        let catalog = service();
        let owner = OwnerId::new();
        let product = catalog.add_product(owner, widget(10)).await.unwrap();

        let intruder = OwnerId::new();
        assert!(catalog.restock(intruder, product.id, 5).await.is_err());
        assert!(catalog.delete_product(intruder, product.id).await.is_err());
        assert_eq!(catalog.get_product(owner, product.id).await.unwrap().quantity, 10);
    }

    #[tokio::test]
    async fn restock_adds_to_stock() {
        let catalog = service();
        let owner = OwnerId::new();
        let product = catalog.add_product(owner, widget(2)).await.unwrap();

        let restocked = catalog.restock(owner, product.id, 18).await.unwrap();
        assert_eq!(restocked.quantity, 20);

        assert!(matches!(
            catalog.restock(owner, product.id, 0).await,
            Err(CatalogError::Domain(DomainError::Validation(_)))
        ));
    }

    #[tokio::test]
    async fn update_product_applies_patch() {
        let catalog = service();
        let owner = OwnerId::new();
        let product = catalog.add_product(owner, widget(2)).await.unwrap();

        let patch = ProductPatch {
            price: Some(Money::from_units(30)),
            threshold: Some(8),
            ..ProductPatch::default()
        };
        let updated = catalog.update_product(owner, product.id, patch).await.unwrap();
        assert_eq!(updated.price, Money::from_units(30));
        assert_eq!(updated.threshold, 8);
        assert_eq!(updated.name, "Widget");

        assert!(matches!(
            catalog
                .update_product(owner, product.id, ProductPatch::default())
                .await,
            Err(CatalogError::Domain(DomainError::Validation(_)))
        ));
    }

    #[tokio::test]
    async fn deleted_products_leave_unknown_orders() {
        let catalog = service();
        let owner = OwnerId::new();
        let product = catalog.add_product(owner, widget(5)).await.unwrap();
        catalog.place_order(owner, product.id, 1).await.unwrap();
        catalog.delete_product(owner, product.id).await.unwrap();

        let orders = catalog.list_orders(owner, OrderFilter::all()).await.unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].product_name(), UNKNOWN_PRODUCT);
        assert_eq!(orders[0].total(), Money::from_units(25));
    }

    #[tokio::test]
    async fn concurrent_orders_never_oversell() {
        let catalog = Arc::new(service());
        let owner = OwnerId::new();
        let product = catalog.add_product(owner, widget(5)).await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..10 {
            let catalog = Arc::clone(&catalog);
            handles.push(tokio::spawn(async move {
                catalog.place_order(owner, product.id, 1).await.is_ok()
            }));
        }

        let mut placed = 0;
        for handle in handles {
            if handle.await.unwrap() {
                placed += 1;
            }
        }
        assert_eq!(placed, 5);
        assert_eq!(catalog.get_product(owner, product.id).await.unwrap().quantity, 0);
    }
}
