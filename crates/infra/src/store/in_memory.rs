use std::collections::HashMap;
use std::sync::RwLock;

use stockpulse_core::{OwnerId, ProductId};
use stockpulse_products::Product;
use stockpulse_sales::OrderRecord;

use super::{OrderFilter, RecordStore, StoreError};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
struct ProductKey {
    owner_id: OwnerId,
    product_id: ProductId,
}

impl ProductKey {
    fn of(product: &Product) -> Self {
        Self {
            owner_id: product.owner_id,
            product_id: product.id,
        }
    }
}

/// In-memory owner-scoped record store.
///
/// Intended for tests/dev and the demo seed. Orders are append-only.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    products: RwLock<HashMap<ProductKey, Product>>,
    orders: RwLock<HashMap<OwnerId, Vec<OrderRecord>>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> StoreError {
    StoreError::Unavailable("lock poisoned".to_string())
}

fn product_not_found(product_id: ProductId) -> StoreError {
    StoreError::NotFound(format!("product {product_id}"))
}

#[async_trait::async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn list_products(&self, owner_id: OwnerId) -> Result<Vec<Product>, StoreError> {
        let map = self.products.read().map_err(|_| poisoned())?;

        let mut products: Vec<Product> = map
            .iter()
            .filter(|(k, _)| k.owner_id == owner_id)
            .map(|(_, p)| p.clone())
            .collect();
        products.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.as_uuid().cmp(a.id.as_uuid()))
        });
        Ok(products)
    }

    async fn get_product(
        &self,
        owner_id: OwnerId,
        product_id: ProductId,
    ) -> Result<Product, StoreError> {
        let map = self.products.read().map_err(|_| poisoned())?;
        map.get(&ProductKey {
            owner_id,
            product_id,
        })
        .cloned()
        .ok_or_else(|| product_not_found(product_id))
    }

    async fn insert_product(&self, product: Product) -> Result<(), StoreError> {
        let mut map = self.products.write().map_err(|_| poisoned())?;
        let key = ProductKey::of(&product);
        if map.contains_key(&key) {
            return Err(StoreError::Backend(format!(
                "product {} already exists",
                product.id
            )));
        }
        map.insert(key, product);
        Ok(())
    }

    async fn update_product(&self, product: Product) -> Result<(), StoreError> {
        let mut map = self.products.write().map_err(|_| poisoned())?;
        match map.get_mut(&ProductKey::of(&product)) {
            Some(existing) => {
                *existing = product;
                Ok(())
            }
            None => Err(product_not_found(product.id)),
        }
    }

    async fn delete_product(
        &self,
        owner_id: OwnerId,
        product_id: ProductId,
    ) -> Result<(), StoreError> {
        let mut map = self.products.write().map_err(|_| poisoned())?;
        map.remove(&ProductKey {
            owner_id,
            product_id,
        })
        .map(|_| ())
        .ok_or_else(|| product_not_found(product_id))
    }

    async fn list_orders(
        &self,
        owner_id: OwnerId,
        filter: OrderFilter,
    ) -> Result<Vec<OrderRecord>, StoreError> {
        let map = self.orders.read().map_err(|_| poisoned())?;

        let mut orders: Vec<OrderRecord> = map
            .get(&owner_id)
            .map(|orders| {
                orders
                    .iter()
                    .filter(|o| filter.matches(o.created_at))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        // Stable sort: equal timestamps keep reverse insertion order.
        orders.reverse();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    async fn insert_order(&self, order: OrderRecord) -> Result<(), StoreError> {
        let mut map = self.orders.write().map_err(|_| poisoned())?;
        map.entry(order.owner_id).or_default().push(order);
        Ok(())
    }
}
