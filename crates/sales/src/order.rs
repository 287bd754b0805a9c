use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockpulse_core::{DomainError, DomainResult, Entity, Money, OrderId, OwnerId, ProductId};
use stockpulse_products::Product;

/// Order status lifecycle.
///
/// Orders placed through the catalog complete immediately; records written
/// by other tools may carry a different status.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    #[default]
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A placed order. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: OrderId,
    pub product_id: ProductId,
    pub owner_id: OwnerId,
    /// Always > 0.
    pub quantity: u32,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub status: OrderStatus,
    /// Order total at placement time. `None` for records that never stored one.
    #[serde(default)]
    pub total: Option<Money>,
}

impl Entity for OrderRecord {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Command: place an order against a catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceOrder {
    pub owner_id: OwnerId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub occurred_at: DateTime<Utc>,
}

/// Outcome of a successful placement: the new order plus the product with
/// its stock already decremented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderPlaced {
    pub order: OrderRecord,
    pub product: Product,
}

impl PlaceOrder {
    /// Decide the placement against the current product state.
    ///
    /// Does not mutate `product`; the caller persists both halves of the
    /// returned [`OrderPlaced`].
    pub fn decide(&self, order_id: OrderId, product: &Product) -> DomainResult<OrderPlaced> {
        if product.id != self.product_id {
            return Err(DomainError::invariant("product_id mismatch"));
        }
        if product.owner_id != self.owner_id {
            return Err(DomainError::not_found());
        }

        let mut updated = product.clone();
        updated.withdraw(self.quantity, self.occurred_at)?;

        let order = OrderRecord {
            id: order_id,
            product_id: self.product_id,
            owner_id: self.owner_id,
            quantity: self.quantity,
            created_at: self.occurred_at,
            status: OrderStatus::Completed,
            total: Some(product.price.times(u64::from(self.quantity))),
        };

        Ok(OrderPlaced {
            order,
            product: updated,
        })
    }
}
