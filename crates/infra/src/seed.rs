//! Demo data for the in-memory store.

use chrono::{DateTime, Duration, Utc};
use tracing::info;
use uuid::Uuid;

use stockpulse_core::{Money, OrderId, OwnerId, ProductId};
use stockpulse_products::Product;
use stockpulse_sales::{OrderRecord, OrderStatus};

use crate::store::{RecordStore, StoreError};

/// Fixed owner the demo catalog is seeded under.
pub fn demo_owner() -> OwnerId {
    OwnerId::from_uuid(Uuid::from_u128(0x0190_a000_0000_7000_8000_0000_0000_0001))
}

// name, sku, unit price in cents, stock, threshold
const DEMO_PRODUCTS: [(&str, &str, u64, u32, u32); 5] = [
    ("Wireless Mouse", "WM-001", 2_499, 45, 10),
    ("USB-C Hub", "HUB-204", 3_999, 6, 15),
    ("Mechanical Keyboard", "KB-310", 8_950, 0, 5),
    ("Laptop Stand", "LS-120", 2_950, 18, 8),
    ("HD Webcam", "CAM-720", 5_400, 3, 10),
];

const DEMO_DAYS: i64 = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub products: usize,
    pub orders: usize,
}

/// Insert the demo catalog and two weeks of orders ending at `now`.
///
/// Order times are deterministic: each product sells on a fixed cadence at
/// a fixed set of hours, so repeated seeds give the same shape.
pub async fn seed_demo(
    store: &dyn RecordStore,
    owner_id: OwnerId,
    now: DateTime<Utc>,
) -> Result<SeedSummary, StoreError> {
    let start = now - Duration::days(DEMO_DAYS);
    let mut summary = SeedSummary {
        products: 0,
        orders: 0,
    };

    for (slot, (name, sku, cents, stock, threshold)) in DEMO_PRODUCTS.into_iter().enumerate() {
        let product = Product {
            id: ProductId::new(),
            owner_id,
            name: name.to_string(),
            sku: sku.to_string(),
            quantity: stock,
            price: Money::from_cents(cents),
            threshold,
            created_at: start,
            updated_at: now,
        };

        let cadence = slot as i64 + 1;
        for day in (0..DEMO_DAYS).step_by(cadence as usize) {
            let hour = 9 + ((day + slot as i64 * 3) % 9);
            let quantity = 1 + ((day as u32 + slot as u32) % 4);
            let created_at = start + Duration::days(day) + Duration::hours(hour);
            store
                .insert_order(OrderRecord {
                    id: OrderId::new(),
                    product_id: product.id,
                    owner_id,
                    quantity,
                    created_at,
                    status: OrderStatus::Completed,
                    total: Some(product.price.times(u64::from(quantity))),
                })
                .await?;
            summary.orders += 1;
        }

        store.insert_product(product).await?;
        summary.products += 1;
    }

    info!(
        owner = %owner_id,
        products = summary.products,
        orders = summary.orders,
        "demo data seeded"
    );
    Ok(summary)
}
