//! Dashboard loader: fetch, enrich, aggregate.
//!
//! [`fetch_dashboard`] is the stateless entry point the HTTP handlers call
//! per request. [`DashboardLoader`] is the state holder for long-lived
//! presentation clients that render a loading/ready/failed view and
//! refresh it in place.
//!
//! The loader owns the published [`LoadState`] for one owner. A load moves
//! the state to `Loading`, then installs either a complete `Ready` dashboard
//! or `Failed`; partial results are never visible. If the load future is
//! dropped mid-fetch the state stays `Loading`.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use stockpulse_analytics::{DemandForecast, MetricsAggregator, MetricsSnapshot};
use stockpulse_core::{OwnerId, ProductId};
use stockpulse_products::{InventoryStats, RestockSuggestion, suggest_restocks};
use stockpulse_sales::enrich;

use crate::store::{OrderFilter, RecordStore, StoreError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("no data available: {0}")]
    Fetch(#[from] StoreError),
}

/// Every view derived from one consistent fetch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub metrics: MetricsSnapshot,
    pub forecast: DemandForecast,
    pub restock_suggestions: Vec<RestockSuggestion>,
    pub stats: InventoryStats,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Loading,
    Ready(Arc<Dashboard>),
    Failed(LoadError),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn dashboard(&self) -> Option<&Dashboard> {
        match self {
            LoadState::Ready(dashboard) => Some(dashboard.as_ref()),
            _ => None,
        }
    }
}

/// Fetch orders and products for `owner_id` and derive every view.
///
/// The aggregator only runs once both fetches have succeeded. Orders are
/// accumulated oldest first, so first-seen ordering and tie-breaks follow
/// placement order.
pub async fn fetch_dashboard(
    store: &dyn RecordStore,
    aggregator: &MetricsAggregator,
    owner_id: OwnerId,
) -> Result<Dashboard, LoadError> {
    let mut orders = store.list_orders(owner_id, OrderFilter::all()).await?;
    // Listings are newest first with ties in reverse insertion order.
    orders.reverse();
    let products = store.list_products(owner_id).await?;

    let enriched = enrich(orders, &products);
    let metrics = aggregator.aggregate(&enriched);

    let stock: HashMap<ProductId, u32> = products.iter().map(|p| (p.id, p.quantity)).collect();
    let forecast = DemandForecast::from_orders(&enriched).with_stock(&stock);

    debug!(
        owner = %owner_id,
        orders = metrics.total_orders,
        products = products.len(),
        "dashboard derived"
    );

    Ok(Dashboard {
        metrics,
        forecast,
        restock_suggestions: suggest_restocks(&products),
        stats: InventoryStats::from_products(&products),
    })
}

pub struct DashboardLoader {
    store: Arc<dyn RecordStore>,
    aggregator: MetricsAggregator,
    owner_id: OwnerId,
    state: RwLock<LoadState>,
    generation: AtomicU64,
}

impl DashboardLoader {
    pub fn new(store: Arc<dyn RecordStore>, aggregator: MetricsAggregator, owner_id: OwnerId) -> Self {
        Self {
            store,
            aggregator,
            owner_id,
            state: RwLock::new(LoadState::Loading),
            generation: AtomicU64::new(0),
        }
    }

    pub fn owner_id(&self) -> OwnerId {
        self.owner_id
    }

    pub async fn state(&self) -> LoadState {
        self.state.read().await.clone()
    }

    /// Run a load and return the state it settled on.
    ///
    /// When loads overlap, only the most recently started one publishes.
    pub async fn load(&self) -> LoadState {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.publish(generation, LoadState::Loading).await;

        let next = match fetch_dashboard(self.store.as_ref(), &self.aggregator, self.owner_id).await {
            Ok(dashboard) => LoadState::Ready(Arc::new(dashboard)),
            Err(e) => {
                warn!(owner = %self.owner_id, error = %e, "dashboard load failed");
                LoadState::Failed(e)
            }
        };

        self.publish(generation, next.clone()).await;
        next
    }

    async fn publish(&self, generation: u64, next: LoadState) {
        let mut state = self.state.write().await;
        if self.generation.load(Ordering::SeqCst) == generation {
            *state = next;
        }
    }
}
