use std::sync::Arc;

use chrono::{FixedOffset, Utc};

use stockpulse_analytics::MetricsAggregator;
use stockpulse_infra::{
    AppConfig, CatalogService, InMemoryRecordStore, RecordStore, StoreError, seed,
};

/// Everything the handlers need, shared behind an `Arc`.
pub struct AppServices {
    pub catalog: CatalogService,
    pub aggregator: MetricsAggregator,
}

impl AppServices {
    pub fn new(store: Arc<dyn RecordStore>, utc_offset: FixedOffset) -> Self {
        Self {
            catalog: CatalogService::new(store),
            aggregator: MetricsAggregator::new(utc_offset),
        }
    }

    /// Empty in-memory store (tests/dev).
    pub fn in_memory(utc_offset: FixedOffset) -> Self {
        Self::new(Arc::new(InMemoryRecordStore::new()), utc_offset)
    }

    pub fn store(&self) -> &dyn RecordStore {
        self.catalog.store().as_ref()
    }

    pub fn utc_offset(&self) -> FixedOffset {
        self.aggregator.offset()
    }
}

/// Wire services from configuration, seeding demo data when asked to.
pub async fn build_services(config: &AppConfig) -> Result<AppServices, StoreError> {
    let services = AppServices::in_memory(config.utc_offset);

    if config.seed_demo {
        let owner = seed::demo_owner();
        seed::seed_demo(services.store(), owner, Utc::now()).await?;
        tracing::info!(owner = %owner, "demo owner available");
    }

    Ok(services)
}
