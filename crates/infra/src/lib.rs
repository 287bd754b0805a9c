//! Infrastructure layer: record store, application services, config.
//!
//! Domain crates stay pure; everything here talks to the [`store::RecordStore`]
//! boundary and composes the domain decisions around it.

pub mod catalog;
pub mod config;
pub mod dashboard;
pub mod reports;
pub mod seed;
pub mod store;

pub use catalog::{CatalogError, CatalogResult, CatalogService};
pub use config::{AppConfig, ConfigError};
pub use dashboard::{Dashboard, DashboardLoader, LoadError, LoadState, fetch_dashboard};
pub use reports::{
    DateRange, ExportFormat, Report, ReportError, ReportRequest, ReportRow, ReportSummary,
    ReportType, build_report,
};
pub use store::{InMemoryRecordStore, OrderFilter, RecordStore, StoreError};
