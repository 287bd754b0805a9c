use axum::{routing::get, Router};

pub mod analytics;
pub mod orders;
pub mod products;
pub mod reports;
pub mod system;

/// Router for all owner-scoped endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .nest("/products", products::router())
        .nest("/orders", orders::router())
        .merge(analytics::router())
        .route("/reports", get(reports::generate_report))
}
