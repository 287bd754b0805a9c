use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use stockpulse_infra::{Dashboard, LoadError, fetch_dashboard};
use stockpulse_products::suggest_restocks;

use crate::app::{errors, services::AppServices};
use crate::context::OwnerContext;

pub fn router() -> Router {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/analytics", get(analytics))
        .route("/forecast", get(forecast))
        .route("/restock-suggestions", get(restock_suggestions))
}

async fn load(services: &AppServices, owner: OwnerContext) -> Result<Dashboard, LoadError> {
    fetch_dashboard(services.store(), &services.aggregator, owner.owner_id()).await
}

/// Every derived view from one fetch.
pub async fn dashboard(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<OwnerContext>,
) -> axum::response::Response {
    match load(&services, owner).await {
        Ok(dashboard) => (StatusCode::OK, Json(dashboard)).into_response(),
        Err(e) => errors::load_error_to_response(e),
    }
}

pub async fn analytics(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<OwnerContext>,
) -> axum::response::Response {
    match load(&services, owner).await {
        Ok(dashboard) => (StatusCode::OK, Json(dashboard.metrics)).into_response(),
        Err(e) => errors::load_error_to_response(e),
    }
}

pub async fn forecast(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<OwnerContext>,
) -> axum::response::Response {
    match load(&services, owner).await {
        Ok(dashboard) => (StatusCode::OK, Json(dashboard.forecast)).into_response(),
        Err(e) => errors::load_error_to_response(e),
    }
}

pub async fn restock_suggestions(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<OwnerContext>,
) -> axum::response::Response {
    match services.catalog.list_products(owner.owner_id()).await {
        Ok(products) => {
            let items = suggest_restocks(&products);
            (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
        }
        Err(e) => errors::catalog_error_to_response(e),
    }
}
