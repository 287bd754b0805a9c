use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use chrono::Utc;

use crate::app::{dto, errors, services::AppServices};
use crate::context::OwnerContext;

pub fn router() -> Router {
    Router::new().route("/", post(place_order).get(list_orders))
}

pub async fn place_order(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<OwnerContext>,
    Json(body): Json<dto::PlaceOrderRequest>,
) -> axum::response::Response {
    match services
        .catalog
        .place_order(owner.owner_id(), body.product_id, body.quantity)
        .await
    {
        Ok(order) => (StatusCode::CREATED, Json(order)).into_response(),
        Err(e) => errors::catalog_error_to_response(e),
    }
}

/// Orders newest first, optionally limited to a reporting range.
pub async fn list_orders(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<OwnerContext>,
    Query(query): Query<dto::RangeQuery>,
) -> axum::response::Response {
    let range = match dto::parse_range(query.range.as_deref()) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let filter = range.order_filter(Utc::now(), services.utc_offset());

    match services.catalog.list_orders(owner.owner_id(), filter).await {
        Ok(orders) => {
            let items = orders
                .iter()
                .map(dto::OrderResponse::from)
                .collect::<Vec<_>>();
            (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
        }
        Err(e) => errors::catalog_error_to_response(e),
    }
}
