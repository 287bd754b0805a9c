use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;

use stockpulse_infra::build_report;

use crate::app::{dto, errors, services::AppServices};
use crate::context::OwnerContext;

/// `GET /reports?type=&range=&format=`: export rows plus summary.
pub async fn generate_report(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<OwnerContext>,
    Query(query): Query<dto::ReportQuery>,
) -> axum::response::Response {
    let request = match dto::parse_report_query(&query) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let now = Utc::now();
    let offset = services.utc_offset();
    let filter = request.range.order_filter(now, offset);

    let orders = match services.catalog.list_orders(owner.owner_id(), filter).await {
        Ok(v) => v,
        Err(e) => return errors::catalog_error_to_response(e),
    };

    match build_report(&request, &orders, now, offset) {
        Ok(report) => {
            tracing::info!(
                owner = %owner.owner_id(),
                file = %report.file_name,
                rows = report.rows.len(),
                "report generated"
            );
            (StatusCode::OK, Json(report)).into_response()
        }
        Err(e) => errors::report_error_to_response(e),
    }
}
