use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockpulse_core::{Money, OrderId, ProductId};
use stockpulse_infra::{DateRange, ExportFormat, ReportError, ReportRequest, ReportType};
use stockpulse_sales::{EnrichedOrder, OrderStatus};

use crate::app::errors;

// -------------------------
// Request DTOs
// -------------------------

// Product create/update bodies deserialize straight into `NewProduct` and
// `ProductPatch`; amounts are integer cents.

#[derive(Debug, Deserialize)]
pub struct PlaceOrderRequest {
    pub product_id: ProductId,
    pub quantity: u32,
}

#[derive(Debug, Deserialize)]
pub struct RestockRequest {
    pub quantity: u32,
}

#[derive(Debug, Default, Deserialize)]
pub struct RangeQuery {
    pub range: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    #[serde(rename = "type")]
    pub report_type: Option<String>,
    pub range: Option<String>,
    pub format: Option<String>,
}

// -------------------------
// Response DTOs
// -------------------------

/// An order as listed to the dashboard, with its joined product fields.
#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub id: OrderId,
    pub product_id: ProductId,
    pub product_name: String,
    pub product_sku: String,
    pub quantity: u32,
    pub status: OrderStatus,
    pub total: Money,
    pub created_at: DateTime<Utc>,
}

impl From<&EnrichedOrder> for OrderResponse {
    fn from(order: &EnrichedOrder) -> Self {
        Self {
            id: order.order.id,
            product_id: order.product_id(),
            product_name: order.product_name().to_string(),
            product_sku: order.sku().to_string(),
            quantity: order.quantity(),
            status: order.order.status,
            total: order.total(),
            created_at: order.created_at(),
        }
    }
}

// -------------------------
// Parsing helpers
// -------------------------

pub fn parse_product_id(s: &str) -> Result<ProductId, axum::response::Response> {
    s.parse()
        .map_err(|_| errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id"))
}

/// Missing range means all time.
pub fn parse_range(raw: Option<&str>) -> Result<DateRange, axum::response::Response> {
    match raw {
        None | Some("") => Ok(DateRange::All),
        Some(s) => s.parse().map_err(errors::report_error_to_response),
    }
}

/// `type` and `range` are required; `format` defaults to CSV.
pub fn parse_report_query(q: &ReportQuery) -> Result<ReportRequest, axum::response::Response> {
    let missing = |field: &str| {
        errors::json_error(
            StatusCode::BAD_REQUEST,
            "invalid_query",
            format!("{field} is required"),
        )
    };

    let report_type: ReportType = q
        .report_type
        .as_deref()
        .ok_or_else(|| missing("type"))?
        .parse()
        .map_err(errors::report_error_to_response)?;
    let range: DateRange = q
        .range
        .as_deref()
        .ok_or_else(|| missing("range"))?
        .parse()
        .map_err(errors::report_error_to_response)?;
    let format = match q.format.as_deref() {
        None | Some("") => ExportFormat::Csv,
        Some(s) => s
            .parse()
            .map_err(|e: ReportError| errors::report_error_to_response(e))?,
    };

    Ok(ReportRequest {
        report_type,
        range,
        format,
    })
}
