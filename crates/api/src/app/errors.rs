use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use stockpulse_core::DomainError;
use stockpulse_infra::{CatalogError, LoadError, ReportError, StoreError};

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::InvariantViolation(msg) => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "invariant_violation", msg)
        }
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
    }
}

pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    match err {
        StoreError::NotFound(msg) => json_error(StatusCode::NOT_FOUND, "not_found", msg),
        StoreError::Unavailable(msg) => {
            tracing::warn!(error = %msg, "record store unavailable");
            json_error(StatusCode::SERVICE_UNAVAILABLE, "store_unavailable", msg)
        }
        StoreError::Backend(msg) => {
            tracing::error!(error = %msg, "record store backend error");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", msg)
        }
    }
}

pub fn catalog_error_to_response(err: CatalogError) -> axum::response::Response {
    match err {
        CatalogError::Domain(e) => domain_error_to_response(e),
        CatalogError::Store(e) => store_error_to_response(e),
    }
}

pub fn load_error_to_response(err: LoadError) -> axum::response::Response {
    json_error(StatusCode::SERVICE_UNAVAILABLE, "no_data", err.to_string())
}

pub fn report_error_to_response(err: ReportError) -> axum::response::Response {
    match err {
        ReportError::NoOrders => json_error(StatusCode::NOT_FOUND, "no_orders", err.to_string()),
        ReportError::UnknownReportType(_)
        | ReportError::UnknownDateRange(_)
        | ReportError::UnknownFormat(_) => {
            json_error(StatusCode::BAD_REQUEST, "invalid_query", err.to_string())
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
