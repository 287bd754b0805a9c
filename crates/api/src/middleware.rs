use axum::{
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};

use stockpulse_core::OwnerId;

use crate::app::errors::json_error;
use crate::context::OwnerContext;

pub const OWNER_HEADER: &str = "x-owner-id";

pub async fn owner_middleware(
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, Response> {
    let owner_id = extract_owner(req.headers())?;
    req.extensions_mut().insert(OwnerContext::new(owner_id));
    Ok(next.run(req).await)
}

fn extract_owner(headers: &HeaderMap) -> Result<OwnerId, Response> {
    let header = headers.get(OWNER_HEADER).ok_or_else(|| {
        json_error(
            StatusCode::UNAUTHORIZED,
            "missing_owner",
            format!("{OWNER_HEADER} header is required"),
        )
    })?;

    header
        .to_str()
        .ok()
        .map(str::trim)
        .and_then(|v| v.parse::<OwnerId>().ok())
        .ok_or_else(|| {
            json_error(
                StatusCode::BAD_REQUEST,
                "invalid_owner",
                format!("{OWNER_HEADER} must be a UUID"),
            )
        })
}
