//! Error detail disclosure
//!
//! [`HttpAppError`](crate::error::HttpAppError) renders a body without the
//! error chain and attaches the detailed [`ErrorResponse`] to the response
//! extensions. Outside production this middleware swaps the detailed body in.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::ErrorResponse;

pub async fn error_details_middleware(
    State(is_production): State<bool>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;
    match response.extensions_mut().remove::<ErrorResponse>() {
        Some(detailed) if !is_production => {
            let (parts, _) = response.into_parts();
            (parts, Json(detailed)).into_response()
        }
        _ => response,
    }
}
