//! Fault injection middleware.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::handlers::ApiError;
use crate::FaultInjector;

/// Short-circuits with a 500 when the injector fires.
///
/// Runs ahead of every extractor, so a triggered fault bypasses body
/// parsing and validation as well as the store.
pub async fn fault_middleware(
    State(faults): State<FaultInjector>,
    request: Request<Body>,
    next: Next,
) -> Response {
    // Health checks are never faulted
    if request.uri().path() == "/health" {
        return next.run(request).await;
    }

    if let Err(err) = faults.check() {
        tracing::warn!(
            method = %request.method(),
            path = %request.uri().path(),
            "injected upstream failure"
        );
        return ApiError(err).into_response();
    }

    next.run(request).await
}
