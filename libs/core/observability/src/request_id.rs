//! `X-Request-Id` assignment and propagation.

use axum::{Router, middleware};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};

use crate::request_logging::request_logging_middleware;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Wraps a fully assembled router with request-id and request-logging layers.
///
/// An inbound `X-Request-Id` is kept as is; otherwise a UUID v4 is generated.
/// The id is copied onto every response, including 404s, timeouts and
/// errors produced by inner layers. Call this last so nothing sits outside it.
pub fn with_request_tracking(router: Router) -> Router {
    router
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
