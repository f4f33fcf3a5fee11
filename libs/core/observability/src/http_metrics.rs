//! Per-route HTTP metrics.
//!
//! Every series is keyed by the matched route template (`/users/{id}`), never
//! the raw URI, so ids in paths do not create new series.

use axum::{
    body::Body,
    extract::MatchedPath,
    http::{Request, Response, StatusCode},
    middleware::Next,
};
use metrics::{counter, histogram};
use std::time::Instant;

pub const REQUESTS_TOTAL: &str = "http_requests_total";
pub const REQUEST_DURATION_SECONDS: &str = "http_request_duration_seconds";
pub const REQUEST_ERRORS_TOTAL: &str = "http_requests_errors_total";

/// Route label used when a request reaches the middleware without a match.
pub const UNMATCHED_ROUTE: &str = "unmatched";

/// Records request count, latency and failures for the matched route.
///
/// - `http_requests_total{method, route, status}`
/// - `http_request_duration_seconds{method, route}`
/// - `http_requests_errors_total{method, route, class}` where `class` is
///   `client` for 4xx and `server` for 5xx
///
/// Install with `route_layer` so only routed requests are measured:
///
/// ```rust,ignore
/// let api = Router::new()
///     .nest("/users", users::router(service))
///     .route_layer(middleware::from_fn(metrics_middleware));
/// ```
pub async fn metrics_middleware(
    matched_path: Option<MatchedPath>,
    request: Request<Body>,
    next: Next,
) -> Response<Body> {
    let start = Instant::now();
    let method = request.method().as_str().to_owned();
    let route = route_label(matched_path.as_ref());

    let response = next.run(request).await;
    let status = response.status();

    counter!(
        REQUESTS_TOTAL,
        "method" => method.clone(),
        "route" => route.clone(),
        "status" => status.as_u16().to_string()
    )
    .increment(1);

    histogram!(
        REQUEST_DURATION_SECONDS,
        "method" => method.clone(),
        "route" => route.clone()
    )
    .record(start.elapsed().as_secs_f64());

    if let Some(class) = error_class(status) {
        counter!(
            REQUEST_ERRORS_TOTAL,
            "method" => method,
            "route" => route,
            "class" => class
        )
        .increment(1);
    }

    response
}

fn route_label(matched_path: Option<&MatchedPath>) -> String {
    matched_path
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| UNMATCHED_ROUTE.to_owned())
}

fn error_class(status: StatusCode) -> Option<&'static str> {
    if status.is_client_error() {
        Some("client")
    } else if status.is_server_error() {
        Some("server")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_class() {
        assert_eq!(error_class(StatusCode::OK), None);
        assert_eq!(error_class(StatusCode::NO_CONTENT), None);
        assert_eq!(error_class(StatusCode::BAD_REQUEST), Some("client"));
        assert_eq!(error_class(StatusCode::REQUEST_TIMEOUT), Some("client"));
        assert_eq!(error_class(StatusCode::SERVICE_UNAVAILABLE), Some("server"));
    }

    #[test]
    fn test_missing_match_uses_placeholder_route() {
        assert_eq!(route_label(None), UNMATCHED_ROUTE);
    }
}
