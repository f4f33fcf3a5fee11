use axum::{Router, middleware, routing::get};
use axum_helpers::server::{create_router, health_router};
use domain_users::{PgUserRepository, UserService, handlers as users};
use observability::{metrics_handler, metrics_middleware, with_request_tracking};

use crate::openapi::ApiDoc;
use crate::state::AppState;

pub mod health;

/// User API routes backed by PostgreSQL.
pub fn routes(state: &AppState) -> Router {
    let service = UserService::new(PgUserRepository::new(state.db.clone()));
    Router::new().nest("/users", users::router(service))
}

/// Creates a router with the /ready endpoint that pings the database.
pub fn ready_router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}

/// Assembles the full application around already-stateful API routes.
///
/// Metrics are recorded per matched API route; request-id and request
/// logging wrap everything, so operational endpoints and 404s carry an id too.
pub fn app(api_routes: Router, state: AppState) -> Router {
    let api_routes = api_routes.route_layer(middleware::from_fn(metrics_middleware));

    let router = create_router::<ApiDoc>(api_routes, state.config.server.request_timeout)
        .merge(health_router(state.config.app))
        .route("/metrics", get(metrics_handler))
        .merge(ready_router(state));

    with_request_tracking(router)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Environment};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use core_config::{AppInfo, server::ServerConfig};
    use database::postgres::PostgresConfig;
    use domain_users::InMemoryUserRepository;
    use http_body_util::BodyExt;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn test_app() -> Router {
        let state = AppState {
            config: Config {
                app: AppInfo {
                    name: "user_age_api",
                    version: "0.1.0",
                },
                database: PostgresConfig::new("postgres://unused"),
                server: ServerConfig::default(),
                environment: Environment::Development,
            },
            db: MockDatabase::new(DatabaseBackend::Postgres).into_connection(),
        };

        let service = UserService::new(InMemoryUserRepository::new());
        let api_routes = Router::new().nest("/users", users::router(service));
        app(api_routes, state)
    }

    async fn json_body(body: Body) -> Value {
        let bytes = body.collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_users_route_echoes_request_id() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/users")
                    .header("content-type", "application/json")
                    .header("x-request-id", "req-42")
                    .body(Body::from(
                        json!({"name": "Alice", "dob": "1990-05-10"}).to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers()["x-request-id"], "req-42");
        let body = json_body(response.into_body()).await;
        assert!(body.get("age").is_none());
    }

    #[tokio::test]
    async fn test_error_responses_get_generated_request_id() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/users/not-a-number")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let response = test_app()
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().contains_key("x-request-id"));
        let body = json_body(response.into_body()).await;
        assert_eq!(body["error"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_health_reports_app_info() {
        let response = test_app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response.into_body()).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["name"], "user_age_api");
    }

    #[tokio::test]
    async fn test_metrics_are_labelled_by_matched_route() {
        observability::init_metrics().unwrap();

        let response = test_app()
            .oneshot(Request::builder().uri("/users/77").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let rendered = metrics_handler().await;
        let series = |name: &str| {
            rendered
                .lines()
                .filter(|line| line.starts_with(name))
                .filter(|line| line.contains(r#"route="/users/{id}""#))
                .map(str::to_owned)
                .collect::<Vec<_>>()
        };

        let totals = series("http_requests_total{");
        assert!(totals.iter().any(|l| l.contains(r#"status="404""#)), "{rendered}");
        assert!(!rendered.contains(r#"route="/users/77""#));

        let errors = series("http_requests_errors_total{");
        assert!(errors.iter().any(|l| l.contains(r#"class="client""#)), "{rendered}");

        assert!(!series("http_request_duration_seconds").is_empty(), "{rendered}");
    }

    #[tokio::test]
    async fn test_openapi_lists_user_paths() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/api-docs/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response.into_body()).await;
        assert!(body["paths"].get("/users").is_some());
        assert!(body["paths"].get("/users/{id}").is_some());
    }
}
