//! HTTP router construction.

use std::sync::Arc;

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{delete, get};
use axum::Router;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::api;
use crate::state::AppState;

/// Build the application router with all routes and middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(api::root))
        .route("/health", get(api::health))
        .route("/jobs", get(api::jobs_list))
        .route("/jobs/{name}", delete(api::jobs_remove))
        .layer(middleware::from_fn(log_request))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn log_request(req: Request, next: Next) -> Response {
    info!(method = %req.method(), path = %req.uri().path(), "request received");
    next.run(req).await
}

// ── Tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::util::ServiceExt;

    use cronhost_core::Config;

    fn test_router() -> (Router, Arc<AppState>) {
        let state = Arc::new(AppState::new(Config::default()));
        (build_router(state.clone()), state)
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn root_reports_job_count() {
        let (router, state) = test_router();
        state.registry.add("*/5 * * * * *", "frequent-task", |_| {});

        let response = router
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["message"], "Hello, World!");
        assert_eq!(json["jobs"], 1);
    }

    #[tokio::test]
    async fn health_is_ok() {
        let (router, _state) = test_router();
        let response = router
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
        // Health reports the configured dispatch tick.
        assert_eq!(
            json["tick_ms"],
            serde_json::json!(Config::default().scheduler.tick_interval_ms)
        );
    }

    #[tokio::test]
    async fn jobs_lists_named_jobs_sorted() {
        let (router, state) = test_router();
        state.registry.add("*/5 * * * * *", "b-job", |_| {});
        state.registry.add("*/10 * * * * *", "a-job", |_| {});
        state.registry.add("*/10 * * * * *", "", |_| {});

        let response = router
            .oneshot(Request::builder().uri("/jobs").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["count"], 2);
        assert_eq!(json["jobs"], serde_json::json!(["a-job", "b-job"]));
    }

    #[tokio::test]
    async fn delete_removes_job_and_is_idempotent() {
        let (router, state) = test_router();
        state.registry.add("*/5 * * * * *", "doomed", |_| {});
        assert_eq!(state.registry.jobs_count(), 1);

        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/jobs/doomed")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["removed"], "doomed");
        assert_eq!(json["count"], 0);

        // Removing an unknown name stays a 200 no-op.
        let response = router
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/jobs/doomed")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["count"], 0);
    }
}
