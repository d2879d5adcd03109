//! Router assembly and the error boundary.
//!
//! The error boundary is a single layer stack around the whole router:
//! [`error_envelope`] rewrites any non-2xx response the framework emits
//! (unmatched path, rejected method) into the JSON envelope, and
//! [`handle_panic`] converts handler panics into the opaque 500 envelope.
//! Handlers themselves never build error bodies.

use std::any::Any;

use axum::extract::Request;
use axum::http::{header, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::error;

use super::handlers::{health, index, AppState};
use crate::error::ErrorEnvelope;

/// Create the service router with the full error boundary applied.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .layer(middleware::from_fn(error_envelope))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Rewrite framework-emitted error responses into the JSON envelope.
///
/// Responses that already carry a JSON body pass through untouched, so
/// this cannot double-wrap the envelope. Infallible.
pub async fn error_envelope(request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    let status = response.status();

    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }

    let already_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"));
    if already_json {
        return response;
    }

    (status, Json(ErrorEnvelope::for_status(status))).into_response()
}

/// Convert a handler panic into the opaque 500 envelope.
///
/// The panic payload is logged server-side only; the client sees the
/// generic message. Must not itself panic.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = err.downcast_ref::<String>() {
        message.as_str()
    } else if let Some(message) = err.downcast_ref::<&str>() {
        message
    } else {
        "non-string panic payload"
    };

    error!("Unhandled panic while serving request: {}", detail);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorEnvelope::internal()),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::{create_router, error_envelope, handle_panic, AppState};
    use crate::error::ErrorEnvelope;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::middleware;
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt;
    use tower_http::catch_panic::CatchPanicLayer;

    fn test_router() -> Router {
        create_router(AppState::new())
    }

    #[tokio::test]
    async fn index_endpoint_returns_ok() {
        let response = test_router()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn health_endpoint_returns_ok() {
        let response = test_router()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unknown_path_returns_404_envelope() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/nonexistent")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let envelope: ErrorEnvelope = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(envelope, ErrorEnvelope::not_found());
    }

    #[tokio::test]
    async fn post_on_known_path_returns_405_envelope() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let envelope: ErrorEnvelope = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(envelope.error, "HTTP Error");
    }

    async fn boom() {
        panic!("boom")
    }

    #[tokio::test]
    async fn panicking_handler_returns_500_envelope() {
        // Same layer stack as create_router, with a route that blows up.
        let app = Router::new()
            .route("/boom", get(boom))
            .layer(middleware::from_fn(error_envelope))
            .layer(CatchPanicLayer::custom(handle_panic));

        let response = app
            .oneshot(Request::builder().uri("/boom").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let envelope: ErrorEnvelope = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(envelope, ErrorEnvelope::internal());
    }
}
