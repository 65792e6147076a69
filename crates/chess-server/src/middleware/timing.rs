//! Request timing middleware.

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use std::time::{Duration, Instant};

/// Requests slower than this are logged at `warn`.
pub const SLOW_REQUEST: Duration = Duration::from_millis(100);

/// Middleware that logs how long each request took.
///
/// Slow requests are logged as warnings, everything else at debug level.
/// Move submissions for the computer's side include its search, so this is
/// where a slow picker shows up.
pub async fn timing_layer(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    let elapsed = start.elapsed();
    let status = response.status().as_u16();
    let duration_ms = elapsed.as_millis() as u64;

    if elapsed > SLOW_REQUEST {
        tracing::warn!(%method, %path, status, duration_ms, "Slow request");
    } else {
        tracing::debug!(%method, %path, status, duration_ms, "Request completed");
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        http::{Request, StatusCode},
        middleware,
        routing::get,
        Router,
    };
    use tower::ServiceExt;

    async fn fast() -> &'static str {
        "ok"
    }

    async fn slow() -> &'static str {
        tokio::time::sleep(SLOW_REQUEST + Duration::from_millis(20)).await;
        "slow"
    }

    fn app() -> Router {
        Router::new()
            .route("/fast", get(fast))
            .route("/slow", get(slow))
            .layer(middleware::from_fn(timing_layer))
    }

    async fn get_path(path: &str) -> Response {
        app()
            .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_fast_request_body_untouched() {
        let response = get_path("/fast").await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"ok");
    }

    #[tokio::test]
    async fn test_slow_request_still_served() {
        let response = get_path("/slow").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unmatched_route_status_passes_through() {
        let response = get_path("/nowhere").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
