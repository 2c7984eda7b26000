use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod error;
pub mod handlers;
pub mod state;

pub use state::AppState;

pub fn create_app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/", get(handlers::greet))
        .route("/sentiment", post(handlers::classify))
        .route("/add", get(handlers::add))
        .route("/health", get(handlers::health))
        .route("/healthz", get(handlers::healthz))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

pub mod prelude {
    pub use crate::AppState;
    pub use mood_core::{Error, Result, Sentiment};
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use mood_inference::Config;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn dummy_config() -> Config {
        Config {
            model_name: Some("dummy".to_string()),
            model_dir: None,
        }
    }

    async fn started_state() -> Arc<AppState> {
        let state = Arc::new(AppState::new());
        state.on_startup(dummy_config()).await.unwrap();
        state
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn sentiment_request(text: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/sentiment")
            .header("content-type", "application/json")
            .body(Body::from(format!(r#"{{"text": "{text}"}}"#)))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_is_ok_in_every_lifecycle_phase() {
        let not_started = Arc::new(AppState::new());
        let started = started_state().await;
        let stopped = started_state().await;
        stopped.on_shutdown().await;

        for state in [not_started, started, stopped] {
            let app = create_app(state);
            let response = app
                .oneshot(
                    Request::builder()
                        .uri("/health")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(body_json(response).await, json!({"status": "ok"}));
        }
    }

    #[tokio::test]
    async fn test_healthz_embeds_timestamp() {
        let app = create_app(started_state().await);
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/healthz")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let status = body["Status"].as_str().unwrap();
        assert!(status.starts_with("Ok. Current time is: "));
    }

    #[tokio::test]
    async fn test_add_returns_sum() {
        let app = create_app(started_state().await);
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/add?num1=100&num2=200")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({"num1": 100.0, "num2": 200.0, "result": 300.0})
        );
    }

    #[tokio::test]
    async fn test_greet_counts_calls() {
        let app = create_app(started_state().await);
        for expected in 1..=3u64 {
            let response = app
                .clone()
                .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            let body = body_json(response).await;
            assert_eq!(body["greeting"], "Hello, World!");
            assert_eq!(body["calls"], expected);
            assert!(body["timestamp"].as_str().is_some());
        }
    }

    #[tokio::test]
    async fn test_concurrent_greetings_observe_gap_free_counts() {
        let app = create_app(started_state().await);
        let mut handles = Vec::new();
        for _ in 0..20 {
            let app = app.clone();
            handles.push(tokio::spawn(async move {
                let response = app
                    .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
                    .await
                    .unwrap();
                body_json(response).await["calls"].as_u64().unwrap()
            }));
        }

        let mut seen = Vec::with_capacity(20);
        for handle in handles {
            seen.push(handle.await.unwrap());
        }
        seen.sort_unstable();
        let expected: Vec<u64> = (1..=20).collect();
        assert_eq!(seen, expected);
    }

    #[tokio::test]
    async fn test_sentiment_with_loaded_model() {
        let app = create_app(started_state().await);
        let response = app
            .oneshot(sentiment_request("I am really enjoying this experience!"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["label"], "POSITIVE");
        let score = body["score"].as_f64().unwrap();
        assert!((0.0..=1.0).contains(&score));
    }

    #[tokio::test]
    async fn test_sentiment_unavailable_before_startup() {
        let app = create_app(Arc::new(AppState::new()));
        let response = app
            .oneshot(sentiment_request("anything"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = body_json(response).await;
        assert!(body["error"].as_str().is_some());
    }

    #[tokio::test]
    async fn test_sentiment_unavailable_after_shutdown() {
        let state = started_state().await;
        state.on_shutdown().await;
        let app = create_app(state);
        let response = app
            .oneshot(sentiment_request("anything"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
