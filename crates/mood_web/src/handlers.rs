use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use chrono::Utc;
use mood_core::{Result, Sentiment};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::AppState;

fn formatted_now() -> String {
    Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum GreetResponse {
    Greeting {
        greeting: String,
        timestamp: String,
        calls: u64,
    },
    Error {
        error: String,
    },
}

fn build_greeting(state: &AppState) -> Result<GreetResponse> {
    let timestamp = formatted_now();
    let calls = state.next_call();
    Ok(GreetResponse::Greeting {
        greeting: "Hello, World!".to_string(),
        timestamp,
        calls,
    })
}

/// Liveness-adjacent endpoint: internal errors become a diagnostic payload,
/// never a transport failure.
pub async fn greet(State(state): State<Arc<AppState>>) -> Json<GreetResponse> {
    match build_greeting(&state) {
        Ok(response) => Json(response),
        Err(e) => Json(GreetResponse::Error {
            error: format!("Error occurred: {e}"),
        }),
    }
}

#[derive(Debug, Deserialize)]
pub struct SentimentRequest {
    pub text: String,
}

pub async fn classify(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SentimentRequest>,
) -> std::result::Result<Json<Sentiment>, ApiError> {
    let model = state.model().await?;
    let sentiment = model.classify(&request.text).await?;
    Ok(Json(sentiment))
}

#[derive(Debug, Deserialize)]
pub struct AddParams {
    pub num1: f64,
    pub num2: f64,
}

#[derive(Debug, Serialize)]
pub struct AddResponse {
    pub num1: f64,
    pub num2: f64,
    pub result: f64,
}

pub async fn add(Query(params): Query<AddParams>) -> Json<AddResponse> {
    Json(AddResponse {
        num1: params.num1,
        num2: params.num2,
        result: params.num1 + params.num2,
    })
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Constant liveness check, valid in every lifecycle phase.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

#[derive(Debug, Serialize)]
pub struct HealthzResponse {
    #[serde(rename = "Status")]
    pub status: String,
}

fn build_healthz() -> Result<HealthzResponse> {
    Ok(HealthzResponse {
        status: format!("Ok. Current time is: {}", formatted_now()),
    })
}

/// Verbose liveness check; shares the never-hard-fail posture of [`greet`].
pub async fn healthz() -> Json<HealthzResponse> {
    match build_healthz() {
        Ok(response) => Json(response),
        Err(e) => Json(HealthzResponse {
            status: format!("Error occurred: {e}"),
        }),
    }
}
