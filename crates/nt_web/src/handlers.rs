use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use serde_json::{json, Value};
use tracing::debug;
use crate::envelope::{CallableRequest, CallableResponse, Envelope};
use crate::pipeline;
use crate::AppState;

/// HTTP transport: the body is the payload, failures carry 400/500.
pub async fn personalized_news(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> impl IntoResponse {
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            let envelope = Envelope::error(format!("Invalid request body: {}", rejection.body_text()));
            return (StatusCode::BAD_REQUEST, Json(envelope));
        }
    };

    debug!("HTTP news request: {}", payload);
    let (status, envelope) = pipeline::handle_payload(&state, payload).await;
    (status, Json(envelope))
}

/// Callable transport: `{"data": payload}` in, `{"result": envelope}` out,
/// always with a 200.
pub async fn callable_personalized_news(
    State(state): State<Arc<AppState>>,
    request: Result<Json<CallableRequest>, JsonRejection>,
) -> Json<CallableResponse> {
    let result = match request {
        Ok(Json(request)) => {
            debug!("Callable news request: {}", request.data);
            pipeline::handle_payload(&state, request.data).await.1
        }
        Err(rejection) => Envelope::error(format!("Invalid request body: {}", rejection.body_text())),
    };
    Json(CallableResponse { result })
}

pub async fn health() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}
