//! Request handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::http::response::{ApiError, HealthResponse, SendTransactionResponse};
use crate::http::server::AppState;
use crate::relay::RelayRequest;

/// `POST /sendTransaction`
pub async fn send_transaction(
    State(state): State<AppState>,
    payload: Result<Json<RelayRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            tracing::debug!(error = %rejection.body_text(), "Rejected request body");
            return ApiError::bad_request(rejection.body_text()).into_response();
        }
    };

    // Detached so a client disconnect cannot abort a broadcast in flight.
    let relayer = state.relayer.clone();
    let outcome = tokio::spawn(async move { relayer.relay(&request).await }).await;

    match outcome {
        Ok(Ok(receipt)) => (
            StatusCode::OK,
            Json(SendTransactionResponse::from(&receipt)),
        )
            .into_response(),
        Ok(Err(e)) => ApiError::from(e).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Relay task failed");
            ApiError::bad_request(format!("relay task failed: {}", e)).into_response()
        }
    }
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        relayer: state.relayer.address().to_string(),
        target: state.relayer.allowed_target().to_string(),
        chain_id: state.relayer.chain_id(),
    })
}
