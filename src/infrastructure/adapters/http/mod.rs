//! HTTP adapter - Serves the interaction core as a webhook

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;

use crate::application::errors::InteractionError;
use crate::application::interactions::{RawRequest, SIGNATURE_HEADER, TIMESTAMP_HEADER};
use crate::application::services::InteractionService;

#[derive(Clone)]
pub struct HttpState {
    service: Arc<InteractionService>,
    name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: String,
    pub checked_at: String,
}

pub fn router(service: Arc<InteractionService>, name: impl Into<String>) -> Router {
    let state = HttpState {
        service,
        name: name.into(),
    };

    Router::new()
        .route("/", post(interactions).fallback(method_not_allowed))
        .route("/interactions", post(interactions).fallback(method_not_allowed))
        .route("/health", get(health))
        .with_state(state)
}

/// Bind and serve until Ctrl-C
pub async fn serve(bind_address: &str, router: Router) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind_address).await?;
    tracing::info!(bind_address = %listener.local_addr()?, "interactions endpoint listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Body is taken as raw bytes; the signature covers them exactly as sent
async fn interactions(State(state): State<HttpState>, headers: HeaderMap, body: Bytes) -> Response {
    let request = RawRequest::new(
        body.to_vec(),
        header(&headers, SIGNATURE_HEADER),
        header(&headers, TIMESTAMP_HEADER),
    );

    match state.service.handle(request).await {
        Ok(reply) => (StatusCode::OK, Json(reply)).into_response(),
        Err(InteractionError::Unauthorized) => {
            (StatusCode::UNAUTHORIZED, "invalid request signature").into_response()
        }
        Err(InteractionError::UnknownInteractionType(_)) => {
            (StatusCode::BAD_REQUEST, "Unknown interaction type").into_response()
        }
        Err(InteractionError::MalformedPayload(_)) => {
            (StatusCode::BAD_REQUEST, "Invalid interaction payload").into_response()
        }
    }
}

async fn method_not_allowed() -> Response {
    (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed").into_response()
}

async fn health(State(state): State<HttpState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: state.name.clone(),
        checked_at: Utc::now().to_rfc3339(),
    })
}
