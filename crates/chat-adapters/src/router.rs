//! Webhook shim over the dispatcher.
//!
//! The chat transport posts one JSON event per inbound message to
//! `POST /events` and relays the reply payload back to the user. Health and
//! metrics endpoints ride along for operations.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::trace::TraceLayer;

use crate::dispatch::Dispatcher;
use crate::events::ChatEvent;
use crate::metrics::Metrics;

#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
    pub metrics: Arc<Metrics>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/events", post(handle_event))
        .route("/healthz", get(healthz))
        .route("/metrics", get(metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn handle_event(
    State(state): State<AppState>,
    Json(event): Json<ChatEvent>,
) -> Response {
    match state.dispatcher.handle(event).await {
        Some(reply) => Json(reply).into_response(),
        // No reply owed (e.g. admin command from a non-admin context).
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

async fn healthz() -> &'static str {
    "ok"
}

async fn metrics(State(state): State<AppState>) -> String {
    state.metrics.encode()
}
