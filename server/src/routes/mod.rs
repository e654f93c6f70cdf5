//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! `POST /` accepts a script in the request body and submits it to the
//! execution loop. `GET /status` reports loop and frame counters, and
//! `GET /healthz` is a liveness check.

pub mod script;

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", post(script::submit_script))
        .route("/status", get(status))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub pending: usize,
    pub frames_published: u64,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// `GET /status`: pending operations and the last published frame's size.
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    let size = state.frames.latest_size();
    Json(StatusResponse {
        pending: state.painter.pending(),
        frames_published: state.frames.published(),
        width: size.map(|s| s.width),
        height: size.map(|s| s.height),
    })
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
