//! Script submission route.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use tracing::warn;

use crate::services::ErrorCode;
use crate::services::script::{self, ScriptError};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub ok: bool,
    pub operations: usize,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
    pub line: Option<usize>,
}

/// `POST /`: parse the body as a script and submit it as one batch.
pub async fn submit_script(State(state): State<AppState>, body: Bytes) -> Response {
    let submitted = match script::decode(&body) {
        Ok(text) => script::submit(&state.painter, &state.parse, text).await,
        Err(e) => Err(e),
    };
    match submitted {
        Ok(operations) => (StatusCode::OK, Json(SubmitResponse { ok: true, operations })).into_response(),
        Err(e) => {
            warn!(error = %e, code = e.error_code(), "script rejected");
            (script_error_to_status(&e), Json(error_body(&e))).into_response()
        }
    }
}

pub(crate) fn script_error_to_status(err: &ScriptError) -> StatusCode {
    match err {
        ScriptError::Parse(_) | ScriptError::Encoding { .. } => StatusCode::BAD_REQUEST,
        ScriptError::Loop(painter::LoopError::Stopped) => StatusCode::SERVICE_UNAVAILABLE,
        ScriptError::Loop(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_body(err: &ScriptError) -> ErrorResponse {
    ErrorResponse { error: err.to_string(), code: err.error_code(), line: err.line() }
}

#[cfg(test)]
#[path = "script_test.rs"]
mod tests;
