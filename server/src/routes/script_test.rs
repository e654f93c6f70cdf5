use super::*;

use axum::body::to_bytes;
use painter::{Color, CoordinateMode, LoopError, Rect};

use crate::state::test_helpers::{stop, test_app_state};

async fn json_body(response: Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn valid_script_returns_operation_count() {
    let (painter, state) = test_app_state(CoordinateMode::Fraction);
    let response = submit_script(State(state.clone()), "white\nbgrect 0.25 0.25 0.75 0.75\nupdate".into()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["ok"], true);
    assert_eq!(body["operations"], 3);

    let final_state = stop(painter).await;
    assert_eq!(final_state.background, Color::WHITE);
    assert_eq!(final_state.overlay, Some(Rect::new(100, 100, 300, 300)));
    assert_eq!(state.frames.published(), 1);
}

#[tokio::test]
async fn parse_error_is_bad_request_with_line() {
    let (painter, state) = test_app_state(CoordinateMode::Fraction);
    let response = submit_script(State(state.clone()), "white\nmove a b".into()).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["line"], 2);
    assert_eq!(body["code"], "E_PARSE");
    assert!(body["error"].as_str().unwrap().contains("move a b"));

    let final_state = stop(painter).await;
    assert_eq!(final_state.background, Color::BLACK);
}

#[tokio::test]
async fn non_utf8_body_is_bad_request_with_json_error() {
    let (painter, state) = test_app_state(CoordinateMode::Fraction);
    let body = Bytes::from_static(b"white\n\xfe\xff\nupdate");
    let response = submit_script(State(state.clone()), body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["code"], "E_PARSE");
    assert_eq!(body["line"], 2);
    assert!(body["error"].as_str().unwrap().contains("UTF-8"));

    let final_state = stop(painter).await;
    assert_eq!(final_state.background, Color::BLACK);
    assert_eq!(state.frames.published(), 0);
}

#[tokio::test]
async fn stopped_loop_is_service_unavailable() {
    let (painter, state) = test_app_state(CoordinateMode::Fraction);
    stop(painter).await;

    let response = submit_script(State(state), "update".into()).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = json_body(response).await;
    assert_eq!(body["code"], "E_STOPPED");
    assert!(body["line"].is_null());
}

#[test]
fn worker_panic_maps_to_internal_error() {
    let err = ScriptError::Loop(LoopError::WorkerPanicked);
    assert_eq!(script_error_to_status(&err), StatusCode::INTERNAL_SERVER_ERROR);
}
