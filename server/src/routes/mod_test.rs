use super::*;

use painter::CoordinateMode;

use crate::services::script::submit;
use crate::state::test_helpers::{stop, test_app_state};

#[tokio::test]
async fn healthz_is_ok() {
    assert_eq!(healthz().await, StatusCode::OK);
}

#[tokio::test]
async fn status_before_any_frame() {
    let (painter, state) = test_app_state(CoordinateMode::Fraction);
    let Json(body) = status(State(state)).await;
    assert_eq!(body.frames_published, 0);
    assert_eq!(body.width, None);
    stop(painter).await;
}

#[tokio::test]
async fn status_reports_published_frames() {
    let (painter, state) = test_app_state(CoordinateMode::Fraction);
    submit(&state.painter, &state.parse, "green\nupdate\nupdate").await.unwrap();
    stop(painter).await;

    let Json(body) = status(State(state)).await;
    assert_eq!(body.pending, 0);
    assert_eq!(body.frames_published, 1);
    assert_eq!(body.width, Some(400));
    assert_eq!(body.height, Some(400));
}

#[test]
fn router_builds() {
    let (painter, state) = test_app_state(CoordinateMode::Fraction);
    let _router = app(state);
    painter.stop_and_wait().unwrap();
}
