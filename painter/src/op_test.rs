use super::*;
use crate::surface::Size;

/// Records every fill instead of drawing.
#[derive(Default)]
struct RecordingSurface {
    fills: Vec<(Rect, Color)>,
}

impl RecordingSurface {
    fn full_fills(&self) -> usize {
        let bounds = self.bounds();
        self.fills.iter().filter(|(r, _)| *r == bounds).count()
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Size {
        Size::new(400, 400)
    }

    fn fill(&mut self, rect: Rect, color: Color) {
        self.fills.push((rect, color));
    }
}

fn apply(op: &Operation, state: &mut CanvasState) -> (bool, RecordingSurface) {
    let mut surface = RecordingSurface::default();
    let ready = op.apply(state, &mut surface);
    (ready, surface)
}

// --- SetBackground ---

#[test]
fn set_background_changes_color_and_repaints() {
    let mut state = CanvasState::new();
    let (ready, surface) = apply(&Operation::SetBackground(Color::WHITE), &mut state);
    assert!(!ready);
    assert_eq!(state.background, Color::WHITE);
    assert_eq!(surface.full_fills(), 1);
    assert_eq!(surface.fills[0].1, Color::WHITE);
}

#[test]
fn set_background_same_color_twice_repaints_once() {
    let mut state = CanvasState::new();
    let mut surface = RecordingSurface::default();
    let op = Operation::SetBackground(Color::WHITE);
    op.apply(&mut state, &mut surface);
    op.apply(&mut state, &mut surface);
    assert_eq!(surface.full_fills(), 1);
}

#[test]
fn set_background_to_current_default_is_noop() {
    let mut state = CanvasState::new();
    let (_, surface) = apply(&Operation::SetBackground(Color::BLACK), &mut state);
    assert!(surface.fills.is_empty());
}

// --- SetOverlayRect ---

#[test]
fn set_overlay_rect_stores_and_repaints() {
    let mut state = CanvasState::new();
    let rect = Rect::new(100, 100, 300, 300);
    let (ready, surface) = apply(&Operation::SetOverlayRect(rect), &mut state);
    assert!(!ready);
    assert_eq!(state.overlay, Some(rect));
    assert_eq!(surface.full_fills(), 1);
    assert!(surface.fills.contains(&(rect, crate::state::OVERLAY_COLOR)));
}

#[test]
fn set_overlay_rect_repaints_even_when_unchanged() {
    let rect = Rect::new(0, 0, 10, 10);
    let mut state = CanvasState { overlay: Some(rect), ..CanvasState::default() };
    let (_, surface) = apply(&Operation::SetOverlayRect(rect), &mut state);
    assert_eq!(surface.full_fills(), 1);
}

// --- AddShape ---

#[test]
fn add_shape_appends_in_order() {
    let mut state = CanvasState::new();
    let points = [Point::new(1, 2), Point::new(3, 4), Point::new(1, 2)];
    for p in points {
        Operation::AddShape(p).apply(&mut state, &mut RecordingSurface::default());
    }
    assert_eq!(state.shapes, points.to_vec());
}

#[test]
fn add_shape_draws_incrementally() {
    let mut state = CanvasState { shapes: vec![Point::new(10, 10)], ..CanvasState::default() };
    let (ready, surface) = apply(&Operation::AddShape(Point::new(200, 200)), &mut state);
    assert!(!ready);
    // Two bars of the new cross only: no background fill, old shape not redrawn.
    assert_eq!(surface.fills.len(), 2);
    assert_eq!(surface.full_fills(), 0);
}

// --- MoveShapes ---

#[test]
fn move_shapes_collapses_every_shape_to_target() {
    let mut state = CanvasState {
        shapes: vec![Point::new(0, 0), Point::new(50, 60), Point::new(7, 7)],
        ..CanvasState::default()
    };
    let target = Point::new(400, 400);
    let (ready, surface) = apply(&Operation::MoveShapes(target), &mut state);
    assert!(!ready);
    assert_eq!(state.shapes, vec![target; 3]);
    assert_eq!(surface.full_fills(), 1);
}

#[test]
fn move_shapes_on_empty_list_stays_empty() {
    let mut state = CanvasState::new();
    apply(&Operation::MoveShapes(Point::new(5, 5)), &mut state);
    assert!(state.shapes.is_empty());
}

// --- Reset ---

#[test]
fn reset_restores_defaults_and_fills_black() {
    let mut state = CanvasState {
        background: Color::GREEN,
        overlay: Some(Rect::new(1, 1, 2, 2)),
        shapes: vec![Point::new(3, 3)],
    };
    let (ready, surface) = apply(&Operation::Reset, &mut state);
    assert!(!ready);
    assert_eq!(state, CanvasState::default());
    assert_eq!(surface.fills, vec![(surface.bounds(), Color::BLACK)]);
}

// --- MarkReady ---

#[test]
fn mark_ready_signals_without_mutation() {
    let mut state = CanvasState { shapes: vec![Point::new(1, 1)], ..CanvasState::default() };
    let before = state.clone();
    let (ready, surface) = apply(&Operation::MarkReady, &mut state);
    assert!(ready);
    assert_eq!(state, before);
    assert!(surface.fills.is_empty());
}

// --- Batch ---

#[test]
fn batch_applies_members_in_order() {
    let mut state = CanvasState::new();
    let batch = Operation::batch([
        Operation::AddShape(Point::new(1, 1)),
        Operation::Reset,
        Operation::AddShape(Point::new(2, 2)),
    ]);
    apply(&batch, &mut state);
    assert_eq!(state.shapes, vec![Point::new(2, 2)]);
}

#[test]
fn batch_ready_is_or_of_members() {
    let mut state = CanvasState::new();
    let with_ready = Operation::batch([Operation::SetBackground(Color::GREEN), Operation::MarkReady]);
    assert!(apply(&with_ready, &mut state).0);

    let without_ready = Operation::batch([Operation::SetBackground(Color::WHITE)]);
    assert!(!apply(&without_ready, &mut state).0);
}

#[test]
fn batch_keeps_applying_after_ready_member() {
    let mut state = CanvasState::new();
    let batch = Operation::batch([Operation::MarkReady, Operation::SetBackground(Color::WHITE)]);
    assert!(apply(&batch, &mut state).0);
    assert_eq!(state.background, Color::WHITE);
}

#[test]
fn empty_batch_is_not_ready() {
    let mut state = CanvasState::new();
    let (ready, surface) = apply(&Operation::Batch(Vec::new()), &mut state);
    assert!(!ready);
    assert!(surface.fills.is_empty());
}

#[test]
fn nested_batch_propagates_ready() {
    let mut state = CanvasState::new();
    let inner = Operation::batch([Operation::MarkReady]);
    let outer = Operation::batch([Operation::AddShape(Point::new(1, 1)), inner]);
    assert!(apply(&outer, &mut state).0);
    assert_eq!(state.shapes.len(), 1);
}

#[test]
fn kind_names_are_stable() {
    assert_eq!(Operation::MarkReady.kind(), "mark_ready");
    assert_eq!(Operation::Batch(Vec::new()).kind(), "batch");
    assert_eq!(Operation::MoveShapes(Point::default()).kind(), "move_shapes");
}
