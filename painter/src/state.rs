//! Canvas state: what the picture is made of, and how to redraw it.
//!
//! The execution loop owns the single [`CanvasState`] and is its only
//! mutator, so the state carries no synchronization of its own.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use crate::surface::{Color, Point, Rect, Surface};

/// Color of the overlay rectangle.
pub const OVERLAY_COLOR: Color = Color::BLACK;

/// Color of the cross shape.
pub const SHAPE_COLOR: Color = Color::BLUE;

/// Mutable drawing state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanvasState {
    /// Fill color for the whole surface.
    pub background: Color,
    /// Black rectangle drawn over the background, in absolute surface coordinates.
    pub overlay: Option<Rect>,
    /// Cross anchor points. Insertion order is draw order; duplicates allowed.
    pub shapes: Vec<Point>,
}

impl Default for CanvasState {
    fn default() -> Self {
        Self { background: Color::BLACK, overlay: None, shapes: Vec::new() }
    }
}

impl CanvasState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore defaults in place, keeping the shape list's allocation.
    pub fn reset(&mut self) {
        self.background = Color::BLACK;
        self.overlay = None;
        self.shapes.clear();
    }
}

/// Redraw `surface` from scratch: background, then overlay, then shapes.
pub fn repaint<S: Surface + ?Sized>(state: &CanvasState, surface: &mut S) {
    let bounds = surface.bounds();
    surface.fill(bounds, state.background);
    if let Some(overlay) = state.overlay {
        surface.fill(overlay, OVERLAY_COLOR);
    }
    for &center in &state.shapes {
        draw_shape(surface, center);
    }
}

/// Draw a cross centred at `center`.
///
/// Arm length is half the surface width; bar thickness is a third of that.
pub fn draw_shape<S: Surface + ?Sized>(surface: &mut S, center: Point) {
    let cross = surface.bounds().width() / 2;
    let thickness = cross / 3;

    // Centers may sit anywhere in i32 range; corners saturate at the edges.
    let vertical = Rect::new(
        center.x.saturating_sub(thickness / 2),
        center.y.saturating_sub(cross / 2),
        center.x.saturating_add(thickness / 2),
        center.y.saturating_add(cross / 2),
    );
    let horizontal = Rect::new(
        center.x.saturating_sub(cross / 2),
        center.y.saturating_sub(thickness / 2),
        center.x.saturating_add(cross / 2),
        center.y.saturating_add(thickness / 2),
    );

    surface.fill(vertical, SHAPE_COLOR);
    surface.fill(horizontal, SHAPE_COLOR);
}
