//! Operations: self-contained units of work over the canvas state and a surface.
//!
//! Operations carry already-resolved, absolute arguments. Applying one cannot
//! fail; the only result is whether the surface should now be published.

#[cfg(test)]
#[path = "op_test.rs"]
mod op_test;

use crate::state::{self, CanvasState};
use crate::surface::{Color, Point, Rect, Surface};

/// A single mutation request for the execution loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Change the background color. Repaints only when the color changes.
    SetBackground(Color),
    /// Set the black overlay rectangle and repaint.
    SetOverlayRect(Rect),
    /// Append a shape and draw just that shape.
    AddShape(Point),
    /// Relocate every existing shape to the same point and repaint.
    MoveShapes(Point),
    /// Clear the state to defaults and fill the surface black.
    Reset,
    /// Mutates nothing; marks the surface ready for publication.
    MarkReady,
    /// Apply each member in order. Ready if any member was ready.
    Batch(Vec<Operation>),
}

impl Operation {
    /// Group operations into one [`Operation::Batch`].
    pub fn batch(ops: impl IntoIterator<Item = Operation>) -> Self {
        Self::Batch(ops.into_iter().collect())
    }

    /// Short, stable name for logging.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SetBackground(_) => "set_background",
            Self::SetOverlayRect(_) => "set_overlay_rect",
            Self::AddShape(_) => "add_shape",
            Self::MoveShapes(_) => "move_shapes",
            Self::Reset => "reset",
            Self::MarkReady => "mark_ready",
            Self::Batch(_) => "batch",
        }
    }

    /// Apply this operation to `state`, drawing into `surface`.
    ///
    /// Returns `true` if the surface is now ready to be published.
    pub fn apply<S: Surface + ?Sized>(&self, state: &mut CanvasState, surface: &mut S) -> bool {
        match self {
            Self::SetBackground(color) => {
                if state.background != *color {
                    state.background = *color;
                    state::repaint(state, surface);
                }
                false
            }
            Self::SetOverlayRect(rect) => {
                state.overlay = Some(*rect);
                state::repaint(state, surface);
                false
            }
            Self::AddShape(point) => {
                state.shapes.push(*point);
                state::draw_shape(surface, *point);
                false
            }
            Self::MoveShapes(point) => {
                for shape in &mut state.shapes {
                    *shape = *point;
                }
                state::repaint(state, surface);
                false
            }
            Self::Reset => {
                state.reset();
                let bounds = surface.bounds();
                surface.fill(bounds, state.background);
                false
            }
            Self::MarkReady => true,
            Self::Batch(ops) => ops
                .iter()
                .fold(false, |ready, op| op.apply(state, surface) || ready),
        }
    }
}
