//! Shared constants for the painter crate.

use crate::surface::Size;

// ── Canvas ──────────────────────────────────────────────────────

/// Logical canvas size. Command coordinates resolve against this, independent
/// of how large the display presents the frame.
pub const CANVAS_SIZE: Size = Size::new(400, 400);

// ── Execution loop ──────────────────────────────────────────────

/// In-flight operations the loop queue holds before producers block.
pub const QUEUE_CAPACITY: usize = 100;

/// Name given to the dedicated worker thread.
pub const WORKER_THREAD_NAME: &str = "painter-loop";
