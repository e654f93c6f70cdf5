//! Operation execution loop for the painter.
//!
//! Producers (HTTP handlers, input handlers, plain threads) submit
//! [`op::Operation`]s to a running [`engine::Loop`]. A single worker thread
//! applies them in submission order to the shared [`state::CanvasState`] and
//! a double-buffered pair of [`surface::Surface`]s, and hands each finished
//! frame to an [`engine::DisplaySink`]. Scripts in the command language are
//! turned into operations by [`lang::parse`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Execution loop, submission handle and display sink contract |
//! | [`op`] | Operation variants and their effect on state and surface |
//! | [`state`] | Canvas state and the repaint routine |
//! | [`surface`] | Surface trait, integer geometry, in-memory framebuffer |
//! | [`completion`] | Pending-operation count used to drain the loop |
//! | [`lang`] | Command-language parser |
//! | [`consts`] | Canvas size and queue sizing |

pub mod completion;
pub mod consts;
pub mod engine;
pub mod lang;
pub mod op;
pub mod state;
pub mod surface;

pub use engine::{DisplaySink, Loop, LoopConfig, LoopError, LoopHandle};
pub use lang::{CoordinateMode, ParseConfig, ParseError, ParseErrorKind};
pub use op::Operation;
pub use state::CanvasState;
pub use surface::{Color, Framebuffer, FramebufferProvider, Point, Rect, Size, Surface, SurfaceError, SurfaceProvider};
