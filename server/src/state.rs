//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds a submission handle to the execution loop, the parser settings for
//! this server and the frame store the loop publishes into. The loop itself
//! is owned by `main`, which stops it after the listener shuts down.

use painter::{LoopHandle, ParseConfig};

use crate::services::display::FrameStore;

/// Clone is required by Axum; every field is a cheap handle.
#[derive(Debug, Clone)]
pub struct AppState {
    pub painter: LoopHandle,
    pub parse: ParseConfig,
    pub frames: FrameStore,
}

impl AppState {
    #[must_use]
    pub fn new(painter: LoopHandle, parse: ParseConfig, frames: FrameStore) -> Self {
        Self { painter, parse, frames }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
