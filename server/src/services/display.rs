//! Headless display sink.
//!
//! The execution loop lends each finished frame to [`FrameStore::publish`]
//! for the duration of the call. The store copies it into shared storage so
//! routes can read the latest frame while the loop keeps drawing.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use painter::{DisplaySink, Framebuffer, Size, Surface};
use tracing::debug;

#[derive(Debug, Default)]
struct Latest {
    frame: Option<Framebuffer>,
    published: u64,
}

/// Shared copy of the most recently published frame.
#[derive(Debug, Clone, Default)]
pub struct FrameStore {
    inner: Arc<Mutex<Latest>>,
}

impl FrameStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the last published frame, if any.
    #[must_use]
    pub fn latest(&self) -> Option<Framebuffer> {
        self.lock().frame.clone()
    }

    /// Size of the last published frame, read without copying it.
    #[must_use]
    pub fn latest_size(&self) -> Option<Size> {
        self.lock().frame.as_ref().map(|frame| frame.size())
    }

    /// Number of frames published so far.
    #[must_use]
    pub fn published(&self) -> u64 {
        self.lock().published
    }

    fn lock(&self) -> MutexGuard<'_, Latest> {
        // A reader that panicked mid-clone leaves the frame intact.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DisplaySink<Framebuffer> for FrameStore {
    fn publish(&mut self, surface: &Framebuffer) {
        let mut guard = self.lock();
        let latest = &mut *guard;
        match latest.frame.as_mut() {
            Some(frame) => frame.clone_from(surface),
            None => latest.frame = Some(surface.clone()),
        }
        latest.published += 1;
        debug!(frame = latest.published, "frame stored");
    }
}

#[cfg(test)]
#[path = "display_test.rs"]
mod tests;
