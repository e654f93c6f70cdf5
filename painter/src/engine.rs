//! Execution loop: the single-threaded serializer that applies operations.
//!
//! DESIGN
//! ======
//! Producers on any thread push operations into one bounded FIFO queue. A
//! dedicated worker thread drains it in order, applies each operation to the
//! "next" of two surfaces, and when an operation signals ready it lends that
//! surface to the [`DisplaySink`] and swaps the two slots by index. The
//! worker is the only code that touches the canvas state or the surfaces.
//!
//! LIFECYCLE
//! =========
//! There is no `Loop` value until a surface provider is available, so
//! "uninitialized" is unrepresentable. [`Loop::start`] allocates both surfaces
//! and spawns the worker. [`Loop::stop_and_wait`] consumes the loop, waits for
//! every submitted operation to be applied, then stops the worker and hands
//! back the final [`CanvasState`].

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use std::thread::{self, JoinHandle};
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info, trace, warn};

use crate::completion::Pending;
use crate::consts::{CANVAS_SIZE, QUEUE_CAPACITY, WORKER_THREAD_NAME};
use crate::op::Operation;
use crate::state::CanvasState;
use crate::surface::{Size, SurfaceError, SurfaceProvider};

/// How often `stop_and_wait` rechecks that the worker is still alive.
const IDLE_POLL: Duration = Duration::from_millis(50);

/// Consumer of finished frames.
///
/// The surface is only borrowed for the duration of the call: the loop
/// reuses the other buffer as soon as `publish` returns, so a sink that
/// needs the pixels later must copy them.
pub trait DisplaySink<S>: Send + 'static {
    fn publish(&mut self, surface: &S);
}

impl<S, F> DisplaySink<S> for F
where
    F: FnMut(&S) + Send + 'static,
{
    fn publish(&mut self, surface: &S) {
        self(surface);
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoopError {
    #[error("surface allocation failed: {0}")]
    Surface(#[from] SurfaceError),
    #[error("failed to spawn loop worker: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("execution loop is stopped")]
    Stopped,
    #[error("execution loop worker panicked")]
    WorkerPanicked,
}

/// Loop sizing. Defaults to the fixed canvas and [`QUEUE_CAPACITY`].
#[derive(Debug, Clone, Copy)]
pub struct LoopConfig {
    pub size: Size,
    pub queue_capacity: usize,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self { size: CANVAS_SIZE, queue_capacity: QUEUE_CAPACITY }
    }
}

#[derive(Debug)]
enum Message {
    Apply(Operation),
    Stop,
}

// =============================================================================
// HANDLE
// =============================================================================

/// Cloneable submission side of the loop.
#[derive(Debug, Clone)]
pub struct LoopHandle {
    tx: mpsc::Sender<Message>,
    pending: Pending,
}

impl LoopHandle {
    /// Submit from a plain thread, blocking while the queue is full.
    ///
    /// Must not be called from inside an async runtime; use
    /// [`LoopHandle::post_async`] there.
    ///
    /// # Errors
    ///
    /// Returns [`LoopError::Stopped`] if the worker no longer accepts work.
    pub fn post(&self, op: Operation) -> Result<(), LoopError> {
        let ticket = self.pending.enter();
        self.tx
            .blocking_send(Message::Apply(op))
            .map_err(|_| LoopError::Stopped)?;
        ticket.handoff();
        Ok(())
    }

    /// Submit from async code, waiting while the queue is full.
    ///
    /// Cancelling the returned future before it completes leaves the pending
    /// count untouched.
    ///
    /// # Errors
    ///
    /// Returns [`LoopError::Stopped`] if the worker no longer accepts work.
    pub async fn post_async(&self, op: Operation) -> Result<(), LoopError> {
        let ticket = self.pending.enter();
        self.tx
            .send(Message::Apply(op))
            .await
            .map_err(|_| LoopError::Stopped)?;
        ticket.handoff();
        Ok(())
    }

    /// Operations submitted but not yet applied.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.count()
    }
}

// =============================================================================
// LOOP
// =============================================================================

/// A running execution loop.
#[derive(Debug)]
pub struct Loop {
    handle: LoopHandle,
    worker: JoinHandle<CanvasState>,
}

impl Loop {
    /// Allocate surfaces of the fixed canvas size and start the worker.
    ///
    /// # Errors
    ///
    /// Returns [`LoopError::Surface`] if either surface cannot be allocated
    /// and [`LoopError::Spawn`] if the worker thread cannot be created.
    pub fn start<P, D>(provider: &P, sink: D, state: CanvasState) -> Result<Self, LoopError>
    where
        P: SurfaceProvider,
        D: DisplaySink<P::Surface>,
    {
        Self::start_with(LoopConfig::default(), provider, sink, state)
    }

    /// [`Loop::start`] with explicit sizing.
    ///
    /// # Errors
    ///
    /// See [`Loop::start`].
    pub fn start_with<P, D>(config: LoopConfig, provider: &P, sink: D, state: CanvasState) -> Result<Self, LoopError>
    where
        P: SurfaceProvider,
        D: DisplaySink<P::Surface>,
    {
        let surfaces = [provider.new_surface(config.size)?, provider.new_surface(config.size)?];
        let capacity = config.queue_capacity.max(1);
        let (tx, rx) = mpsc::channel(capacity);
        let pending = Pending::new();

        let worker = Worker { surfaces, next: 0, state, sink, rx, pending: pending.clone(), published: 0 };
        let worker = thread::Builder::new()
            .name(WORKER_THREAD_NAME.into())
            .spawn(move || worker.run())?;

        info!(
            width = config.size.width,
            height = config.size.height,
            queue_capacity = capacity,
            "execution loop started"
        );

        Ok(Self { handle: LoopHandle { tx, pending }, worker })
    }

    /// A new submission handle for a producer.
    #[must_use]
    pub fn handle(&self) -> LoopHandle {
        self.handle.clone()
    }

    /// Shorthand for [`LoopHandle::post`].
    ///
    /// # Errors
    ///
    /// See [`LoopHandle::post`].
    pub fn post(&self, op: Operation) -> Result<(), LoopError> {
        self.handle.post(op)
    }

    /// Operations submitted but not yet applied.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.handle.pending()
    }

    /// Block until every operation submitted so far has been applied, then
    /// stop the worker and return the final state.
    ///
    /// Callers must stop submitting first; anything that still races in
    /// before the queue closes is applied, anything after is rejected.
    /// Blocks the calling thread, so async callers should run it on a
    /// blocking thread.
    ///
    /// # Errors
    ///
    /// Returns [`LoopError::WorkerPanicked`] if the worker thread died.
    pub fn stop_and_wait(self) -> Result<CanvasState, LoopError> {
        // EDGE: a dead worker never drains the count.
        while !self.handle.pending.wait_idle_timeout(IDLE_POLL) {
            if self.worker.is_finished() {
                break;
            }
        }
        if self.handle.tx.blocking_send(Message::Stop).is_err() {
            warn!("execution loop worker already gone at stop");
        }
        self.worker.join().map_err(|_| LoopError::WorkerPanicked)
    }
}

// =============================================================================
// WORKER
// =============================================================================

struct Worker<S, D> {
    surfaces: [S; 2],
    /// Index of the surface being built; the other one was last published.
    next: usize,
    state: CanvasState,
    sink: D,
    rx: mpsc::Receiver<Message>,
    pending: Pending,
    published: u64,
}

impl<S, D> Worker<S, D>
where
    S: crate::surface::Surface,
    D: DisplaySink<S>,
{
    fn run(mut self) -> CanvasState {
        while let Some(message) = self.rx.blocking_recv() {
            match message {
                Message::Apply(op) => self.step(&op),
                Message::Stop => break,
            }
        }

        // PHASE: DRAIN
        // Close first so no new work can arrive, then apply what is buffered.
        self.rx.close();
        while let Ok(message) = self.rx.try_recv() {
            if let Message::Apply(op) = message {
                self.step(&op);
            }
        }

        info!(published = self.published, shapes = self.state.shapes.len(), "execution loop stopped");
        self.state
    }

    fn step(&mut self, op: &Operation) {
        trace!(kind = op.kind(), "applying operation");
        let ready = op.apply(&mut self.state, &mut self.surfaces[self.next]);
        if ready {
            self.sink.publish(&self.surfaces[self.next]);
            self.next ^= 1;
            self.published += 1;
            debug!(frame = self.published, "frame published");
        }
        self.pending.complete();
    }
}
