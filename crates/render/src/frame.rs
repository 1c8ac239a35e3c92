use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Cancellation token for one mount's frame loop.
///
/// Clones share the liveness flag, so cancelling any clone stops every
/// request derived from it.
#[derive(Debug, Clone)]
pub struct FrameHandle {
    generation: u64,
    live: Rc<Cell<bool>>,
}

impl FrameHandle {
    pub fn new(generation: u64) -> Self {
        Self {
            generation,
            live: Rc::new(Cell::new(true)),
        }
    }

    /// Mount generation this handle belongs to.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_live(&self) -> bool {
        self.live.get()
    }

    pub fn cancel(&self) {
        self.live.set(false);
    }

    /// A request for the next frame, tied to this handle.
    pub fn request(&self) -> FrameRequest {
        FrameRequest {
            handle: self.clone(),
        }
    }
}

/// A pending "run the next frame" call handed to the host.
#[derive(Debug, Clone)]
pub struct FrameRequest {
    handle: FrameHandle,
}

impl FrameRequest {
    pub fn generation(&self) -> u64 {
        self.handle.generation()
    }

    /// `false` once the owning mount has been torn down.
    pub fn is_live(&self) -> bool {
        self.handle.is_live()
    }
}

/// The host's display-refresh primitive.
///
/// Implementations hold on to the request and hand it back to
/// [`RenderSurface::on_frame`](crate::RenderSurface::on_frame) at the next
/// refresh.
pub trait FrameScheduler {
    fn request_frame(&mut self, request: FrameRequest);
}

/// FIFO scheduler for driving the frame loop without a display.
#[derive(Debug, Default)]
pub struct QueuedScheduler {
    pending: VecDeque<FrameRequest>,
}

impl QueuedScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pop(&mut self) -> Option<FrameRequest> {
        self.pending.pop_front()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl FrameScheduler for QueuedScheduler {
    fn request_frame(&mut self, request: FrameRequest) {
        self.pending.push_back(request);
    }
}
